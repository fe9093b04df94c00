//! Interaction and gene-subset sources backed by line-oriented files.
use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use interactome_core::Graph;
use tracing::{debug, instrument};

use crate::{errors::MitabError, record::parse_line};

/// Gene-symbol interaction pairs extracted from a PSI-MITAB file.
#[derive(Clone, Debug)]
pub struct InteractionSource {
    name: String,
    pairs: BTreeSet<(String, String)>,
    skipped: usize,
}

impl InteractionSource {
    /// Reads interactions from `reader`, one MITAB record per line.
    ///
    /// Lines that do not carry `uniprotkb:<ACC>_<SYMBOL>(shortlabel)` aliases
    /// in the third and fourth columns are skipped and counted. Repeated
    /// pairs collapse.
    ///
    /// # Errors
    /// Returns [`MitabError::EmptyInput`] when the reader yields no
    /// non-empty line, [`MitabError::NoInteractions`] when no line matches,
    /// and [`MitabError::Io`] when reading fails.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use interactome_providers_mitab::InteractionSource;
    ///
    /// let line = "a\tb\tuniprotkb:P1_TP53(shortlabel)\tuniprotkb:P2_MDM2(shortlabel)\tm\n";
    /// let source = InteractionSource::try_from_reader("demo", Cursor::new(line)).unwrap();
    /// assert_eq!(source.len(), 1);
    /// ```
    #[instrument(name = "providers.mitab.read", skip_all)]
    pub fn try_from_reader<R>(name: impl Into<String>, reader: R) -> Result<Self, MitabError>
    where
        R: BufRead,
    {
        let name = name.into();
        let mut pairs = BTreeSet::new();
        let mut seen_lines = 0_usize;
        let mut skipped = 0_usize;
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            seen_lines += 1;
            match parse_line(&line) {
                Some(pair) => {
                    pairs.insert(pair);
                }
                None => skipped += 1,
            }
        }
        if seen_lines == 0 {
            return Err(MitabError::EmptyInput);
        }
        if pairs.is_empty() {
            return Err(MitabError::NoInteractions { skipped });
        }
        debug!(source = %name, interactions = pairs.len(), skipped, "parsed interactions");
        Ok(Self {
            name,
            pairs,
            skipped,
        })
    }

    /// Opens `path` and reads it with [`Self::try_from_reader`], naming the
    /// source after the path.
    ///
    /// # Errors
    /// Propagates open failures as [`MitabError::Io`] and every error of
    /// [`Self::try_from_reader`].
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, MitabError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::try_from_reader(path.display().to_string(), BufReader::new(file))
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the distinct `(SYMBOL_A, SYMBOL_B)` pairs in ascending order.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.pairs
            .iter()
            .map(|(left, right)| (left.as_str(), right.as_str()))
    }

    /// Number of distinct pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair was read. Always `false` for a constructed source.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of non-empty lines that did not match the MITAB layout.
    #[must_use]
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    /// Builds the interaction graph over every pair. Self-pairs are dropped.
    #[must_use]
    pub fn to_graph(&self) -> Graph<String> {
        Graph::from_edges(self.pairs.iter().cloned())
    }

    /// Builds the interaction graph over pairs whose endpoints both belong
    /// to `subset`. Self-pairs are dropped.
    #[must_use]
    pub fn restrict_to(&self, subset: &GeneSubset) -> Graph<String> {
        Graph::from_filtered_edges(self.pairs.iter().cloned(), &subset.genes)
    }
}

/// Gene identifiers of interest, one per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneSubset {
    genes: BTreeSet<String>,
}

impl GeneSubset {
    /// Reads one identifier per non-empty line, stripping line terminators.
    ///
    /// # Errors
    /// Returns [`MitabError::EmptyInput`] when no identifier was read and
    /// [`MitabError::Io`] when reading fails.
    pub fn try_from_reader<R>(reader: R) -> Result<Self, MitabError>
    where
        R: BufRead,
    {
        let mut genes = BTreeSet::new();
        for line in reader.lines() {
            let line = line?;
            if !line.is_empty() {
                genes.insert(line);
            }
        }
        if genes.is_empty() {
            return Err(MitabError::EmptyInput);
        }
        Ok(Self { genes })
    }

    /// Opens `path` and reads it with [`Self::try_from_reader`].
    ///
    /// # Errors
    /// Propagates open failures as [`MitabError::Io`] and every error of
    /// [`Self::try_from_reader`].
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, MitabError> {
        let file = File::open(path)?;
        Self::try_from_reader(BufReader::new(file))
    }

    /// Whether `gene` is part of the subset.
    #[must_use]
    pub fn contains(&self, gene: &str) -> bool {
        self.genes.contains(gene)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns the identifiers as an ordered set, ready for
    /// `NetworkAnalyzer::run`.
    #[must_use]
    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.genes
    }
}

impl<S: Into<String>> FromIterator<S> for GeneSubset {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            genes: iter.into_iter().map(Into::into).collect(),
        }
    }
}
