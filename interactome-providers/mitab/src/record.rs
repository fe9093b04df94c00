//! Line-level recognition of PSI-MITAB interactor columns.

const ALIAS_PREFIX: &str = "uniprotkb:";
const ALIAS_SUFFIX: &str = "(shortlabel)";
const MIN_FIELDS: usize = 5;

/// Extracts the gene-symbol pair from one MITAB line.
///
/// The line must carry at least five tab-separated fields with non-empty
/// identifiers in the first two. Fields three and four hold the aliases,
/// each shaped `uniprotkb:<ACC>_<SYMBOL>(shortlabel)`.
pub(crate) fn parse_line(line: &str) -> Option<(String, String)> {
    let fields: Vec<&str> = line.splitn(MIN_FIELDS + 1, '\t').collect();
    let [id_a, id_b, alias_a, alias_b, _, ..] = fields.as_slice() else {
        return None;
    };
    if id_a.is_empty() || id_b.is_empty() {
        return None;
    }
    let left = alias_symbol(alias_a)?;
    let right = alias_symbol(alias_b)?;
    Some((left.to_owned(), right.to_owned()))
}

fn alias_symbol(field: &str) -> Option<&str> {
    let body = field
        .strip_prefix(ALIAS_PREFIX)?
        .strip_suffix(ALIAS_SUFFIX)?;
    let (accession, symbol) = body.split_once('_')?;
    if accession.is_empty() || symbol.is_empty() || symbol.contains('(') {
        return None;
    }
    Some(symbol)
}
