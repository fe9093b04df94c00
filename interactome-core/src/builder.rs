//! Builder utilities for configuring network analysis.
//!
//! Exposes the centrality selection surface and the validation performed
//! before constructing [`NetworkAnalyzer`] instances.

use std::{collections::BTreeSet, fmt};

use crate::{
    Result,
    analysis::NetworkAnalyzer,
    centrality::{DegreeConvention, PowerIteration},
    error::AnalysisError,
    path_stats::SelfDistance,
};

/// A vertex centrality the analyzer can compute.
///
/// # Examples
/// ```
/// use interactome_core::CentralityKind;
///
/// assert_eq!(CentralityKind::Betweenness.file_stem(), "betweenness_centrality");
/// assert_eq!(CentralityKind::ALL.len(), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CentralityKind {
    /// Distinct-neighbour degree under the configured convention.
    Degree,
    /// Sum of reciprocal distances.
    Closeness,
    /// Single-canonical-path betweenness.
    Betweenness,
    /// Raw distinct non-self neighbour count.
    NeighborCount,
    /// Principal eigenvector of the adjacency matrix.
    Eigenvector,
    /// Katz centrality.
    Katz,
    /// PageRank.
    PageRank,
}

impl CentralityKind {
    /// Every metric, in report order.
    pub const ALL: [Self; 7] = [
        Self::Degree,
        Self::Closeness,
        Self::Betweenness,
        Self::NeighborCount,
        Self::Eigenvector,
        Self::Katz,
        Self::PageRank,
    ];

    /// The four path- and degree-based metrics.
    pub const PATH_BASED: [Self; 4] = [
        Self::Degree,
        Self::Closeness,
        Self::Betweenness,
        Self::NeighborCount,
    ];

    /// Stable identifier used for artifact names.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Degree => "degree_centrality",
            Self::Closeness => "closeness_centrality",
            Self::Betweenness => "betweenness_centrality",
            Self::NeighborCount => "neighbor_count_centrality",
            Self::Eigenvector => "eigenvector_centrality",
            Self::Katz => "katz_centrality",
            Self::PageRank => "pagerank",
        }
    }
}

impl fmt::Display for CentralityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Configures and constructs [`NetworkAnalyzer`] instances.
///
/// # Examples
/// ```
/// use interactome_core::{AnalysisBuilder, CentralityKind, DegreeConvention, SelfDistance};
///
/// let analyzer = AnalysisBuilder::new()
///     .with_self_distance(SelfDistance::Exclude)
///     .with_degree_convention(DegreeConvention::Normalized)
///     .with_centralities([CentralityKind::Degree, CentralityKind::Betweenness])
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(analyzer.self_distance(), SelfDistance::Exclude);
/// assert_eq!(analyzer.centralities().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisBuilder {
    self_distance: SelfDistance,
    degree_convention: DegreeConvention,
    centralities: BTreeSet<CentralityKind>,
    power_iteration: PowerIteration,
    katz_alpha: f64,
    katz_beta: f64,
    damping: f64,
}

impl Default for AnalysisBuilder {
    fn default() -> Self {
        Self {
            self_distance: SelfDistance::default(),
            degree_convention: DegreeConvention::default(),
            centralities: BTreeSet::new(),
            power_iteration: PowerIteration::default(),
            katz_alpha: 0.03,
            katz_beta: 1.0,
            damping: 0.85,
        }
    }
}

impl AnalysisBuilder {
    /// Creates a builder populated with default parameters: self distances
    /// included, raw degree, no centralities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the self-distance policy for average path lengths.
    #[must_use]
    pub fn with_self_distance(mut self, policy: SelfDistance) -> Self {
        self.self_distance = policy;
        self
    }

    /// Returns the configured self-distance policy.
    #[must_use]
    pub fn self_distance(&self) -> SelfDistance {
        self.self_distance
    }

    /// Selects how degree centrality is scaled.
    #[must_use]
    pub fn with_degree_convention(mut self, convention: DegreeConvention) -> Self {
        self.degree_convention = convention;
        self
    }

    /// Returns the configured degree convention.
    #[must_use]
    pub fn degree_convention(&self) -> DegreeConvention {
        self.degree_convention
    }

    /// Replaces the set of centralities to compute.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::{AnalysisBuilder, CentralityKind};
    ///
    /// let builder = AnalysisBuilder::new().with_centralities(CentralityKind::PATH_BASED);
    /// assert!(builder.centralities().contains(&CentralityKind::Closeness));
    /// assert!(!builder.centralities().contains(&CentralityKind::PageRank));
    /// ```
    #[must_use]
    pub fn with_centralities<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = CentralityKind>,
    {
        self.centralities = kinds.into_iter().collect();
        self
    }

    /// Returns the selected centralities.
    #[must_use]
    pub fn centralities(&self) -> &BTreeSet<CentralityKind> {
        &self.centralities
    }

    /// Overrides the power-iteration budget used by spectral metrics.
    #[must_use]
    pub fn with_power_iteration(mut self, params: PowerIteration) -> Self {
        self.power_iteration = params;
        self
    }

    /// Overrides Katz `alpha` and `beta`.
    #[must_use]
    pub fn with_katz(mut self, alpha: f64, beta: f64) -> Self {
        self.katz_alpha = alpha;
        self.katz_beta = beta;
        self
    }

    /// Overrides the PageRank damping factor.
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Validates the configuration and constructs a [`NetworkAnalyzer`].
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidParameter`] when Katz `alpha` is not
    /// positive and finite, `beta` is not finite, or the damping factor lies
    /// outside `[0, 1)`.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::{AnalysisBuilder, AnalysisError};
    ///
    /// let err = AnalysisBuilder::new().with_damping(1.0).build().unwrap_err();
    /// assert!(matches!(err, AnalysisError::InvalidParameter { name: "damping", .. }));
    /// ```
    pub fn build(self) -> Result<NetworkAnalyzer> {
        if !(self.katz_alpha.is_finite() && self.katz_alpha > 0.0) {
            return Err(AnalysisError::InvalidParameter {
                name: "alpha",
                reason: "must be positive and finite",
            });
        }
        if !self.katz_beta.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: "beta",
                reason: "must be finite",
            });
        }
        if !(0.0..1.0).contains(&self.damping) {
            return Err(AnalysisError::InvalidParameter {
                name: "damping",
                reason: "must lie in [0, 1)",
            });
        }

        Ok(NetworkAnalyzer::new(
            self.self_distance,
            self.degree_convention,
            self.centralities,
            self.power_iteration,
            (self.katz_alpha, self.katz_beta),
            self.damping,
        ))
    }
}
