//! Error types for the interactome core library.
//!
//! Defines the structural, computation-guard and generator error enums
//! exposed by the public API, each paired with a stable machine-readable
//! code.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A malformed operation against a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The requested vertex is not part of the graph.
    #[error("vertex `{vertex}` is not in the graph")]
    VertexNotFound {
        /// Display form of the missing vertex.
        vertex: Arc<str>,
    },
}

impl GraphError {
    pub(crate) fn not_found(vertex: &impl fmt::Display) -> Self {
        Self::VertexNotFound {
            vertex: Arc::from(vertex.to_string()),
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The requested vertex is not part of the graph.
        VertexNotFound => VertexNotFound { .. } => "GRAPH_VERTEX_NOT_FOUND",
    }
}

/// Error raised while reducing distances or scoring vertices.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AnalysisError {
    /// The component had no members with distance data to average over.
    #[error("component has no members with distance data")]
    EmptyComponent,
    /// The averaging denominator was zero.
    #[error("no vertex pairs contribute to `{quantity}`")]
    NoPairs {
        /// Name of the quantity that could not be averaged.
        quantity: &'static str,
    },
    /// An iterative centrality did not settle within its iteration budget.
    #[error("{metric} did not converge within {iterations} iterations")]
    NotConverged {
        /// Name of the centrality metric.
        metric: &'static str,
        /// Iteration budget that was exhausted.
        iterations: usize,
    },
    /// Iteration parameters were outside their valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A structural graph operation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`AnalysisError`] variants.
    enum AnalysisErrorCode for AnalysisError {
        /// The component had no members with distance data.
        EmptyComponent => EmptyComponent => "ANALYSIS_EMPTY_COMPONENT",
        /// The averaging denominator was zero.
        NoPairs => NoPairs { .. } => "ANALYSIS_NO_PAIRS",
        /// An iterative centrality did not converge.
        NotConverged => NotConverged { .. } => "ANALYSIS_NOT_CONVERGED",
        /// Iteration parameters were outside their valid range.
        InvalidParameter => InvalidParameter { .. } => "ANALYSIS_INVALID_PARAMETER",
        /// A structural graph operation failed.
        GraphFailure => Graph(..) => "ANALYSIS_GRAPH_FAILURE",
    }
}

impl AnalysisError {
    /// Retrieve the inner [`GraphErrorCode`] when the failure was structural.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Error raised while building or perturbing small-world models.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SmallWorldError {
    /// The lattice parameters cannot describe a ring lattice.
    #[error(
        "ring lattice needs 0 < mean_degree < vertex_count (got vertex_count={vertex_count}, mean_degree={mean_degree})"
    )]
    InvalidLattice {
        /// Requested number of vertices.
        vertex_count: usize,
        /// Requested mean degree.
        mean_degree: usize,
    },
    /// A rewiring proportion or sweep step was outside its accepted range.
    #[error("proportion {proportion} is outside its accepted range")]
    InvalidProportion {
        /// The rejected proportion.
        proportion: f64,
    },
    /// Rewiring was requested on a graph without edges.
    #[error("cannot rewire a graph with no edges")]
    NoEdgesToRewire,
    /// No valid replacement edge was sampled within the retry bound.
    #[error("rewire step {step} found no free vertex pair after {attempts} attempts")]
    RewireExhausted {
        /// Zero-based index of the failing rewiring step.
        step: usize,
        /// Number of sampling attempts made for that step.
        attempts: usize,
    },
    /// Analysing a generated model failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

define_error_codes! {
    /// Stable codes describing [`SmallWorldError`] variants.
    enum SmallWorldErrorCode for SmallWorldError {
        /// The lattice parameters cannot describe a ring lattice.
        InvalidLattice => InvalidLattice { .. } => "SMALL_WORLD_INVALID_LATTICE",
        /// A rewiring proportion or sweep step was outside its range.
        InvalidProportion => InvalidProportion { .. } => "SMALL_WORLD_INVALID_PROPORTION",
        /// Rewiring was requested on a graph without edges.
        NoEdgesToRewire => NoEdgesToRewire => "SMALL_WORLD_NO_EDGES",
        /// No valid replacement edge was sampled within the retry bound.
        RewireExhausted => RewireExhausted { .. } => "SMALL_WORLD_REWIRE_EXHAUSTED",
        /// Analysing a generated model failed.
        AnalysisFailure => Analysis(..) => "SMALL_WORLD_ANALYSIS_FAILURE",
    }
}

impl SmallWorldError {
    /// Retrieve the inner [`AnalysisErrorCode`] when a generated model could
    /// not be analysed.
    #[must_use]
    pub const fn analysis_code(&self) -> Option<AnalysisErrorCode> {
        match self {
            Self::Analysis(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the analysis API.
pub type Result<T> = core::result::Result<T, AnalysisError>;
