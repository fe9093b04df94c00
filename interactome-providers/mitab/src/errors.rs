use thiserror::Error;

/// Errors raised while reading interaction or gene-subset files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MitabError {
    /// The input contained no non-empty lines.
    #[error("input contained no lines")]
    EmptyInput,
    /// No line of the interaction file had the expected interactor columns.
    #[error("no line matched the MITAB interactor layout ({skipped} lines skipped)")]
    NoInteractions { skipped: usize },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
