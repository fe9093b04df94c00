//! PSI-MITAB interaction provider.
//!
//! Turns a MITAB interaction export and a gene-subset list into the
//! undirected [`interactome_core::Graph`] consumed by the analysis
//! pipeline.

mod errors;
mod record;
mod source;

pub use errors::MitabError;
pub use source::{GeneSubset, InteractionSource};

#[cfg(test)]
mod tests;
