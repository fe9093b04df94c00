//! Benchmark support crate for interactome.
//!
//! Provides seeded synthetic networks and parameter types used by the
//! Criterion benchmarks for breadth-first traversal, centrality scoring and
//! small-world generation.

pub mod error;
pub mod params;
pub mod source;
