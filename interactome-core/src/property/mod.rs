//! Property-based suites over randomly generated graphs.

mod strategies;
