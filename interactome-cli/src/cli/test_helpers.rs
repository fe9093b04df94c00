//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary MITAB inputs and assert error
//! handling behaviour. These helpers keep the test cases concise.

use std::fs::File;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use interactome_test_support::fixtures::{scenario_genes, scenario_mitab};
use tempfile::TempDir;

use super::{Cli, CliError, PolicyArgs, RetryArgs, SelfDistanceArg, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Writes the shared scenario network and returns `(interactions, genes)`.
pub(super) fn scenario_inputs(dir: &TempDir) -> io::Result<(PathBuf, PathBuf)> {
    let interactions = create_text_file(dir, "interactions.mitab", &scenario_mitab())?;
    let genes = create_text_file(dir, "genes.txt", &scenario_genes())?;
    Ok((interactions, genes))
}

pub(super) const fn policy(self_distance: SelfDistanceArg) -> PolicyArgs {
    PolicyArgs { self_distance }
}

pub(super) fn retry(max_attempts: usize) -> RetryArgs {
    RetryArgs {
        max_attempts: NonZeroUsize::new(max_attempts).unwrap_or(NonZeroUsize::MIN),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
