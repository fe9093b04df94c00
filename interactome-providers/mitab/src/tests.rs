//! Tests covering MITAB and gene-subset ingestion from in-memory readers.
use std::io::Cursor;

use rstest::rstest;

use super::{GeneSubset, InteractionSource, MitabError};

fn line(left: &str, right: &str) -> String {
    format!("idA\tidB\tuniprotkb:P1_{left}(shortlabel)\tuniprotkb:P2_{right}(shortlabel)\tmethod\n")
}

#[rstest]
fn duplicate_pairs_collapse() {
    let raw = [line("A", "B"), line("A", "B"), line("B", "C")].concat();
    let source = InteractionSource::try_from_reader("dup", Cursor::new(raw)).expect("valid input");
    let pairs: Vec<(&str, &str)> = source.pairs().collect();
    assert_eq!(pairs, vec![("A", "B"), ("B", "C")]);
    assert_eq!(source.skipped_lines(), 0);
}

#[rstest]
fn reversed_pairs_share_one_edge() {
    let raw = [line("A", "B"), line("B", "A")].concat();
    let source = InteractionSource::try_from_reader("rev", Cursor::new(raw)).expect("valid input");
    assert_eq!(source.len(), 2);
    assert_eq!(source.to_graph().edge_count(), 1);
}

#[rstest]
fn self_pairs_are_dropped_from_the_graph() {
    let raw = [line("A", "A"), line("A", "B")].concat();
    let source = InteractionSource::try_from_reader("self", Cursor::new(raw)).expect("valid input");
    let graph = source.to_graph();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.vertex_count(), 2);
}

#[rstest]
fn skipped_lines_are_counted_and_blank_lines_ignored() {
    let raw = format!("header\tline\n\n{}garbage\n", line("A", "B"));
    let source =
        InteractionSource::try_from_reader("mixed", Cursor::new(raw)).expect("valid input");
    assert_eq!(source.len(), 1);
    assert_eq!(source.skipped_lines(), 2);
}

#[rstest]
#[case::empty("")]
#[case::blank_lines("\n\n")]
fn empty_interaction_input_is_rejected(#[case] raw: &str) {
    let err = InteractionSource::try_from_reader("empty", Cursor::new(raw))
        .expect_err("empty input must fail");
    assert!(matches!(err, MitabError::EmptyInput));
}

#[rstest]
fn unmatched_interaction_input_is_rejected() {
    let err = InteractionSource::try_from_reader("junk", Cursor::new("a\tb\nc\td\n"))
        .expect_err("no line matches");
    assert!(matches!(err, MitabError::NoInteractions { skipped: 2 }));
}

#[rstest]
#[case("TP53\nMDM2\n", &["MDM2", "TP53"])]
#[case("TP53\r\nMDM2\r\n", &["MDM2", "TP53"])]
#[case("TP53\n\nTP53", &["TP53"])]
fn gene_subset_strips_terminators(#[case] raw: &str, #[case] expected: &[&str]) {
    let subset = GeneSubset::try_from_reader(Cursor::new(raw)).expect("valid subset");
    let genes: Vec<&str> = subset.as_set().iter().map(String::as_str).collect();
    assert_eq!(genes, expected);
}

#[rstest]
fn gene_subset_rejects_empty_input() {
    let err = GeneSubset::try_from_reader(Cursor::new("\n")).expect_err("empty input must fail");
    assert!(matches!(err, MitabError::EmptyInput));
}

#[rstest]
fn readers_propagate_io_errors() {
    struct FailingReader;

    impl std::io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("boom"))
        }
    }

    impl std::io::BufRead for FailingReader {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            Err(std::io::Error::other("boom"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    let err = InteractionSource::try_from_reader("io", FailingReader)
        .expect_err("I/O failure must propagate");
    assert!(matches!(err, MitabError::Io(_)));
    let err = GeneSubset::try_from_reader(FailingReader).expect_err("I/O failure must propagate");
    assert!(matches!(err, MitabError::Io(_)));
}
