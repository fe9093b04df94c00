//! Text, GraphML, JSON and CSV renderers for analysis and sweep results.

use std::collections::BTreeMap;
use std::io::{self, Write};

use interactome_core::{
    AllPairsDistances, AnalysisReport, CentralityScores, Graph, SweepResult, Vertex,
};
use serde::Serialize;

const NOT_REACHABLE: &str = "Not Reachable";

/// Writes one `Distances from <source>` block per vertex, listing every
/// vertex of `graph` in order.
pub(super) fn write_distances<V: Vertex>(
    graph: &Graph<V>,
    distances: &AllPairsDistances<V>,
    mut writer: impl Write,
) -> io::Result<()> {
    for source in graph.vertices() {
        writeln!(writer, "Distances from {source}")?;
        for target in graph.vertices() {
            match distances.distance(source, target) {
                Some(hops) => writeln!(writer, "\t{target}: {hops}")?,
                None => writeln!(writer, "\t{target}: {NOT_REACHABLE}")?,
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes the component census, smallest component first.
pub(super) fn write_components<V: Vertex>(
    report: &AnalysisReport<V>,
    mut writer: impl Write,
) -> io::Result<()> {
    writeln!(writer, "Discovered {} components", report.components().len())?;
    writeln!(writer)?;
    for component in report.components() {
        writeln!(writer, "Unique component of size {}", component.size())?;
        writeln!(writer, " diameter {}", component.diameter())?;
        writeln!(writer, " avg degree {}", component.mean_degree())?;
        match component.average_path_length() {
            Some(length) => writeln!(writer, " avg shortest path {length}")?,
            None => writeln!(writer, " avg shortest path undefined")?,
        }
        for member in component.members() {
            writeln!(writer, "\t{member}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes `graph` as an undirected GraphML document without attributes.
pub(super) fn write_graphml<V: Vertex>(graph: &Graph<V>, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#
    )?;
    writeln!(writer, r#"  <graph edgedefault="undirected">"#)?;
    for vertex in graph.vertices() {
        writeln!(writer, r#"    <node id="{}"/>"#, escape_xml(&vertex.to_string()))?;
    }
    for (left, right) in graph.edges() {
        writeln!(
            writer,
            r#"    <edge source="{}" target="{}"/>"#,
            escape_xml(&left.to_string()),
            escape_xml(&right.to_string())
        )?;
    }
    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Writes one metric as a JSON object mapping vertex to score.
pub(super) fn write_centrality<V: Vertex>(
    scores: &CentralityScores<V>,
    mut writer: impl Write,
) -> io::Result<()> {
    let document: BTreeMap<String, f64> = scores
        .iter()
        .map(|(vertex, score)| (vertex.to_string(), score))
        .collect();
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writeln!(writer)
}

#[derive(Serialize)]
struct ComponentDigest {
    size: usize,
    diameter: usize,
    mean_degree: f64,
    average_path_length: Option<f64>,
}

#[derive(Serialize)]
struct ReferenceDigest {
    vertex_count: usize,
    mean_degree: f64,
    average_path_length: f64,
}

#[derive(Serialize)]
struct AnalysisDigest {
    vertices: usize,
    edges: usize,
    components: Vec<ComponentDigest>,
    largest_component: Option<ReferenceDigest>,
    centralization: BTreeMap<&'static str, f64>,
}

/// Writes the machine-readable digest of `report`: component figures, the
/// largest-component reference and each metric's centralization.
pub(super) fn write_digest<V: Vertex>(
    report: &AnalysisReport<V>,
    mut writer: impl Write,
) -> io::Result<()> {
    let digest = AnalysisDigest {
        vertices: report.vertex_count(),
        edges: report.edge_count(),
        components: report
            .components()
            .iter()
            .map(|component| ComponentDigest {
                size: component.size(),
                diameter: component.diameter(),
                mean_degree: component.mean_degree(),
                average_path_length: component.average_path_length(),
            })
            .collect(),
        largest_component: report.reference().map(|reference| ReferenceDigest {
            vertex_count: reference.vertex_count,
            mean_degree: reference.mean_degree,
            average_path_length: reference.average_path_length,
        }),
        centralization: report
            .centralities()
            .iter()
            .map(|(kind, scores)| (kind.file_stem(), scores.centralization()))
            .collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &digest)?;
    writeln!(writer)
}

/// Writes the `c,l,p` table, reference row first.
pub(super) fn write_path_length_table(
    result: &SweepResult,
    mut writer: impl Write,
) -> io::Result<()> {
    writeln!(writer, "c,l,p")?;
    for row in result.rows() {
        writeln!(
            writer,
            "{},{},{}",
            row.mean_degree, row.average_path_length, row.rewire_proportion
        )?;
    }
    Ok(())
}

/// Writes the `c,cl/n,ncp` table, reference row first. The reference row is
/// scaled by the reference component size, every other row by the lattice
/// size.
pub(super) fn write_scaled_table(result: &SweepResult, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "c,cl/n,ncp")?;
    let reference_size = result.reference().map(|reference| reference.vertex_count);
    for (index, row) in result.rows().iter().enumerate() {
        let vertex_count = match reference_size {
            Some(size) if index == 0 => size,
            _ => result.vertex_count(),
        };
        writeln!(
            writer,
            "{},{},{}",
            row.mean_degree,
            row.scaled_path_length(vertex_count),
            row.scaled_proportion(vertex_count)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use interactome_core::{
        AnalysisBuilder, CentralityKind, EmpiricalReference, RewireConfig, SweepPlan,
        all_pairs_distances, run_sweep,
    };
    use rstest::rstest;

    fn rendered(render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer).expect("rendering into memory succeeds");
        String::from_utf8(buffer).expect("renderers emit UTF-8")
    }

    fn split_graph() -> Graph<String> {
        let mut graph = Graph::from_edges([("A".to_owned(), "B".to_owned())]);
        graph.add_vertex("C".to_owned());
        graph
    }

    #[rstest]
    fn distances_mark_unreachable_targets() {
        let graph = split_graph();
        let distances = all_pairs_distances(&graph);
        let text = rendered(|out| write_distances(&graph, &distances, out));
        let expected = "Distances from A\n\tA: 0\n\tB: 1\n\tC: Not Reachable\n\n\
                        Distances from B\n\tA: 1\n\tB: 0\n\tC: Not Reachable\n\n\
                        Distances from C\n\tA: Not Reachable\n\tB: Not Reachable\n\tC: 0\n\n";
        assert_eq!(text, expected);
    }

    #[rstest]
    fn components_are_listed_smallest_first() {
        let report = AnalysisBuilder::new()
            .build()
            .expect("defaults valid")
            .run(&split_graph(), None)
            .expect("analysis succeeds");
        let text = rendered(|out| write_components(&report, out));
        let expected = "Discovered 2 components\n\n\
                        Unique component of size 1\n diameter 0\n avg degree 0\n avg shortest path 0\n\tC\n\n\
                        Unique component of size 2\n diameter 1\n avg degree 1\n avg shortest path 0.5\n\tA\n\tB\n\n";
        assert_eq!(text, expected);
    }

    #[rstest]
    fn graphml_escapes_identifiers() {
        let graph = Graph::from_edges([("A&B".to_owned(), "<C>".to_owned())]);
        let text = rendered(|out| write_graphml(&graph, out));
        assert!(text.starts_with("<?xml"));
        assert!(text.contains(r#"<graph edgedefault="undirected">"#));
        assert!(text.contains(r#"<node id="A&amp;B"/>"#));
        assert!(text.contains(r#"<node id="&lt;C&gt;"/>"#));
        assert!(text.contains(r#"<edge source="&lt;C&gt;" target="A&amp;B"/>"#));
        assert!(text.trim_end().ends_with("</graphml>"));
    }

    #[rstest]
    fn centrality_json_maps_vertices_to_scores() {
        let report = AnalysisBuilder::new()
            .with_centralities([CentralityKind::Degree])
            .build()
            .expect("configuration valid")
            .run(&split_graph(), None)
            .expect("analysis succeeds");
        let scores = report
            .centrality(CentralityKind::Degree)
            .expect("degree selected");
        let text = rendered(|out| write_centrality(scores, out));
        let parsed: BTreeMap<String, f64> = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(parsed.get("A"), Some(&1.0));
        assert_eq!(parsed.get("C"), Some(&0.0));
        assert_eq!(parsed.len(), 3);
    }

    #[rstest]
    fn digest_reports_the_largest_component() {
        let report = AnalysisBuilder::new()
            .build()
            .expect("defaults valid")
            .run(&split_graph(), None)
            .expect("analysis succeeds");
        let text = rendered(|out| write_digest(&report, out));
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(parsed["vertices"], 3);
        assert_eq!(parsed["components"].as_array().map(Vec::len), Some(2));
        assert_eq!(parsed["largest_component"]["vertex_count"], 2);
    }

    #[rstest]
    fn sweep_tables_lead_with_the_reference_row() {
        let plan = SweepPlan::new(10, 2..=2, vec![0.0], 88);
        let result = run_sweep(&plan, RewireConfig::default())
            .expect("sweep runs")
            .with_reference(EmpiricalReference {
                vertex_count: 20,
                mean_degree: 2.0,
                average_path_length: 4.0,
            });

        let table = rendered(|out| write_path_length_table(&result, out));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.first(), Some(&"c,l,p"));
        assert_eq!(lines.get(1), Some(&"2,4,0.5"));
        assert_eq!(lines.len(), 3);

        let scaled = rendered(|out| write_scaled_table(&result, out));
        let lines: Vec<&str> = scaled.lines().collect();
        assert_eq!(lines.first(), Some(&"c,cl/n,ncp"));
        assert_eq!(lines.get(1), Some(&"2,0.4,20"));
        assert!(lines.get(2).is_some_and(|row| row.starts_with("2,") && row.ends_with(",0")));
    }
}
