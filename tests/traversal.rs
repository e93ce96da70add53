//! End-to-end checks over the public API: traversal feeding the renderer.

use pipscope::export::{export_to_string, render_script, ExportData, ExportFormat};
use pipscope::graph::{build_graph, DependencyGraph, Edge, DEFAULT_MAX_DEPTH};
use pipscope::source::{LookupError, StaticSource};

fn leaf() -> Vec<String> {
    Vec::new()
}

fn requests_source() -> StaticSource {
    StaticSource::new()
        .with_package(
            "requests",
            ["certifi", "charset-normalizer", "idna", "urllib3"],
        )
        .with_package("certifi", leaf())
        .with_package("charset-normalizer", leaf())
        .with_package("idna", leaf())
        .with_package("urllib3", leaf())
}

#[test]
fn requests_graph_renders_expected_script() {
    let edges = build_graph(&requests_source(), "requests", DEFAULT_MAX_DEPTH).unwrap();

    assert_eq!(
        render_script(&edges),
        "@startuml\n\
         requests --> certifi\n\
         requests --> charset-normalizer\n\
         requests --> idna\n\
         requests --> urllib3\n\
         @enduml"
    );
}

#[test]
fn unknown_root_fails_without_output() {
    let result = build_graph(&requests_source(), "flask", DEFAULT_MAX_DEPTH);
    assert!(matches!(result, Err(LookupError::NotFound { ref package }) if package == "flask"));
}

#[test]
fn leaf_root_renders_empty_diagram() {
    let edges = build_graph(&requests_source(), "idna", DEFAULT_MAX_DEPTH).unwrap();
    assert_eq!(render_script(&edges), "@startuml\n@enduml");
}

#[test]
fn depth_one_has_no_edges_from_children() {
    let source = StaticSource::new()
        .with_package("flask", ["jinja2", "werkzeug"])
        .with_package("jinja2", ["markupsafe"])
        .with_package("werkzeug", ["markupsafe"])
        .with_package("markupsafe", leaf());

    let edges = build_graph(&source, "flask", 1).unwrap();
    assert!(edges.iter().all(|edge| edge.parent == "flask"));
    assert_eq!(edges.len(), 2);
}

#[test]
fn diamond_keeps_both_edges_but_expands_shared_child_once() {
    let source = StaticSource::new()
        .with_package("root", ["a", "b"])
        .with_package("a", ["c"])
        .with_package("b", ["c"])
        .with_package("c", ["d"])
        .with_package("d", leaf());

    let edges = build_graph(&source, "root", DEFAULT_MAX_DEPTH).unwrap();

    assert!(edges.contains(&Edge::new("a", "c")));
    assert!(edges.contains(&Edge::new("b", "c")));
    assert_eq!(edges.iter().filter(|e| e.parent == "c").count(), 1);
    assert_eq!(
        render_script(&edges),
        "@startuml\nroot --> a\na --> c\nc --> d\nroot --> b\nb --> c\n@enduml"
    );
}

#[test]
fn repeated_traversal_is_identical() {
    let source = StaticSource::new()
        .with_package("x", ["y", "z"])
        .with_package("y", ["z", "x"])
        .with_package("z", ["y"]);

    let first = build_graph(&source, "x", DEFAULT_MAX_DEPTH).unwrap();
    let second = build_graph(&source, "x", DEFAULT_MAX_DEPTH).unwrap();

    assert_eq!(first, second);
    assert_eq!(render_script(&first), render_script(&second));
}

#[test]
fn cyclic_declarations_are_reported_by_graph() {
    let source = StaticSource::new()
        .with_package("sphinx", ["sphinxcontrib-applehelp"])
        .with_package("sphinxcontrib-applehelp", ["sphinx"]);

    let edges = build_graph(&source, "sphinx", DEFAULT_MAX_DEPTH).unwrap();
    let graph = DependencyGraph::from_edges("sphinx", &edges);

    assert_eq!(edges.len(), 2);
    assert!(graph.has_cycles());
    assert_eq!(
        graph.get_cycle_details()[0].len(),
        2,
        "both packages belong to the cycle"
    );
}

#[test]
fn json_export_carries_edges_and_summary() {
    let edges = build_graph(&requests_source(), "requests", 3).unwrap();
    let data = ExportData::new("requests", 3, edges);

    let json = export_to_string(ExportFormat::Json, &data).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["root"], "requests");
    assert_eq!(parsed["summary"]["packages"], 5);
    assert_eq!(parsed["edges"][3]["child"], "urllib3");
}
