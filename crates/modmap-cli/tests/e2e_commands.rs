//! E2E tests for the one-shot commands: export, show, search, order, stats.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE: &str = r#"{
  "Order.Basic": [],
  "Algebra.Group": ["Order.Basic"],
  "Algebra.Ring": ["Algebra.Group", "Order.Basic"],
  "Topology.Basic": ["Order.Basic"]
}"#;

fn modmap_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("modmap"));
    cmd.current_dir(dir);
    cmd.env("MODMAP_LOG", "error");
    cmd.env("MODMAP_USER_CONFIG", dir.join("no-user-config.toml"));
    cmd.env_remove("MODMAP_DATA");
    cmd.env_remove("FORMAT");
    cmd
}

fn project(data: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("data.json"), data).expect("write data");
    dir
}

fn add_translation(dir: &Path, language: &str, body: &str) {
    let lan = dir.join("lan");
    std::fs::create_dir_all(&lan).expect("create lan");
    std::fs::write(lan.join(format!("{language}.json")), body).expect("write translation");
}

fn json_of(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("modmap should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_two_module_graph() {
    let dir = project(r#"{"A.X": ["B.Y"], "B.Y": []}"#);
    let json = json_of(modmap_cmd(dir.path()).args(["export", "--json"]));

    let nodes = json["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["id"], "A.X");
    assert_eq!(nodes[0]["name"], "A.X");
    assert_eq!(nodes[0]["value"], 1);
    assert!((nodes[0]["x"].as_f64().expect("x") - 400.0).abs() < 1e-9);
    assert!(nodes[1]["x"].as_f64().expect("x").abs() < 1e-9);

    assert_eq!(
        json["links"],
        serde_json::json!([{ "source": "B.Y", "target": "A.X" }])
    );
    let categories: Vec<&str> = json["categories"]
        .as_array()
        .expect("categories array")
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(categories, vec!["A", "B"]);
}

#[test]
fn export_is_deterministic() {
    let dir = project(SAMPLE);
    let first = modmap_cmd(dir.path()).args(["export"]).output().expect("run");
    let second = modmap_cmd(dir.path()).args(["export"]).output().expect("run");
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn export_to_file_writes_graph_and_reports_summary() {
    let dir = project(SAMPLE);
    modmap_cmd(dir.path())
        .args(["export", "--output", "graph.json", "--compact", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("graph.json"));

    let written = std::fs::read_to_string(dir.path().join("graph.json")).expect("exported file");
    let json: Value = serde_json::from_str(&written).expect("valid JSON");
    assert_eq!(json["nodes"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["links"].as_array().map(Vec::len), Some(4));
}

#[test]
fn export_applies_translation() {
    let dir = project(SAMPLE);
    add_translation(dir.path(), "zh-HANS", r#"{"Algebra": "代数", "Group": "群"}"#);
    let json = json_of(modmap_cmd(dir.path()).args(["--lang", "zh-HANS", "export"]));

    let group = json["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .find(|n| n["id"] == "Algebra.Group")
        .expect("Algebra.Group exported")
        .clone();
    assert_eq!(group["name"], "代数.群");
}

#[test]
fn export_with_missing_translation_keeps_ids() {
    let dir = project(SAMPLE);
    let json = json_of(modmap_cmd(dir.path()).args(["--lang", "fr", "export"]));
    let names: Vec<&str> = json["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .filter_map(|n| n["name"].as_str())
        .collect();
    assert!(names.contains(&"Algebra.Group"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_reports_neighbours_and_degrees() {
    let dir = project(SAMPLE);
    let json = json_of(modmap_cmd(dir.path()).args(["show", "Algebra.Group", "--json"]));
    assert_eq!(json["id"], "Algebra.Group");
    assert_eq!(json["category"], "Algebra");
    assert_eq!(json["in_degree"], 1);
    assert_eq!(json["out_degree"], 1);
    assert_eq!(json["dependencies"], serde_json::json!(["Order.Basic"]));
    assert_eq!(json["dependents"], serde_json::json!(["Algebra.Ring"]));
}

#[test]
fn show_text_is_one_panel() {
    let dir = project(SAMPLE);
    modmap_cmd(dir.path())
        .args(["show", "Order.Basic", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("panel Order.Basic"))
        .stdout(predicate::str::contains("imported-by:"));
}

#[test]
fn show_unknown_module_fails_with_code() {
    let dir = project(SAMPLE);
    let output = modmap_cmd(dir.path())
        .args(["show", "No.Such", "--json"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(json["error"]["error_code"], "E2001");
    assert!(output.stdout.is_empty());
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_ranks_exact_id_first() {
    let dir = project(SAMPLE);
    let json = json_of(modmap_cmd(dir.path()).args(["search", "Algebra.Group", "--json"]));
    let hits = json.as_array().expect("array of hits");
    assert!(!hits.is_empty());
    assert_eq!(hits[0]["id"], "Algebra.Group");
    assert_eq!(hits[0]["field"], "id");
}

#[test]
fn search_respects_limit() {
    let dir = project(SAMPLE);
    let json = json_of(modmap_cmd(dir.path()).args(["search", "a", "-n", "2", "--json"]));
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn search_finds_translated_labels() {
    let dir = project(SAMPLE);
    add_translation(dir.path(), "zh-HANS", r#"{"Topology": "拓扑"}"#);
    let json = json_of(modmap_cmd(dir.path()).args(["--lang", "zh-HANS", "search", "拓扑", "--json"]));
    let hits = json.as_array().expect("hits");
    assert_eq!(hits[0]["id"], "Topology.Basic");
    assert_eq!(hits[0]["field"], "label");
}

#[test]
fn search_without_matches_is_empty_not_an_error() {
    let dir = project(SAMPLE);
    let json = json_of(modmap_cmd(dir.path()).args(["search", "zzzzqqq", "--json"]));
    assert_eq!(json, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// order
// ---------------------------------------------------------------------------

#[test]
fn order_puts_dependencies_first() {
    let dir = project(SAMPLE);
    let json = json_of(modmap_cmd(dir.path()).args(["order", "--json"]));
    let ids: Vec<&str> = json
        .as_array()
        .expect("rows")
        .iter()
        .filter_map(|row| row["id"].as_str())
        .collect();
    assert_eq!(ids.len(), 4);

    let pos = |id: &str| ids.iter().position(|x| *x == id).expect("present");
    assert!(pos("Order.Basic") < pos("Algebra.Group"));
    assert!(pos("Algebra.Group") < pos("Algebra.Ring"));
    assert!(pos("Order.Basic") < pos("Topology.Basic"));

    let first_rank = json[0]["rank"].as_f64().expect("rank");
    assert!(first_rank.abs() < 1e-9);
}

#[test]
fn order_limit_truncates() {
    let dir = project(SAMPLE);
    let json = json_of(modmap_cmd(dir.path()).args(["order", "-n", "1", "--json"]));
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["position"], 0);
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

#[test]
fn stats_json_counts_graph() {
    let dir = project(SAMPLE);
    let json = json_of(modmap_cmd(dir.path()).args(["stats", "--json"]));
    assert_eq!(json["node_count"], 4);
    assert_eq!(json["edge_count"], 4);
    assert_eq!(json["cycle_count"], 0);
    assert_eq!(json["cycles"], serde_json::json!([]));
}

#[test]
fn stats_reports_import_cycles() {
    let dir = project(r#"{"A.X": ["B.Y"], "B.Y": ["A.X"]}"#);
    let json = json_of(modmap_cmd(dir.path()).args(["stats", "--json"]));
    assert_eq!(json["cycles"], serde_json::json!([["A.X", "B.Y"]]));
}

#[test]
fn ignored_namespaces_are_dropped() {
    let dir = project(SAMPLE);
    std::fs::create_dir_all(dir.path().join(".modmap")).expect("create .modmap");
    std::fs::write(
        dir.path().join(".modmap/config.toml"),
        "[graph]\nignore_namespaces = [\"Topology\"]\n",
    )
    .expect("write config");
    let json = json_of(modmap_cmd(dir.path()).args(["stats", "--json"]));
    assert_eq!(json["node_count"], 3);
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[test]
fn missing_data_file_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    let output = modmap_cmd(dir.path())
        .args(["stats", "--json"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(json["error"]["error_code"], "E1001");
}

#[test]
fn malformed_data_file_fails_with_code() {
    let dir = project("[1, 2, 3]");
    let output = modmap_cmd(dir.path())
        .args(["export", "--json"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(json["error"]["error_code"], "E1002");
}

#[test]
fn data_flag_points_elsewhere() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("deps.json"), SAMPLE).expect("write data");
    let json = json_of(modmap_cmd(dir.path()).args(["--data", "deps.json", "stats", "--json"]));
    assert_eq!(json["node_count"], 4);
}

#[test]
fn completions_need_no_data() {
    let dir = TempDir::new().expect("tempdir");
    modmap_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modmap"));
}
