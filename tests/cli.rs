use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const PIPELINE: &str = r#"{
  "op": [
    { "name": "camera", "algorithm": "Driver",
      "output": [{ "event": "frame", "type": "Image", "hz": 30 }] },
    { "name": "detector", "algorithm": "Yolo", "bypass_if": "SKIP_DETECTOR",
      "trigger": ["frame"], "input": ["frame"], "latest": ["pose"],
      "output": [{ "event": "obstacles" }] },
    { "name": "debug", "algorithm": "Dump", "enable_if": "WITH_DEBUG",
      "input": ["obstacles"], "output": [{ "hz": 1 }] }
  ]
}"#;

fn write_config(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("dag.json");
    fs::write(&path, text).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dagnet-viz"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("WITH_DEBUG")
        .env_remove("SKIP_DETECTOR")
        .output()
        .unwrap()
}

#[test]
fn render_to_stdout_prints_dot() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), PIPELINE);

    let output = run(&["render", "-i", config.to_str().unwrap(), "-r", "lr"]);
    assert!(output.status.success());

    let dot = String::from_utf8(output.stdout).unwrap();
    assert!(dot.starts_with("digraph DagNet {"));
    assert!(dot.contains("rankdir=\"LR\";"));
    assert!(dot.contains("* Yolo"));
    assert!(dot.contains("label=\"latest\""));
}

#[test]
fn render_writes_dot_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), PIPELINE);
    let out = dir.path().join("dag.dot");

    let output = run(&[
        "render",
        "-i",
        config.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let dot = fs::read_to_string(&out).unwrap();
    assert!(dot.contains("rankdir=\"TB\";"));
    assert!(String::from_utf8(output.stdout).unwrap().contains("Wrote"));
}

#[test]
fn inspect_counts_nodes_and_edges() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), PIPELINE);

    let output = run(&["inspect", "-i", config.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "operators: 3\nchannels:  1\noutputs:   3\nedges:     7\n"
    );
}

#[test]
fn resolve_env_drops_disabled_operators() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), PIPELINE);

    let output = run(&["inspect", "-i", config.to_str().unwrap(), "--resolve-env"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "operators: 2\nchannels:  1\noutputs:   2\nedges:     5\n"
    );
}

#[test]
fn duplicate_operator_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{ "op": [{ "name": "A", "algorithm": "x" }, { "name": "A", "algorithm": "x" }] }"#,
    );

    let output = run(&["render", "-i", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("A_x"));
}

#[test]
fn malformed_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "{ not json");

    let output = run(&["render", "-i", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("dag.json"));
}

#[test]
fn output_without_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), PIPELINE);
    let out = dir.path().join("diagram");

    let output = run(&[
        "render",
        "-i",
        config.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!out.exists());
}
