//! Binary-level tests for the `analyze` and `init` commands.

mod common;

use assert_cmd::Command;
use common::{create_tree, write_file, DENSE_PYTHON};
use qualmap::ProjectOutcome;

const NO_EXCLUDES: &str = "exclude_patterns = []\n";

fn qualmap() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qualmap"));
    cmd.env_remove("RUST_LOG").env_remove("QUALMAP_JOBS");
    cmd
}

#[test]
fn test_analyze_json_report() {
    let temp = create_tree(&[("src/app.py", DENSE_PYTHON), ("notes.txt", "ignored\n")]);
    let config = write_file(temp.path(), "config/qualmap.toml", NO_EXCLUDES);

    let output = qualmap()
        .arg("analyze")
        .arg(temp.path().join("src"))
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to run qualmap");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let project: ProjectOutcome =
        serde_json::from_slice(&output.stdout).expect("stdout is a JSON report");
    assert_eq!(project.total_files, 1);
    assert_eq!(project.total_lines, 10);
    assert!(project.metrics.contains_key("comment_ratio"));
    assert!(project.overall_score > 0.0);
}

#[test]
fn test_analyze_writes_output_file() {
    let temp = create_tree(&[("main.go", "package main\n\nfunc main() {\n}\n")]);
    let config = write_file(temp.path(), "qualmap.toml", NO_EXCLUDES);
    let report = temp.path().join("report.json");

    qualmap()
        .arg("analyze")
        .arg(temp.path())
        .arg("-c")
        .arg(&config)
        .arg("-f")
        .arg("json")
        .arg("-o")
        .arg(&report)
        .arg("--no-parallel")
        .assert()
        .success();

    let content = std::fs::read_to_string(&report).unwrap();
    let project: ProjectOutcome = serde_json::from_str(&content).unwrap();
    assert_eq!(project.total_files, 1);
}

#[test]
fn test_analyze_terminal_summary() {
    let temp = create_tree(&[("app.py", DENSE_PYTHON)]);
    let config = write_file(temp.path(), "qualmap.toml", NO_EXCLUDES);

    let output = qualmap()
        .arg("analyze")
        .arg(temp.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("app.py"), "{stdout}");
    assert!(stdout.contains("Comment ratio too low"), "{stdout}");
}

#[test]
fn test_analyze_missing_path_fails() {
    let temp = create_tree(&[]);

    let output = qualmap()
        .arg("analyze")
        .arg(temp.path().join("missing"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Path not found"), "{stderr}");
}

#[test]
fn test_analyze_rejects_malformed_explicit_config() {
    let temp = create_tree(&[("app.py", DENSE_PYTHON)]);
    let config = write_file(temp.path(), "broken.toml", "weights = [not toml");

    qualmap()
        .arg("analyze")
        .arg(temp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure();
}

#[test]
fn test_init_then_refuse_overwrite() {
    let temp = create_tree(&[]);

    qualmap().arg("init").arg(temp.path()).assert().success();
    let written = temp.path().join(".qualmap.toml");
    assert!(written.exists());

    qualmap().arg("init").arg(temp.path()).assert().failure();
    qualmap()
        .arg("init")
        .arg(temp.path())
        .arg("--force")
        .assert()
        .success();
}
