use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn anchors_prints_the_log() {
    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("anchors").arg(fixture_path("tank.yaml"));

    cmd.assert().success().stdout(
        predicate::str::starts_with("@0 ref=0 same [bottom]\n@0 ref=0 indent [class]\n")
            .and(predicate::str::contains("@14 ref=13 same [newline]"))
            .and(predicate::str::ends_with("@58 ref=0 same [#] sink\n")),
    );
}

#[test]
fn anchors_as_json() {
    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("anchors")
        .arg(fixture_path("tank.json"))
        .arg("--json");

    cmd.assert().success().stdout(
        predicate::str::contains("\"affects_own_line\": true")
            .and(predicate::str::contains("\"section\": \"class\"")),
    );
}

#[test]
fn query_looks_up_anchors_and_sinks() {
    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("query")
        .arg(fixture_path("tank.yaml"))
        .args(["--at", "40", "45"]);
    cmd.assert().success().stdout(
        "40: @39 ref=13 same [newline]\n45: @44 ref=43 same [newline]\n",
    );

    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("query")
        .arg(fixture_path("tank.yaml"))
        .args(["--at", "59", "--sink"]);
    cmd.assert()
        .success()
        .stdout("59: @58 ref=0 same [#] sink\n");
}

#[test]
fn newline_after_statement_returns_to_body() {
    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("newline")
        .arg(fixture_path("tank.mo"))
        .arg("--events")
        .arg(fixture_path("tank.yaml"))
        .args(["--offset", "40"]);

    cmd.assert().success().stdout(predicate::str::contains(
        r#""text":"\n  ""#,
    ));
}

#[test]
fn newline_after_header_closes_block() {
    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("newline")
        .arg(fixture_path("tank.mo"))
        .arg("--events")
        .arg(fixture_path("tank.yaml"))
        .args(["--offset", "10", "--apply"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("model Tank\n  \nend Tank;\n  Real level("));
}

#[test]
fn config_file_and_indent_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("mo-indent.toml");
    fs::write(&config, "[auto_edit]\nclose_blocks = false\n").unwrap();

    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("--config")
        .arg(&config)
        .args(["--indent", "\t"])
        .arg("newline")
        .arg(fixture_path("tank.mo"))
        .arg("--events")
        .arg(fixture_path("tank.yaml"))
        .args(["--offset", "10"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""text":"\n\t""#));
}

#[test]
fn missing_script_fails() {
    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("anchors").arg(fixture_path("missing.yaml"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn unknown_script_format_fails() {
    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("anchors").arg(fixture_path("tank.mo"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown script format"));
}

#[test]
fn convert_rewrites_yaml_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("tank.json");

    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("convert").arg(fixture_path("tank.yaml")).arg(&output);
    cmd.assert().success();

    let written = fs::read_to_string(&output).unwrap();
    let events: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(events[0]["event"], "begin_section");
    assert_eq!(events[5]["event"], "add_sink");
    assert_eq!(events[5]["offset"], 58);

    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("anchors").arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("@58 ref=0 same [#] sink\n"));
}

#[test]
fn convert_rejects_unknown_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("tank.txt");

    let mut cmd = cargo_bin_cmd!("moindent");
    cmd.arg("convert").arg(fixture_path("tank.yaml")).arg(&output);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown script format"));
    assert!(!output.exists());
}
