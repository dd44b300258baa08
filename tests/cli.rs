use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("aimd-parser")
        .join("docs")
        .join("samples")
        .join(format!("{}.aimd", name))
}

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn validate_valid_sample_succeeds() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("validate").arg(sample_path("experiment_basic"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn validate_invalid_sample_fails_with_text_report() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("validate")
        .arg(sample_path("invalid_names"))
        .arg("--format")
        .arg("text");

    cmd.assert().failure().code(1).stdout(
        predicate::str::contains("cannot start with underscore")
            .and(predicate::str::contains("[invalid-name]"))
            .and(predicate::str::contains(">>"))
            .and(predicate::str::contains("4 problem(s) found")),
    );
}

#[test]
fn parse_prints_yaml_ast() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("parse")
        .arg(sample_path("student_table"))
        .arg("--format")
        .arg("yaml");

    cmd.assert().success().stdout(
        predicate::str::contains("shape: table").and(predicate::str::contains("name: students")),
    );
}

#[test]
fn parse_reports_first_error_with_context() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("parse").arg(sample_path("syntax_errors"));

    cmd.assert().failure().stderr(
        predicate::str::contains("Parse error: Missing value at line 1")
            .and(predicate::str::contains(">>   1 | {{var|a = }}")),
    );
}

#[test]
fn extract_prints_flat_mapping() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("extract").arg(sample_path("experiment_basic"));

    cmd.assert().success().stdout(
        predicate::str::contains("\"ref_ids\"")
            .and(predicate::str::contains("\"default_value\": \"2024-01-15\"")),
    );
}

#[test]
fn extract_rejects_text_format() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("extract")
        .arg(sample_path("experiment_basic"))
        .arg("--format")
        .arg("text");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not supported for extract"));
}

#[test]
fn tokens_text_lists_directives_and_end() {
    let doc = temp_file(".aimd", "{{var|x}} and {{cite|a, b}}");
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("tokens").arg(doc.path()).arg("-f").arg("text");

    cmd.assert().success().stdout(
        predicate::str::contains("VAR \"x\" (line 1, col 1-9)")
            .and(predicate::str::contains("CITE \"a, b\""))
            .and(predicate::str::contains("END (line 1")),
    );
}

#[test]
fn config_file_disables_custom_type_check() {
    let config = temp_file(".toml", "[validation]\ncheck_custom_types = false\n");

    let mut strict = cargo_bin_cmd!("aimd");
    strict.arg("validate").arg(sample_path("custom_types"));
    strict.assert().failure();

    let mut relaxed = cargo_bin_cmd!("aimd");
    relaxed
        .arg("--config")
        .arg(config.path())
        .arg("validate")
        .arg(sample_path("custom_types"));
    relaxed.assert().success();
}

#[test]
fn missing_config_file_is_an_error() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("validate")
        .arg(sample_path("experiment_basic"))
        .arg("--config")
        .arg("/nonexistent/aimd.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn missing_document_is_an_error() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("parse").arg("/nonexistent/doc.aimd");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn verbose_logs_pipeline_to_stderr() {
    let mut cmd = cargo_bin_cmd!("aimd");
    cmd.arg("-v").arg("validate").arg(sample_path("experiment_basic"));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("validated document"));
}
