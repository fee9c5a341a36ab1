use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

const DOCUMENT: &str = "docclass article\n\nimport amsmath\n\ndocument\nHello";
const DOCUMENT_LATEX: &str =
    "\\documentclass{article}\n\\usepackage{amsmath}\n\\begin{document}\nHello\n\\end{document}\n";

fn write_input(dir: &tempfile::TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).unwrap();
    path
}

#[test]
fn compile_writes_tex_next_to_input() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(&dir, "main.ves", DOCUMENT);

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args(["compile", input.to_str().unwrap()]);
    cmd.assert().success();

    let got = std::fs::read_to_string(dir.path().join("main.tex")).unwrap();
    similar_asserts::assert_eq!(got, DOCUMENT_LATEX);
}

#[test]
fn compile_to_explicit_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(&dir, "main.ves", DOCUMENT);
    let output = dir.path().join("out.tex");

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args([
        "compile",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    cmd.assert().success();

    let got = std::fs::read_to_string(output).unwrap();
    similar_asserts::assert_eq!(got, DOCUMENT_LATEX);
    assert!(!dir.path().join("main.tex").exists());
}

#[test]
fn compile_to_stdout() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(&dir, "main.ves", DOCUMENT);

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args(["compile", "--stdout", input.to_str().unwrap()]);
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    similar_asserts::assert_eq!(String::from_utf8(output.stdout).unwrap(), DOCUMENT_LATEX);
    assert!(!dir.path().join("main.tex").exists());
}

#[test]
fn compile_refuses_to_overwrite_input() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(&dir, "main.tex", DOCUMENT);

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args(["compile", input.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is the same as the input path"));
    similar_asserts::assert_eq!(std::fs::read_to_string(input).unwrap(), DOCUMENT);
}

#[test]
fn compile_error_is_pretty_printed() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(&dir, "main.ves", "document\nendenv");

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args(["--no-color", "compile", input.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "error[E010A]: `endenv` is used without a matching `begenv`",
        ))
        .stderr(predicate::str::contains("main.ves:2:1"));
    assert!(!dir.path().join("main.tex").exists());
}

#[test]
fn missing_input_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("missing.ves");

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args(["compile", input.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn check_accepts_valid_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(&dir, "main.ves", DOCUMENT);

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args(["check", input.to_str().unwrap()]);
    cmd.assert().success().stdout(predicate::str::is_empty());
    assert!(!dir.path().join("main.tex").exists());
}

#[test]
fn check_reports_unclosed_environment() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(&dir, "main.ves", "document\nbegenv center\nHello");

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args(["check", "--no-color", input.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error[E0108]: `begenv` is not closed"));
}

#[test]
fn ast_prints_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_input(&dir, "main.ves", "document\nHello");

    let mut cmd = Command::cargo_bin("vesti").unwrap();
    cmd.args(["ast", input.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"DocumentStart\""))
        .stdout(predicate::str::contains("\"MainText\": \"Hello\""))
        .stdout(predicate::str::contains("\"DocumentEnd\""));
}
