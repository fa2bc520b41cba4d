//! End-to-end CLI tests, using the alphabetical canonicalizer so no external
//! tools are needed.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn classfix() -> Command {
    let mut cmd = Command::cargo_bin("classfix").expect("classfix binary");
    cmd.args(["--canonicalizer", "alphabetical"]);
    cmd
}

fn temp_dir_with(files: &[(&str, &str)]) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    for (name, contents) in files {
        fs::write(td.path().join(name), contents).expect("write fixture");
    }
    td
}

#[test]
fn sorts_stdin_to_stdout() {
    let td = temp_dir_with(&[]);
    classfix()
        .current_dir(td.path())
        .write_stdin(r#"<div class="pt-1 pb-2">x</div>"#)
        .assert()
        .success()
        .stdout(r#"<div class="pb-2 pt-1">x</div>"#);
}

#[test]
fn sorted_document_is_printed_unchanged() {
    let td = temp_dir_with(&[("a.html.erb", "<p class=\"a b\"><%= x %></p>\n")]);
    classfix()
        .current_dir(td.path())
        .arg("a.html.erb")
        .assert()
        .success()
        .stdout("<p class=\"a b\"><%= x %></p>\n");
}

#[test]
fn write_rewrites_files_in_place() {
    let td = temp_dir_with(&[
        ("a.html.erb", "<p class=\"b a\">x</p>\n"),
        ("b.html.erb", "<%= link_to \"x\", y, class: \"d c\" %>\n"),
    ]);
    classfix()
        .current_dir(td.path())
        .args(["--write", "a.html.erb", "b.html.erb"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(td.path().join("a.html.erb")).expect("read"),
        "<p class=\"a b\">x</p>\n"
    );
    assert_eq!(
        fs::read_to_string(td.path().join("b.html.erb")).expect("read"),
        "<%= link_to \"x\", y, class: \"c d\" %>\n"
    );
    assert!(!td.path().join("a.html.erb.classfix.bak").exists());
}

#[test]
fn write_with_stdin_is_rejected() {
    let td = temp_dir_with(&[]);
    classfix()
        .current_dir(td.path())
        .arg("--write")
        .write_stdin("<p class=\"b a\"></p>")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot use --write when reading from stdin"));
}

#[test]
fn several_files_without_mode_are_rejected() {
    let td = temp_dir_with(&[("a.erb", ""), ("b.erb", "")]);
    classfix()
        .current_dir(td.path())
        .args(["a.erb", "b.erb"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot process multiple files"));
}

#[test]
fn write_conflicts_with_check() {
    classfix()
        .args(["--write", "--check", "a.erb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn check_reports_positions_and_fails() {
    let td = temp_dir_with(&[
        ("a.html.erb", "<div>\n  <p class=\"b a\">x</p>\n</div>\n"),
        ("ok.html.erb", "<p class=\"a b\">x</p>\n"),
    ]);
    classfix()
        .current_dir(td.path())
        .args(["--check", "a.html.erb", "ok.html.erb"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.html.erb:2:13: \"b a\" -> \"a b\""))
        .stdout(predicate::str::contains("ok.html.erb").not());

    assert_eq!(
        fs::read_to_string(td.path().join("a.html.erb")).expect("read"),
        "<div>\n  <p class=\"b a\">x</p>\n</div>\n"
    );
}

#[test]
fn check_passes_on_sorted_files() {
    let td = temp_dir_with(&[("ok.html.erb", "<p class=\"a b\">x</p>\n")]);
    classfix()
        .current_dir(td.path())
        .args(["--check", "ok.html.erb"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn check_json_lists_every_document() {
    let td = temp_dir_with(&[("a.html.erb", "<p class=\"b a\">x</p>\n")]);
    let output = classfix()
        .current_dir(td.path())
        .args(["--check", "--format", "json", "a.html.erb"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(reports[0]["schema"], "classfix.check.v1");
    assert_eq!(reports[0]["source"], "a.html.erb");
    assert_eq!(reports[0]["changed"], true);
    assert_eq!(reports[0]["spans"][0]["after"], "a b");
}

#[test]
fn diff_prints_a_patch() {
    let td = temp_dir_with(&[("a.html.erb", "<p class=\"b a\">x</p>\n")]);
    classfix()
        .current_dir(td.path())
        .args(["--diff", "a.html.erb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- a/a.html.erb"))
        .stdout(predicate::str::contains("-<p class=\"b a\">x</p>"))
        .stdout(predicate::str::contains("+<p class=\"a b\">x</p>"));
}

#[test]
fn missing_file_fails_without_touching_others() {
    let td = temp_dir_with(&[("a.html.erb", "<p class=\"b a\">x</p>\n")]);
    classfix()
        .current_dir(td.path())
        .args(["--write", "missing.html.erb", "a.html.erb"])
        .assert()
        .code(1);
    assert_eq!(
        fs::read_to_string(td.path().join("a.html.erb")).expect("read"),
        "<p class=\"a b\">x</p>\n"
    );
}

#[test]
fn config_file_registers_methods_and_backups() {
    let td = temp_dir_with(&[
        (
            "classfix.toml",
            "[classes]\nmethods = [\"helper\"]\n\n[backups]\nenabled = true\n",
        ),
        ("a.html.erb", "<% helper(\"z-10 flex\") %>\n"),
    ]);
    classfix()
        .current_dir(td.path())
        .args(["--write", "a.html.erb"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(td.path().join("a.html.erb")).expect("read"),
        "<% helper(\"flex z-10\") %>\n"
    );
    assert_eq!(
        fs::read_to_string(td.path().join("a.html.erb.classfix.bak")).expect("read backup"),
        "<% helper(\"z-10 flex\") %>\n"
    );
}

#[test]
fn class_method_flag_extends_recognition() {
    let td = temp_dir_with(&[]);
    classfix()
        .current_dir(td.path())
        .args(["--class-method", "cx"])
        .write_stdin("<%= cx(\"b a\") %>")
        .assert()
        .success()
        .stdout("<%= cx(\"a b\") %>");
}

#[test]
fn invalid_config_is_an_error() {
    let td = temp_dir_with(&[("classfix.toml", "[canonicalizer]\nkind = \"nope\"\n")]);
    classfix()
        .current_dir(td.path())
        .write_stdin("")
        .assert()
        .failure()
        .code(1);
}
