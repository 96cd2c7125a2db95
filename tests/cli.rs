use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn spellfix(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("spellfix").unwrap();
    cmd.current_dir(dir).arg("--no-color");
    cmd
}

#[test]
fn test_check_reports_and_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "Title\n\nI absoltely agree `absoltely`.\n").unwrap();

    spellfix(dir.path())
        .arg("notes.md")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("3:3 absoltely → absolutely"))
        .stdout(predicate::str::contains("1 misspelling found in 1 file"));

    // Checking never rewrites.
    let content = fs::read_to_string(dir.path().join("notes.md")).unwrap();
    assert!(content.contains("I absoltely agree"));
}

#[test]
fn test_no_fail_exit_code() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.md"), "wich\n").unwrap();

    spellfix(dir.path()).args(["--no-fail", "a.md"]).assert().success();
}

#[test]
fn test_fix_rewrites_prose_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.md");
    fs::write(&path, "---\nkey: wich\n---\nwich and #wich\n").unwrap();

    spellfix(dir.path())
        .args(["--fix", "a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 correction applied"));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "---\nkey: wich\n---\nwhich and #wich\n"
    );
}

#[test]
fn test_ignore_words_flag() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.md"), "wich alot\n").unwrap();

    spellfix(dir.path())
        .args(["--ignore-words", "wich, alot", "a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No misspellings found"));
}

#[test]
fn test_local_config_and_extra_dictionary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words.txt"), "teh->the\n").unwrap();
    fs::write(
        dir.path().join(".spellfix.toml"),
        "ignore_words = [\"wich\"]\ndictionaries = [\"words.txt\"]\n",
    )
    .unwrap();
    fs::write(dir.path().join("a.md"), "teh wich\n").unwrap();

    spellfix(dir.path())
        .args(["--fix", "a.md"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(dir.path().join("a.md")).unwrap(), "the wich\n");
}

#[test]
fn test_directories_are_walked() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/one.md"), "wich\n").unwrap();
    fs::write(dir.path().join("docs/skip.txt"), "wich\n").unwrap();

    spellfix(dir.path())
        .args(["-o", "json", "docs"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"files_checked\": 1"))
        .stdout(predicate::str::contains("one.md"));
}

#[test]
fn test_stdin_fix_writes_document_to_stdout() {
    let dir = tempdir().unwrap();

    spellfix(dir.path())
        .args(["--fix", "-"])
        .write_stdin("Accodringly, `accodringly`\n")
        .assert()
        .success()
        .stdout("Accordingly, `accodringly`\n");
}

#[test]
fn test_protect_flag_replaces_defaults() {
    let dir = tempdir().unwrap();

    spellfix(dir.path())
        .args(["--fix", "--protect", "tag", "-"])
        .write_stdin("`wich` #wich\n")
        .assert()
        .success()
        .stdout("`which` #wich\n");
}

#[test]
fn test_unknown_protect_kind_is_rejected() {
    let dir = tempdir().unwrap();

    spellfix(dir.path())
        .args(["--protect", "html", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown region kind"));
}

#[test]
fn test_lookup() {
    let dir = tempdir().unwrap();

    spellfix(dir.path())
        .args(["lookup", "Recieve", "fine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recieve → receive"))
        .stdout(predicate::str::contains("fine: not a known misspelling"));
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempdir().unwrap();

    spellfix(dir.path())
        .arg("missing.md")
        .assert()
        .success()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_fix_counts_only_rewritten_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.md"), "wich\n").unwrap();
    fs::write(dir.path().join("b.md"), "fine\n").unwrap();

    spellfix(dir.path())
        .args(["--fix", "a.md", "b.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.md (fixed)"))
        .stdout(predicate::str::contains("1 correction applied to 1 file"));

    let output = spellfix(dir.path())
        .args(["--fix", "--format", "json", "a.md", "b.md"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["files_checked"], 2);
    assert_eq!(value["files_fixed"], 0);
}
