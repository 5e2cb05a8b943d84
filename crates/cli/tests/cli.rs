use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn powerpointless() -> Command {
    Command::cargo_bin("powerpointless").unwrap()
}

/// Build a deck from `text` with the built-in template and return its path.
fn create_deck(dir: &TempDir, text: &str) -> std::path::PathBuf {
    let input = dir.path().join("lines.txt");
    let output = dir.path().join("deck.pptx");
    fs::write(&input, text).unwrap();

    powerpointless()
        .arg("create-subtitles")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    output
}

#[test]
fn test_create_then_extract_to_stdout() {
    let dir = TempDir::new().unwrap();
    let deck = create_deck(&dir, "Amazing grace\nHow sweet the sound\r\nThat saved a wretch\n");

    powerpointless()
        .arg("extract-subtitles")
        .arg("-i")
        .arg(&deck)
        .arg("-o")
        .arg("-")
        .assert()
        .success()
        .stdout("Amazing grace\nHow sweet the sound\nThat saved a wretch\n");
}

#[test]
fn test_extract_to_file() {
    let dir = TempDir::new().unwrap();
    let deck = create_deck(&dir, "one\ntwo");
    let output = dir.path().join("out.txt");

    powerpointless()
        .args(["extract-subtitles", "-i"])
        .arg(&deck)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "one\ntwo\n");
}

#[test]
fn test_create_from_stdin_with_template() {
    let dir = TempDir::new().unwrap();
    let template = create_deck(&dir, "intro");
    let output = dir.path().join("more.pptx");

    powerpointless()
        .arg("create-subtitles")
        .arg("-t")
        .arg(&template)
        .args(["-i", "-", "-o"])
        .arg(&output)
        .write_stdin("verse\nchorus\n")
        .assert()
        .success();

    powerpointless()
        .arg("extract-subtitles")
        .arg("-i")
        .arg(&output)
        .args(["-o", "-"])
        .assert()
        .success()
        .stdout("intro\nverse\nchorus\n");
}

#[test]
fn test_deck_round_trips_through_pipes() {
    let created = powerpointless()
        .args(["create-subtitles", "-i", "-", "-o", "-"])
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert!(created.starts_with(b"PK\x03\x04"));

    powerpointless()
        .args(["extract-subtitles", "-i", "-", "-o", "-"])
        .write_stdin(created)
        .assert()
        .success()
        .stdout("a\nb\n");
}

#[test]
fn test_empty_input_gives_empty_deck() {
    let dir = TempDir::new().unwrap();
    let deck = create_deck(&dir, "");

    powerpointless()
        .arg("extract-subtitles")
        .arg("-i")
        .arg(&deck)
        .args(["-o", "-"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_extract_rejects_non_presentation() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "just some text").unwrap();

    powerpointless()
        .arg("extract-subtitles")
        .arg("-i")
        .arg(&input)
        .args(["-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Couldn't open file as a powerpoint"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    powerpointless()
        .arg("create-subtitles")
        .arg("-i")
        .arg(dir.path().join("missing.txt"))
        .arg("-o")
        .arg(dir.path().join("out.pptx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_two_stdin_arguments_are_rejected() {
    powerpointless()
        .args(["create-subtitles", "-t", "-", "-i", "-", "-o", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin"));
}

#[test]
fn test_help_lists_subcommands() {
    powerpointless()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-subtitles"))
        .stdout(predicate::str::contains("extract-subtitles"));
}
