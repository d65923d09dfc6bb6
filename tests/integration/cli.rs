use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Writes `contents` to a file named after the calling test.
fn fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("collsearch-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("write fixture");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_collsearch"))
        .args(args)
        .output()
        .expect("run collsearch")
}

#[test]
fn prints_one_line_per_match() {
    let path = fixture("matches.txt", "The CAT sat on the cat mat");
    let output = run(&["--strength=primary", "cat", path.to_str().unwrap()]);
    fs::remove_file(&path).ok();

    assert!(
        output.status.success(),
        "collsearch failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "4-7 CAT\n19-22 cat\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("matches=2 bytes=26"),
        "expected statistics line, got: {stderr}"
    );
}

#[test]
fn backward_lists_matches_from_the_end() {
    let path = fixture("backward.txt", "ab ab ab");
    let output = run(&["--backward", "ab", path.to_str().unwrap()]);
    fs::remove_file(&path).ok();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "6-8 ab\n3-5 ab\n0-2 ab\n");
}

#[test]
fn config_file_supplies_search_options() {
    let text = fixture("config-text.txt", "aaaa");
    let config = fixture("config.json", r#"{"overlap": true}"#);
    let flag = format!("--config={}", config.to_str().unwrap());
    let output = run(&[flag.as_str(), "aa", text.to_str().unwrap()]);
    fs::remove_file(&text).ok();
    fs::remove_file(&config).ok();

    assert!(
        output.status.success(),
        "collsearch failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0-2 aa\n1-3 aa\n2-4 aa\n");
}

#[test]
fn german_locale_matches_sharp_s() {
    let path = fixture("german.txt", "Die Stra\u{df}e");
    let output = run(&["--locale=de", "STRASSE", path.to_str().unwrap()]);
    fs::remove_file(&path).ok();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "4-11 Stra\u{df}e\n");
}

#[test]
fn no_match_still_succeeds() {
    let path = fixture("nomatch.txt", "nothing here");
    let output = run(&["zebra", path.to_str().unwrap()]);
    fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("matches=0"));
}

#[test]
fn missing_input_file_exits_with_one() {
    let path = std::env::temp_dir().join(format!(
        "collsearch-{}-absent.txt",
        std::process::id()
    ));
    let output = run(&["cat", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read"));
}

#[test]
fn unknown_flag_exits_with_two() {
    let output = run(&["--frobnicate", "cat", "whatever.txt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown flag: --frobnicate"));
}

#[test]
fn invalid_strength_exits_with_two() {
    let output = run(&["--strength=loud", "cat", "whatever.txt"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid --strength value: loud"), "{stderr}");
}

#[test]
fn missing_arguments_exit_with_two() {
    let output = run(&["cat"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn help_exits_successfully() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage:"));
}
