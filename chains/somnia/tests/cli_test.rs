use std::fs;
use std::process::{Command, Output};

fn run_in(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_somnia-project"))
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to launch binary")
}

#[test]
fn empty_key_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("private_keys.txt"), "\n# no keys yet\n").unwrap();

    let output = run_in(dir.path(), &["--max-start-delay", "0"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());
    assert!(stdout.contains("No private keys found"), "{stdout}");
    assert!(!stdout.contains("Starting worker pool"));
}

#[test]
fn missing_key_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path(), &["--keys", "absent.txt"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());
    assert!(!stdout.contains("Starting worker pool"));
}

#[test]
fn zero_workers_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("private_keys.txt"),
        "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &["--workers", "0"]);
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Starting worker pool"));
}
