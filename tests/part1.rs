use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("-i").arg("tests/data/example.txt");

    cmd.assert().success().stdout("31");
}

#[test]
fn part1_reads_stdin_by_default() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.write_stdin("\nSabqponm\nabcryxxl\naccszExk\nacctuvwj\nabdefghi\n");

    cmd.assert().success().stdout("31");
}

#[test]
fn part1_writes_output_file() {
    let out_path = Path::new(env!("CARGO_TARGET_TMPDIR")).join("part1_answer.txt");
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("-i")
        .arg("tests/data/example.txt")
        .arg("-o")
        .arg(&out_path);

    cmd.assert().success().stdout("");
    assert_eq!(fs::read_to_string(&out_path).unwrap(), "31");
}

#[test]
fn part1_fails_on_unreachable_end() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.write_stdin("SbE\n");

    cmd.assert()
        .failure()
        .stderr(str::contains("There's no path from (0, 0) to (0, 2)"));
}

#[test]
fn part1_fails_on_missing_marker() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.write_stdin("abc\nabE\n");

    cmd.assert()
        .failure()
        .stderr(str::contains("Marker(S) not found"));
}
