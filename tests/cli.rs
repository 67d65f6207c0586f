use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn bin() -> Command {
    Command::cargo_bin("passenger-flights").unwrap()
}

#[test]
fn prints_top_passenger() {
    let file = csv_file(
        "UES9151GS5,SQU6245R,DEN,FRA,1420564460,1049\n\
         DAZ3029XA0,XXQ4064B,JFK,FRA,1420563917,802\n\
         UES9151GS5,XXQ4064B,JFK,FRA,1420563917,802\n\
         EZC9678QI6,SOH3431A,ORD,MIA,1420563933,250\n\
         UES9151GS5,SOH3431A,ORD,MIA,1420563933,250\n",
    );

    bin()
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            "Passenger with the highest number of flights: UES9151GS5\n\
             Number of flights: 3\n",
        );
}

#[test]
fn sequential_flag_gives_same_answer() {
    let file = csv_file("A\nB\nA\nC\nB\nA\n");

    bin()
        .arg(file.path())
        .args(["--sequential", "--partitions", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of flights: 3"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    bin()
        .arg(dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn empty_input_fails_without_result() {
    let file = csv_file("");

    bin()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no passenger records"));
}

#[test]
fn zero_partitions_fails() {
    let file = csv_file("A\n");

    bin()
        .arg(file.path())
        .args(["--partitions", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("partitions must be at least 1"));
}

#[test]
fn blank_line_fails_with_its_line_number() {
    let file = csv_file("A,F1\n\nA,F2\n");

    bin()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed record at line 2"));
}
