use assert_cmd::Command;
use predicates::str::{contains, diff};

fn latch() -> Command {
    Command::cargo_bin("latch").unwrap()
}

#[test]
fn runs_without_arguments() {
    latch().assert().success();
}

#[test]
fn prints_eight() {
    latch()
        .args(["run", "tests/files/print8.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("8\n"));
}

#[test]
fn multiplies_eight_by_nine() {
    latch()
        .args(["run", "tests/files/mult.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("72\n"));
}

#[test]
fn round_trips_a_value_through_the_stack() {
    latch()
        .args(["run", "tests/files/stack.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("42\n"));
}

#[test]
fn calls_and_returns_from_a_subroutine() {
    latch()
        .args(["run", "tests/files/call.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("9\n"));
}

#[test]
fn takes_the_equal_branch() {
    latch()
        .args(["run", "tests/files/jeq.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("1\n"));
}

#[test]
fn reports_unrecognized_opcode_and_keeps_running() {
    latch()
        .args(["run", "tests/files/unknown.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("255 is not recognized\n"));
}

#[test]
fn traces_to_stderr_only() {
    latch()
        .args(["run", "tests/files/print8.ls8", "--minimal", "--trace"])
        .assert()
        .success()
        .stdout(diff("8\n"))
        .stderr(contains("TRACE: 00 | 82 00 08 |"));
}

#[test]
fn rejects_a_malformed_literal() {
    latch()
        .args(["run", "tests/files/badlit.ls8", "--minimal"])
        .assert()
        .failure()
        .stderr(contains("instruction literal"));
}

#[test]
fn checks_without_running() {
    latch()
        .args(["check", "tests/files/mult.ls8"])
        .assert()
        .success()
        .stdout(contains("10 instruction bytes"));
}

#[test]
fn dumps_the_loaded_image() {
    latch()
        .args(["dump", "tests/files/print8.ls8"])
        .assert()
        .success()
        .stdout(contains("0x00  10000010  0x82  LDI"))
        .stdout(contains("0x05  00000001  0x01  HLT"));
}

#[test]
fn bare_path_runs_the_program() {
    latch()
        .arg("tests/files/print8.ls8")
        .assert()
        .success()
        .stdout(contains("8\n"));
}
