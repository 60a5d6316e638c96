mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use common::{read_dimensions, write_test_image};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_missing_input_is_fatal() {
    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg("no-such-path");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Input path not found"));
}

#[test]
fn test_invalid_quality_exits_one() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("test.jpg");
    write_test_image(input.path(), 100, 100);

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(input.path()).args(["--quality", "0"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid quality"));
}

#[test]
fn test_invalid_max_size_exits_one() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("test.jpg");
    write_test_image(input.path(), 100, 100);

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(input.path()).args(["--max-size", "5"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid max edge"));
}

#[test]
fn test_single_jpeg_resized_to_exact_dimensions() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("photo.jpg");
    write_test_image(input.path(), 1000, 500);

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(input.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(542x271)"));

    assert_eq!(read_dimensions(input.path()), (542, 271));
}

#[test]
fn test_single_small_file_is_left_alone() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("small.png");
    write_test_image(input.path(), 200, 100);
    let before = fs::read(input.path()).unwrap();

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(input.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No resize needed"));

    assert_eq!(fs::read(input.path()).unwrap(), before);
}

#[test]
fn test_single_file_with_output_directory() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("photo.jpg");
    let outdir = temp.child("resized");
    write_test_image(input.path(), 1000, 500);

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(input.path()).arg("-o").arg(outdir.path());
    cmd.assert().success();

    assert_eq!(read_dimensions(&outdir.path().join("photo.jpg")), (542, 271));
    // The original stays at full size.
    assert_eq!(read_dimensions(input.path()), (1000, 500));
}

#[test]
fn test_directory_tallies_resized_and_skipped() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_test_image(temp.child("big1.jpg").path(), 1000, 500);
    write_test_image(temp.child("big2.png").path(), 600, 1200);
    write_test_image(temp.child("small.jpg").path(), 300, 200);

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Resized: 2"))
        .stdout(predicate::str::contains("Skipped: 1"))
        .stdout(predicate::str::contains("Failed: 0"));

    assert_eq!(read_dimensions(temp.child("big1.jpg").path()), (542, 271));
    assert_eq!(read_dimensions(temp.child("small.jpg").path()), (300, 200));
}

#[test]
fn test_second_run_is_a_no_op() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_test_image(temp.child("big1.jpg").path(), 1000, 500);
    write_test_image(temp.child("big2.png").path(), 800, 1600);

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Resized: 2"));

    // Everything already fits now, so a second pass changes nothing.
    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Resized: 0"))
        .stdout(predicate::str::contains("Skipped: 2"));
}

#[test]
fn test_per_file_failure_keeps_exit_zero() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_test_image(temp.child("good.jpg").path(), 1000, 500);
    temp.child("bad.jpg").write_binary(b"garbage").unwrap();

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Resized: 1"))
        .stdout(predicate::str::contains("Failed: 1"));
}

#[test]
fn test_recursive_flag_controls_depth() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("nested").create_dir_all().unwrap();
    let nested = temp.child("nested/deep.jpg");
    write_test_image(nested.path(), 1000, 500);

    // Without -r the nested file is untouched.
    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(temp.path());
    cmd.assert().success();
    assert_eq!(read_dimensions(nested.path()), (1000, 500));

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(temp.path()).arg("-r");
    cmd.assert().success();
    assert_eq!(read_dimensions(nested.path()), (542, 271));
}

#[test]
fn test_rename_respects_preexisting_sequential_name() {
    let temp = assert_fs::TempDir::new().unwrap();
    let first = temp.child("00001.png");
    write_test_image(first.path(), 300, 200);
    write_test_image(temp.child("photo.png").path(), 200, 300);
    let first_before = fs::read(first.path()).unwrap();

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(temp.path()).arg("--rename");
    cmd.assert().success();

    // 00001.png keeps its slot untouched; the newcomer lands on 00002.png.
    assert_eq!(fs::read(first.path()).unwrap(), first_before);
    temp.child("00002.png").assert(predicate::path::exists());
    temp.child("photo.png").assert(predicate::path::missing());
}

#[test]
fn test_rename_into_output_directory_copies_originals() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("input");
    let output = temp.child("output");
    input.create_dir_all().unwrap();
    write_test_image(input.child("small.jpg").path(), 300, 200);

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(input.path())
        .arg("--rename")
        .arg("-o")
        .arg(output.path());
    cmd.assert().success();

    output.child("00001.jpg").assert(predicate::path::exists());
    input.child("small.jpg").assert(predicate::path::exists());
}

#[test]
fn test_dry_run_reports_and_writes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let big = temp.child("big.png");
    write_test_image(big.path(), 1000, 500);
    let before = fs::read(big.path()).unwrap();

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(temp.path()).arg("--dry-run");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Would resize: 1"))
        .stdout(predicate::str::contains("(542x271)"));

    assert_eq!(fs::read(big.path()).unwrap(), before);
}

#[test]
fn test_dry_run_single_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("big.jpg");
    write_test_image(input.path(), 1000, 500);
    let before = fs::read(input.path()).unwrap();

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(input.path()).arg("--dry-run");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Would resize"));

    assert_eq!(fs::read(input.path()).unwrap(), before);
}

#[test]
fn test_verbose_echoes_configuration() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("small.jpg");
    write_test_image(input.path(), 100, 100);

    let mut cmd = Command::cargo_bin("img-fit").unwrap();
    cmd.arg(input.path()).arg("-v").args(["--max-size", "600"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Max edge: 600px"))
        .stdout(predicate::str::contains("Quality: 100"));
}
