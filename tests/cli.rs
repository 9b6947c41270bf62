use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// Nothing listens on the discard port, so any request would fail fast.
const UNREACHABLE: &str = "http://127.0.0.1:9/api/v1";

fn locale_sync() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("locale-sync");
    cmd.env("TWOSKY_URL", UNREACHABLE)
        .env("ONESKY_URL", UNREACHABLE)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    locale_sync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fastlane-batch"))
        .stdout(predicate::str::contains("onesky-fastlane"));
}

#[test]
fn missing_output_is_a_usage_error() {
    let temp = tempfile::tempdir().unwrap();

    locale_sync()
        .current_dir(temp.path())
        .args(["download", "-l", "de", "-p", "android"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--output"));

    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

/// Drops each flag of `full` in turn and expects a usage error with no
/// files created.
fn assert_each_flag_required(subcommand: &str, full: &[(&str, &str)]) {
    for skip in 0..full.len() {
        let temp = tempfile::tempdir().unwrap();
        let mut cmd = locale_sync();
        cmd.current_dir(temp.path()).arg(subcommand);
        for (i, (flag, value)) in full.iter().enumerate() {
            if i != skip {
                cmd.args([flag, value]);
            }
        }
        cmd.assert().code(2);
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}

#[test]
fn every_required_flag_of_fastlane_json_is_enforced() {
    assert_each_flag_required(
        "fastlane-json",
        &[
            ("-l", "sk"),
            ("-p", "cb"),
            ("-i", "strings.json"),
            ("-o", "out"),
            ("-c", "cache.json"),
        ],
    );
}

#[test]
fn every_required_flag_of_fastlane_xlsx_is_enforced() {
    assert_each_flag_required(
        "fastlane-xlsx",
        &[
            ("-l", "de"),
            ("-p", "cb"),
            ("-i", "descriptions.xlsx"),
            ("-o", "out"),
            ("-c", "cache.xlsx"),
        ],
    );
}

#[test]
fn every_required_flag_of_fastlane_batch_is_enforced() {
    assert_each_flag_required(
        "fastlane-batch",
        &[
            ("-i", "descriptions.xlsx"),
            ("-o", "metadata"),
            ("-c", "cache.xlsx"),
            ("--config", "config.json"),
        ],
    );
}

#[test]
fn every_required_flag_of_upload_is_enforced() {
    assert_each_flag_required("upload", &[("-f", "strings.xml"), ("-l", "en")]);
}

#[test]
fn onesky_requires_both_keys() {
    locale_sync()
        .args(["onesky-fastlane", "-a", "pub", "-l", "ru", "-p", "1", "-o", "out"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--secretkey"));
}

#[test]
fn failed_download_exits_non_zero_without_output() {
    let temp = tempfile::tempdir().unwrap();
    let output = temp.path().join("strings.xml");

    locale_sync()
        .args(["--timeout", "5", "download", "-l", "de", "-p", "android", "-o"])
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("!!!"));

    assert!(!output.exists());
}

#[test]
fn batch_with_missing_config_is_an_io_error() {
    let temp = tempfile::tempdir().unwrap();

    locale_sync()
        .current_dir(temp.path())
        .args([
            "fastlane-batch",
            "-i",
            "descriptions.xlsx",
            "-o",
            "metadata",
            "-c",
            "cache.xlsx",
            "--config",
            "missing.json",
        ])
        .assert()
        .code(74);

    assert!(!temp.path().join("metadata").exists());
}
