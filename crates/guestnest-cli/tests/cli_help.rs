use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("guestnest")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("--route"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("guestnest")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("guestnest")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_browser_refuses_non_terminal_stdout() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "allow_localhost_in_release = true\n",
    )
    .unwrap();

    cargo_bin_cmd!("guestnest")
        .env("GUESTNEST_HOME", dir.path())
        .env_remove("GUESTNEST_BACKEND_URL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
