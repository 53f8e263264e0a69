use assert_cmd::Command;
use predicates::prelude::*;

fn lyrical() -> Command {
    let mut cmd = Command::cargo_bin("lyrical-cli").unwrap();
    cmd.env("LYRICAL_ENV", "local")
        .env("LYRICAL_CONFIG_DIR", std::env::temp_dir().join("lyrical-cli-no-config"))
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn help_lists_subcommands() {
    lyrical()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("genres"));
}

#[test]
fn catalog_filters_by_genre() {
    let output = lyrical()
        .args(["catalog", "--genre", "science fiction", "--limit", "8"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total"], 2);
    assert_eq!(page["books"][0]["title"], "Project Hail Mary");
    assert_eq!(page["books"][1]["title"], "Klara and the Sun");
}

#[test]
fn genres_are_printed_one_per_line() {
    lyrical()
        .arg("genres")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Contemporary\nFamily Saga\n"));
}

#[test]
fn unknown_environment_fails() {
    lyrical()
        .env("LYRICAL_ENV", "moon")
        .arg("genres")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported environment"));
}
