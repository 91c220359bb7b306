mod common;

use common::cli::{TktWorkspace, run_tkt, tkt_cmd};
use predicates::prelude::*;

#[test]
fn views_require_login() {
    let workspace = TktWorkspace::new();

    let out = run_tkt(&workspace, ["list"], "list");
    assert!(!out.status.success());
    assert!(out.stderr.contains("Not logged in"));
    // Nothing is seeded for an anonymous caller.
    assert!(!workspace.data_dir().join("tickets.json").exists());
}

#[test]
fn login_whoami_logout_roundtrip() {
    let workspace = TktWorkspace::new();

    tkt_cmd(&workspace.root)
        .args(["login", "-u", "dana", "-p", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as dana (dana@ticketflow.com)"));

    let whoami = run_tkt(&workspace, ["whoami", "--json"], "whoami");
    assert!(whoami.status.success());
    let profile = whoami.json();
    assert_eq!(profile["username"], "dana");
    assert_eq!(profile["role"], "Admin");

    tkt_cmd(&workspace.root)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out dana"));

    tkt_cmd(&workspace.root)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn blank_password_is_refused() {
    let workspace = TktWorkspace::new();
    tkt_cmd(&workspace.root)
        .args(["login", "-u", "dana", "-p", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter both username and password"));
}

#[test]
fn data_dir_env_is_honored() {
    let workspace = TktWorkspace::new();
    let elsewhere = workspace.root.join("elsewhere");

    tkt_cmd(&workspace.root)
        .env("TICKETFLOW_DIR", &elsewhere)
        .args(["login", "-u", "dana", "-p", "secret"])
        .assert()
        .success();

    assert!(elsewhere.join("user.json").exists());
    assert!(!workspace.data_dir().exists());
}
