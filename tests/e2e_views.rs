mod common;

use common::cli::{TktWorkspace, run_tkt, tkt_cmd};
use predicates::prelude::*;

#[test]
fn filters_combine() {
    let workspace = TktWorkspace::logged_in();

    let out = run_tkt(
        &workspace,
        ["list", "--json", "--status", "open", "--assignee", "Lisa Wang"],
        "list",
    );
    let tickets = out.json();
    let titles: Vec<_> = tickets
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Email Notification System"]);

    let none = run_tkt(&workspace, ["list", "--search", "no-such-thing"], "list empty");
    assert!(none.status.success());
    assert!(none.stdout.contains("No tickets found matching your filters."));
}

#[test]
fn search_is_case_insensitive() {
    let workspace = TktWorkspace::logged_in();
    let out = run_tkt(&workspace, ["list", "--json", "--search", "DARK MODE"], "list");
    assert_eq!(out.json().as_array().map(Vec::len), Some(1));
}

#[test]
fn priority_sort_puts_critical_first() {
    let workspace = TktWorkspace::logged_in();
    let out = run_tkt(
        &workspace,
        ["list", "--json", "--sort", "priority", "--order", "desc"],
        "list",
    );
    assert_eq!(out.json()[0]["priority"], "critical");
}

#[test]
fn unknown_filter_value_fails() {
    let workspace = TktWorkspace::logged_in();
    tkt_cmd(&workspace.root)
        .args(["list", "--status", "pending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status"));
}

#[test]
fn dashboard_uses_configured_view() {
    let workspace = TktWorkspace::logged_in();
    std::fs::write(
        workspace.data_dir().join("config.yaml"),
        "default_view: list\ndefault_sort: title\ndefault_order: asc\n",
    )
    .unwrap();

    let out = run_tkt(&workspace, ["dashboard", "--json"], "dashboard").json();
    assert_eq!(out["view"], "list");
    assert_eq!(out["sort"], "title");
    assert!(out.get("columns").is_none());
    assert_eq!(out["tickets"][0]["title"], "Email Notification System");

    let kanban = run_tkt(&workspace, ["dashboard", "--view", "kanban"], "dashboard text");
    assert!(kanban.stdout.contains("Welcome back, dana!"));
    assert!(kanban.stdout.contains("In Progress"));
}

#[test]
fn assignees_are_distinct_in_first_seen_order() {
    let workspace = TktWorkspace::logged_in();
    let out = run_tkt(&workspace, ["assignees", "--json"], "assignees").json();
    assert_eq!(
        out,
        serde_json::json!(["Sarah Johnson", "Mike Chen", "Alex Rodriguez", "Lisa Wang"])
    );
}

#[test]
fn export_writes_dated_file() {
    let workspace = TktWorkspace::logged_in();
    let out_dir = workspace.root.join("exports");

    let out = run_tkt(
        &workspace,
        ["export", "--json", "--status", "open", "-o", out_dir.to_str().unwrap()],
        "export",
    );
    assert!(out.status.success(), "export failed: {}", out.stderr);
    let result = out.json();
    assert_eq!(result["count"], 2);

    let path = std::path::PathBuf::from(result["path"].as_str().unwrap());
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("tickets-export-") && name.ends_with(".json"));
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.as_array().map(Vec::len), Some(2));
}

#[test]
fn completions_need_no_session() {
    let workspace = TktWorkspace::new();
    tkt_cmd(&workspace.root)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tkt"));
}
