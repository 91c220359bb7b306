//! Harness for driving the `tkt` binary against a throwaway data directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A temp working directory with its own `.ticketflow` data dir.
pub struct TktWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TktWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(".ticketflow")
    }

    /// A workspace with a signed-in user and the demo tickets loaded.
    pub fn logged_in() -> Self {
        let workspace = Self::new();
        let out = run_tkt(&workspace, ["login", "-u", "dana", "-p", "secret"], "login");
        assert!(out.status.success(), "login failed: {}", out.stderr);
        workspace
    }
}

pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("invalid JSON ({e}): {}", self.stdout))
    }
}

pub fn tkt_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tkt"));
    cmd.current_dir(root);
    cmd.env_remove("TICKETFLOW_DIR");
    cmd.env("TICKETFLOW_LOG", "error");
    cmd
}

pub fn run_tkt<I, S>(workspace: &TktWorkspace, args: I, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_tkt_with_stdin(workspace, args, "", label)
}

pub fn run_tkt_with_stdin<I, S>(
    workspace: &TktWorkspace,
    args: I,
    stdin: &str,
    label: &str,
) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = tkt_cmd(&workspace.root)
        .args(args)
        .write_stdin(stdin)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run tkt: {e}"));
    CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Create a ticket and return its id.
pub fn create_ticket(workspace: &TktWorkspace, args: &[&str]) -> i64 {
    let mut full = vec!["create", "--json"];
    full.extend_from_slice(args);
    let out = run_tkt(workspace, full, "create");
    assert!(out.status.success(), "create failed: {}", out.stderr);
    out.json()["id"].as_i64().expect("ticket id")
}
