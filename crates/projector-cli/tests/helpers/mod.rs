#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands against a throwaway database
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("projector").expect("Failed to find projector binary");

        // Keep a stray projector.toml in the repo from leaking into tests.
        cmd.current_dir(self.temp_dir.path());
        cmd.env("PROJECTOR_DATABASE_PATH", &self.db_path);
        cmd.env("PROJECTOR_ALLOW_PAST_DUE", "true");
        cmd.env_remove("RUST_LOG");

        cmd
    }

    pub fn db_path(&self) -> &std::path::Path {
        &self.db_path
    }

    pub fn dir(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Runs `list --json` and returns the parsed rows.
    pub fn list_json(&self, extra: &[&str]) -> Vec<serde_json::Value> {
        let mut args = vec!["list", "--json"];
        args.extend_from_slice(extra);
        let output = self.run_success(&args).get_output().stdout.clone();
        serde_json::from_slice(&output).expect("list --json should print a JSON array")
    }

    /// Full id of the only occurrence called `name`.
    pub fn id_of(&self, name: &str) -> String {
        let matches: Vec<serde_json::Value> = self
            .list_json(&["--status", "pending"])
            .into_iter()
            .filter(|row| row["name"] == name)
            .collect();
        assert_eq!(matches.len(), 1, "expected one pending '{}'", name);
        matches[0]["id"].as_str().unwrap().to_string()
    }
}

/// Utility predicates for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn has_occurrence_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Name"))
            .and(predicate::str::contains("Status"))
            .and(predicate::str::contains("Repeats"))
    }

    pub fn occurrence_created() -> impl Predicate<str> {
        predicate::str::contains("Created occurrence")
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
