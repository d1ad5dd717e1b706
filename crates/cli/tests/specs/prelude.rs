//! Shared helpers for CLI specs

pub use predicates::prelude::*;

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// The labbable binary with logging silenced
pub fn labbable() -> Command {
    let mut cmd = Command::cargo_bin("labbable").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Scratch directory holding config files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `labbable.toml` and return its path
    pub fn config(&self, content: &str) -> PathBuf {
        let path = self.dir.path().join("labbable.toml");
        std::fs::write(&path, content).unwrap();
        path
    }
}

pub fn stdout_of(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

pub fn json_of(assert: &Assert) -> serde_json::Value {
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}
