// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Git repository adapter

use super::{RepoAdapter, RepoError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Git-based repository adapter
#[derive(Clone)]
pub struct GitAdapter {
    root: PathBuf,
}

impl GitAdapter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl RepoAdapter for GitAdapter {
    async fn branches(&self) -> Result<Vec<String>, RepoError> {
        let output = Command::new("git")
            .current_dir(&self.root)
            .arg("branch")
            .arg("--format=%(refname:short)")
            .output()
            .await
            .map_err(|e| RepoError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RepoError::CommandFailed(stderr.trim().to_string()));
        }

        let branches = parse_branches(&String::from_utf8_lossy(&output.stdout));
        if branches.is_empty() {
            return Err(RepoError::NoBranches);
        }
        Ok(branches)
    }
}

/// Parse `git branch` output, tolerating the `* ` current-branch marker
pub(crate) fn parse_branches(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
