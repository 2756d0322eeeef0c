// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Empty project directory
pub fn project() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write `content` as the project's own pipeline file
pub fn write_project_pipeline(project: &Path, content: &str) -> PathBuf {
    let dir = project.join(".lci");
    fs::create_dir_all(&dir).expect("Failed to create .lci");
    let path = dir.join("pipeline.toml");
    fs::write(&path, content).expect("Failed to write pipeline");
    path
}

/// Project with a git repo holding one commit on `main` and a `feature` branch
pub fn git_project() -> TempDir {
    let temp = project();
    let git = |args: &[&str]| {
        let status = Command::new("git")
            .args(args)
            .current_dir(temp.path())
            .output()
            .expect("Failed to run git")
            .status;
        assert!(status.success(), "git {:?} failed", args);
    };

    git(&["init", "--quiet"]);
    git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(&["config", "user.email", "test@test.com"]);
    git(&["config", "user.name", "Test"]);
    fs::write(temp.path().join("README.md"), "# Test").expect("Failed to write README");
    git(&["add", "README.md"]);
    git(&["commit", "--quiet", "-m", "Initial commit"]);
    git(&["branch", "feature"]);

    temp
}
