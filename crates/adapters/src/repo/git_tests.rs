// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parse_branches_strips_current_marker() {
    let branches = parse_branches("  develop\n* main\n  feature/login\n\n");
    assert_eq!(branches, vec!["develop", "main", "feature/login"]);
}

#[test]
fn parse_branches_empty_output() {
    assert!(parse_branches("\n\n").is_empty());
}

fn git(dir: &std::path::Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .unwrap()
        .status;
    assert!(status.success(), "git {:?} failed", args);
}

#[tokio::test]
async fn git_adapter_lists_branches() {
    if std::process::Command::new("git").arg("--version").output().is_err() {
        // git is not installed
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "--quiet"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    std::fs::write(dir.path().join("README.md"), "# test").unwrap();
    git(dir.path(), &["add", "README.md"]);
    git(dir.path(), &["commit", "--quiet", "-m", "init"]);
    git(dir.path(), &["branch", "release"]);

    let branches = GitAdapter::new(dir.path().to_path_buf())
        .branches()
        .await
        .unwrap();

    assert_eq!(branches, vec!["main", "release"]);
}

#[tokio::test]
async fn git_adapter_fails_outside_repository() {
    let dir = tempfile::tempdir().unwrap();

    let result = GitAdapter::new(dir.path().to_path_buf()).branches().await;

    assert!(result.is_err());
}
