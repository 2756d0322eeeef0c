// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::{Duration, Instant};

fn sh(script: &str, cwd: &std::path::Path) -> Invocation {
    Invocation::new("sh", vec!["-c".to_string(), script.to_string()], cwd)
}

#[tokio::test]
async fn process_runner_captures_stdout_and_exit_code() {
    let dir = tempfile::tempdir().unwrap();

    let output = ProcessRunner::new()
        .run(&sh("echo hello; echo oops >&2; exit 3", dir.path()))
        .await
        .unwrap();

    assert_eq!(output.code, Some(3));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hello\n");
    assert_eq!(String::from_utf8_lossy(&output.stderr), "oops\n");
    assert!(!output.success());
}

#[tokio::test]
async fn process_runner_runs_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

    let output = ProcessRunner::new()
        .run(&Invocation::new("ls", Vec::new(), dir.path()))
        .await
        .unwrap();

    assert!(output.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("marker.txt"));
}

#[tokio::test]
async fn process_runner_passes_arguments_verbatim() {
    let dir = tempfile::tempdir().unwrap();

    let output = ProcessRunner::new()
        .run(&Invocation::new(
            "echo",
            vec!["$HOME".to_string(), "a b".to_string()],
            dir.path(),
        ))
        .await
        .unwrap();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "$HOME a b\n");
}

#[tokio::test]
async fn process_runner_reports_missing_program() {
    let dir = tempfile::tempdir().unwrap();

    let result = ProcessRunner::new()
        .run(&Invocation::new(
            "lci-definitely-not-a-program",
            Vec::new(),
            dir.path(),
        ))
        .await;

    match result {
        Err(CommandError::Spawn { program, .. }) => {
            assert_eq!(program, "lci-definitely-not-a-program")
        }
        other => panic!("Expected Spawn error, got {:?}", other),
    }
}

#[tokio::test]
async fn process_runner_fails_for_missing_working_directory() {
    let result = ProcessRunner::new()
        .run(&Invocation::new(
            "true",
            Vec::new(),
            "/nonexistent/lci/project",
        ))
        .await;

    assert!(matches!(result, Err(CommandError::Spawn { .. })));
}

#[tokio::test]
async fn dropping_run_future_stops_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let runner = ProcessRunner::new();
    let invocation = sh("sleep 15", dir.path());

    let start = Instant::now();
    let result = tokio::time::timeout(Duration::from_millis(200), runner.run(&invocation)).await;

    assert!(result.is_err(), "sleep should not finish within 200ms");
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn into_result_maps_non_zero_exit() {
    let output = CommandOutput {
        code: Some(1),
        stdout: Vec::new(),
        stderr: b"build failed\n".to_vec(),
    };

    let err = output.into_result().unwrap_err();
    assert_eq!(err.to_string(), "exit status 1: build failed");
}

#[test]
fn into_result_keeps_successful_output() {
    let output = CommandOutput {
        code: Some(0),
        stdout: b"main.go\n".to_vec(),
        stderr: Vec::new(),
    };

    let output = output.into_result().unwrap();
    assert_eq!(output.stdout, b"main.go\n");
}

#[test]
fn exit_error_without_code_mentions_signal() {
    let err = CommandError::Exit {
        code: None,
        stderr: String::new(),
    };

    assert_eq!(err.to_string(), "terminated by signal");
}
