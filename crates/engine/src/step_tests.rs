// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lci_adapters::{FakeCommandRunner, FakeResponse, ProcessRunner};
use std::error::Error;
use yare::parameterized;

fn spec(name: &str, program: &str) -> StepSpec {
    StepSpec::new(name, program, "/proj", format!("{}: SUCCESS", name), ["run"])
}

// =============================================================================
// Plain steps
// =============================================================================

#[tokio::test]
async fn plain_step_returns_success_message() {
    let runner = FakeCommandRunner::new();
    let step = PlainStep::new(spec("go-build", "go"), runner.clone());

    let message = step.execute().await.unwrap();

    assert_eq!(message, "go-build: SUCCESS");
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "go");
    assert_eq!(calls[0].args, vec!["run".to_string()]);
    assert_eq!(calls[0].cwd, std::path::PathBuf::from("/proj"));
}

#[tokio::test]
async fn plain_step_ignores_output_on_success() {
    let runner = FakeCommandRunner::new();
    runner.respond("go", FakeResponse::ok().with_stdout("lots of output"));

    let message = PlainStep::new(spec("go-test", "go"), runner)
        .execute()
        .await
        .unwrap();

    assert_eq!(message, "go-test: SUCCESS");
}

#[parameterized(
    non_zero_exit = { FakeResponse::exit(1) },
    missing_program = { FakeResponse::not_found() },
)]
#[test_macro(tokio::test)]
async fn plain_step_failure_wraps_cause(response: FakeResponse) {
    let runner = FakeCommandRunner::new();
    runner.respond("go", response);

    let err = PlainStep::new(spec("go-build", "go"), runner)
        .execute()
        .await
        .unwrap_err();

    assert_eq!(err, StepError::for_step("go-build"));
    assert_eq!(err.message(), "failed to execute");
    assert!(err.source().is_some_and(|c| c.is::<CommandError>()));
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn plain_step_failure_keeps_stderr_in_cause() {
    let runner = FakeCommandRunner::new();
    runner.respond("go", FakeResponse::exit(2).with_stderr("undefined: foo\n"));

    let err = PlainStep::new(spec("go-build", "go"), runner)
        .execute()
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "step \"go-build\": failed to execute: exit status 2: undefined: foo"
    );
}

// =============================================================================
// Silent steps
// =============================================================================

#[tokio::test]
async fn silent_step_succeeds_without_output() {
    let runner = FakeCommandRunner::new();
    let step = SilentStep::new(spec("go-fmt", "gofmt").silent(), runner);

    assert_eq!(step.execute().await.unwrap(), "go-fmt: SUCCESS");
}

#[tokio::test]
async fn silent_step_fails_on_stdout_even_with_exit_zero() {
    let runner = FakeCommandRunner::new();
    runner.respond("gofmt", FakeResponse::ok().with_stdout("main.go\n"));

    let err = SilentStep::new(spec("go-fmt", "gofmt").silent(), runner)
        .execute()
        .await
        .unwrap_err();

    assert_eq!(err, StepError::for_step("go-fmt"));
    assert_eq!(err.message(), "invalid format: main.go\n");
    assert!(err.source().is_none());
}

#[tokio::test]
async fn silent_step_ignores_stderr() {
    let runner = FakeCommandRunner::new();
    runner.respond("gofmt", FakeResponse::ok().with_stderr("warning: something"));

    let result = SilentStep::new(spec("go-fmt", "gofmt").silent(), runner)
        .execute()
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn silent_step_exit_failure_takes_precedence_over_output() {
    let runner = FakeCommandRunner::new();
    runner.respond("gofmt", FakeResponse::exit(2).with_stdout("main.go\n"));

    let err = SilentStep::new(spec("go-fmt", "gofmt").silent(), runner)
        .execute()
        .await
        .unwrap_err();

    assert_eq!(err.message(), "failed to execute");
    assert!(err.source().is_some());
}

// =============================================================================
// Timeout steps
// =============================================================================

#[tokio::test(start_paused = true)]
async fn timeout_step_succeeds_within_deadline() {
    let runner = FakeCommandRunner::new();
    runner.respond("git", FakeResponse::ok().with_delay(Duration::from_millis(500)));

    let step = TimeoutStep::new(
        spec("git-push", "git").with_timeout(Duration::from_secs(1)),
        runner,
    );

    assert_eq!(step.execute().await.unwrap(), "git-push: SUCCESS");
}

#[tokio::test(start_paused = true)]
async fn timeout_step_reports_deadline_exceeded() {
    let runner = FakeCommandRunner::new();
    runner.respond("git", FakeResponse::ok().with_delay(Duration::from_secs(15)));

    let step = TimeoutStep::new(
        spec("git-push", "git").with_timeout(Duration::from_secs(1)),
        runner,
    );

    let start = Instant::now();
    let err = step.execute().await.unwrap_err();

    assert_eq!(err, StepError::for_step("git-push"));
    assert_eq!(err.message(), "failed time out");
    assert!(err.is_timeout());
    assert!(err
        .source()
        .is_some_and(|c| c.downcast_ref::<DeadlineExceeded>() == Some(&DeadlineExceeded)));
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn timeout_takes_precedence_over_late_failure() {
    let runner = FakeCommandRunner::new();
    // Exits non-zero exactly at the deadline
    runner.respond("git", FakeResponse::exit(128).with_delay(Duration::from_secs(1)));

    let err = TimeoutStep::new(
        spec("git-push", "git").with_timeout(Duration::from_secs(1)),
        runner,
    )
    .execute()
    .await
    .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {}", err);
}

#[tokio::test(start_paused = true)]
async fn timeout_step_early_failure_is_execution_error() {
    let runner = FakeCommandRunner::new();
    runner.respond("git", FakeResponse::exit(1).with_stderr("rejected"));

    let err = TimeoutStep::new(
        spec("git-push", "git").with_timeout(Duration::from_secs(10)),
        runner,
    )
    .execute()
    .await
    .unwrap_err();

    assert_eq!(err.message(), "failed to execute");
    assert!(!err.is_timeout());
}

#[tokio::test(start_paused = true)]
async fn timeout_step_defaults_to_thirty_seconds() {
    let runner = FakeCommandRunner::new();
    runner.respond("git", FakeResponse::ok().with_delay(Duration::from_secs(29)));

    let step = TimeoutStep::new(
        spec("git-push", "git").with_timeout(Duration::ZERO),
        runner.clone(),
    );
    assert_eq!(step.timeout(), Duration::from_secs(30));
    assert!(step.execute().await.is_ok());

    runner.respond("git", FakeResponse::ok().with_delay(Duration::from_secs(31)));
    assert!(step.execute().await.unwrap_err().is_timeout());
}

#[tokio::test]
async fn timeout_step_stops_real_process() {
    let dir = tempfile::tempdir().unwrap();
    let spec = StepSpec::new("slow", "sleep", dir.path(), "done", ["15"])
        .with_timeout(Duration::from_millis(200));

    let start = std::time::Instant::now();
    let err = TimeoutStep::new(spec, ProcessRunner::new())
        .execute()
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(start.elapsed() < Duration::from_secs(5));
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn build_step_dispatches_on_kind() {
    let runner = FakeCommandRunner::new();

    let plain = build_step(spec("a", "go"), runner.clone());
    let silent = build_step(spec("b", "gofmt").silent(), runner.clone());
    let timeout = build_step(spec("c", "git").with_timeout(Duration::from_secs(1)), runner);

    assert_eq!((plain.name(), plain.kind()), ("a", StepKind::Plain));
    assert_eq!((silent.name(), silent.kind()), ("b", StepKind::Silent));
    assert_eq!((timeout.name(), timeout.kind()), ("c", StepKind::Timeout));
}

#[tokio::test]
async fn missing_working_directory_fails_to_execute() {
    let spec = StepSpec::new("build", "true", "/nonexistent/lci/dir", "ok", Vec::<String>::new());

    let err = PlainStep::new(spec, ProcessRunner::new())
        .execute()
        .await
        .unwrap_err();

    assert_eq!(err.message(), "failed to execute");
}
