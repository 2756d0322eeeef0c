// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step variants
//!
//! All variants share one contract, [`Execute`]: run once, then return either
//! the success message or a [`StepError`] naming the step.

use async_trait::async_trait;
use lci_adapters::{CommandError, CommandOutput, CommandRunner, Invocation};
use lci_core::{DeadlineExceeded, StepError, StepKind, StepSpec};
use std::time::Duration;
use tokio::time::Instant;

/// A runnable pipeline step
#[async_trait]
pub trait Execute: Send + Sync {
    /// Step name, unique within a run
    fn name(&self) -> &str;

    fn kind(&self) -> StepKind;

    /// Run the step once
    async fn execute(&self) -> Result<String, StepError>;
}

/// Build the step variant described by `spec`
pub fn build_step<C: CommandRunner>(spec: StepSpec, runner: C) -> Box<dyn Execute> {
    match spec.kind {
        StepKind::Plain => Box::new(PlainStep::new(spec, runner)),
        StepKind::Silent => Box::new(SilentStep::new(spec, runner)),
        StepKind::Timeout => Box::new(TimeoutStep::new(spec, runner)),
    }
}

/// Fails if the command cannot start or exits non-zero
pub struct PlainStep<C> {
    spec: StepSpec,
    runner: C,
}

impl<C: CommandRunner> PlainStep<C> {
    pub fn new(spec: StepSpec, runner: C) -> Self {
        Self { spec, runner }
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(
            self.spec.program.clone(),
            self.spec.args.clone(),
            self.spec.working_dir.clone(),
        )
    }

    /// Run the command, treating a non-zero exit as an error
    async fn run_command(&self) -> Result<CommandOutput, CommandError> {
        self.runner.run(&self.invocation()).await?.into_result()
    }

    fn failed(&self, cause: CommandError) -> StepError {
        StepError::new(&self.spec.name, "failed to execute").with_cause(cause)
    }
}

#[async_trait]
impl<C: CommandRunner> Execute for PlainStep<C> {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn kind(&self) -> StepKind {
        StepKind::Plain
    }

    async fn execute(&self) -> Result<String, StepError> {
        self.run_command().await.map_err(|e| self.failed(e))?;
        Ok(self.spec.success_message.clone())
    }
}

/// Fails on any stdout output, even when the command exits 0
///
/// Meant for checkers like `gofmt -l` that list what they would change.
/// Stderr is not inspected.
pub struct SilentStep<C> {
    step: PlainStep<C>,
}

impl<C: CommandRunner> SilentStep<C> {
    pub fn new(spec: StepSpec, runner: C) -> Self {
        Self {
            step: PlainStep::new(spec, runner),
        }
    }
}

#[async_trait]
impl<C: CommandRunner> Execute for SilentStep<C> {
    fn name(&self) -> &str {
        self.step.name()
    }

    fn kind(&self) -> StepKind {
        StepKind::Silent
    }

    async fn execute(&self) -> Result<String, StepError> {
        // Exit failure takes precedence over output
        let output = self
            .step
            .run_command()
            .await
            .map_err(|e| self.step.failed(e))?;

        if !output.stdout.is_empty() {
            return Err(StepError::new(
                self.name(),
                format!("invalid format: {}", String::from_utf8_lossy(&output.stdout)),
            ));
        }

        Ok(self.step.spec.success_message.clone())
    }
}

/// Plain semantics under a deadline
pub struct TimeoutStep<C> {
    step: PlainStep<C>,
    timeout: Duration,
}

impl<C: CommandRunner> TimeoutStep<C> {
    /// The deadline is the step's timeout, or the default if unset or zero
    pub fn new(spec: StepSpec, runner: C) -> Self {
        let timeout = spec.effective_timeout();
        Self {
            step: PlainStep::new(spec, runner),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn timed_out(&self) -> StepError {
        StepError::new(self.name(), "failed time out").with_cause(DeadlineExceeded)
    }
}

#[async_trait]
impl<C: CommandRunner> Execute for TimeoutStep<C> {
    fn name(&self) -> &str {
        self.step.name()
    }

    fn kind(&self) -> StepKind {
        StepKind::Timeout
    }

    async fn execute(&self) -> Result<String, StepError> {
        let start = Instant::now();

        // On expiry the command future is dropped here, which stops the process
        match tokio::time::timeout(self.timeout, self.step.run_command()).await {
            Ok(Ok(_)) => Ok(self.step.spec.success_message.clone()),
            // A failure after the deadline passed is still reported as the timeout
            Ok(Err(_)) if start.elapsed() >= self.timeout => Err(self.timed_out()),
            Ok(Err(e)) => Err(self.step.failed(e)),
            Err(_) => Err(self.timed_out()),
        }
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
