// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::command::{CommandError, CommandOutput, CommandRunner, Invocation};
use crate::repo::{RepoAdapter, RepoError};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any CommandRunner
#[derive(Clone)]
pub struct TracedCommandRunner<C> {
    inner: C,
}

impl<C> TracedCommandRunner<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: CommandRunner> CommandRunner for TracedCommandRunner<C> {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        let span = tracing::info_span!(
            "command.run",
            program = %invocation.program,
            cwd = %invocation.cwd.display()
        );

        async {
            tracing::info!(args = ?invocation.args, "starting");

            // Precondition: cwd must exist
            if !invocation.cwd.is_dir() {
                tracing::error!("working directory does not exist");
                return Err(CommandError::MissingDir(invocation.cwd.clone()));
            }

            let start = std::time::Instant::now();
            let result = self.inner.run(invocation).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(output) => tracing::info!(
                    exit_code = ?output.code,
                    stdout_len = output.stdout.len(),
                    stderr_len = output.stderr.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "command exited"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "command failed to run"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any RepoAdapter
#[derive(Clone)]
pub struct TracedRepoAdapter<R> {
    inner: R,
}

impl<R> TracedRepoAdapter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: RepoAdapter> RepoAdapter for TracedRepoAdapter<R> {
    async fn branches(&self) -> Result<Vec<String>, RepoError> {
        let result = self
            .inner
            .branches()
            .instrument(tracing::info_span!("repo.branches"))
            .await;
        match &result {
            Ok(branches) => tracing::debug!(count = branches.len(), "listed branches"),
            Err(e) => tracing::warn!(error = %e, "listing branches failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
