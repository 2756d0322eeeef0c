// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CommandError, CommandOutput, CommandRunner, Invocation};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded command call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Scripted result for a program
#[derive(Debug, Clone, Default)]
pub struct FakeResponse {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// How long the "process" runs before exiting
    pub delay: Option<Duration>,
    /// Fail to launch instead of running
    pub spawn_error: bool,
}

impl FakeResponse {
    /// Exit 0 with no output
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    /// Exit with the given non-zero code
    pub fn exit(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    /// Fail as if the executable did not exist
    pub fn not_found() -> Self {
        Self {
            spawn_error: true,
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Fake command runner for testing
///
/// Programs without a scripted response exit 0 with no output.
#[derive(Clone, Default)]
pub struct FakeCommandRunner {
    responses: Arc<Mutex<HashMap<String, FakeResponse>>>,
    calls: Arc<Mutex<Vec<CommandCall>>>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for every invocation of `program`
    pub fn respond(&self, program: &str, response: FakeResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(program.to_string(), response);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CommandCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Programs invoked so far, in order
    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.program).collect()
    }
}

#[async_trait]
impl CommandRunner for FakeCommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CommandCall {
                program: invocation.program.clone(),
                args: invocation.args.clone(),
                cwd: invocation.cwd.clone(),
            });

        let response = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&invocation.program)
            .cloned()
            .unwrap_or_else(FakeResponse::ok);

        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }

        if response.spawn_error {
            return Err(CommandError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            });
        }

        Ok(CommandOutput {
            code: response.code,
            stdout: response.stdout.into_bytes(),
            stderr: response.stderr.into_bytes(),
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
