// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External command adapters
//!
//! Every process the runner launches goes through a [`CommandRunner`], so the
//! engine can be driven against real tools or a scripted stand-in.

mod process;

pub use process::ProcessRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CommandCall, FakeCommandRunner, FakeResponse};

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from launching or running a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("working directory does not exist: {}", .0.display())]
    MissingDir(PathBuf),
    #[error("{}{}", exit_status(.code), stderr_suffix(.stderr))]
    Exit { code: Option<i32>, stderr: String },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// A fully resolved command: program, verbatim arguments, working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            cwd: cwd.into(),
        }
    }
}

/// Captured result of a command that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Convert a non-zero exit into [`CommandError::Exit`]
    pub fn into_result(self) -> Result<CommandOutput, CommandError> {
        if self.success() {
            Ok(self)
        } else {
            Err(CommandError::Exit {
                code: self.code,
                stderr: String::from_utf8_lossy(&self.stderr).into_owned(),
            })
        }
    }
}

/// Adapter for launching external commands
#[async_trait]
pub trait CommandRunner: Clone + Send + Sync + 'static {
    /// Run the command to completion and capture its output.
    ///
    /// A non-zero exit is not an error at this level; see
    /// [`CommandOutput::into_result`]. Dropping the returned future must
    /// stop the process.
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError>;
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
