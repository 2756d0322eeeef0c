// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step definitions
//!
//! A [`StepSpec`] is the fully resolved description of one pipeline step:
//! what to run, where, what to print on success, and how to judge the result.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Deadline applied to timeout-bounded steps that do not configure one.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// How a step's command result is judged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Fails only if the command cannot start or exits non-zero
    #[default]
    Plain,
    /// Also fails if the command writes anything to stdout (format checkers)
    Silent,
    /// Plain semantics under a deadline
    Timeout,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Plain => "plain",
            StepKind::Silent => "silent",
            StepKind::Timeout => "timeout",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    /// Unique name within a run; the key used to identify a failing step
    pub name: String,
    /// Executable to launch (resolved through PATH)
    pub program: String,
    /// Working directory for the command
    pub working_dir: PathBuf,
    /// Arguments, passed verbatim with no shell interpretation
    pub args: Vec<String>,
    /// Line written to the output sink when the step succeeds
    pub success_message: String,
    /// Deadline for [`StepKind::Timeout`] steps
    pub timeout: Option<Duration>,
    pub kind: StepKind,
}

impl StepSpec {
    /// Create a plain step
    pub fn new<I, S>(
        name: impl Into<String>,
        program: impl Into<String>,
        working_dir: impl AsRef<Path>,
        success_message: impl Into<String>,
        args: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            program: program.into(),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: args.into_iter().map(Into::into).collect(),
            success_message: success_message.into(),
            timeout: None,
            kind: StepKind::Plain,
        }
    }

    /// Turn this into a step that fails on any stdout output
    pub fn silent(mut self) -> Self {
        self.kind = StepKind::Silent;
        self
    }

    /// Turn this into a timeout-bounded step.
    ///
    /// A zero duration means "use the default", never "no deadline".
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.kind = StepKind::Timeout;
        self.timeout = Some(timeout);
        self
    }

    /// The deadline a timeout-bounded step actually runs under
    pub fn effective_timeout(&self) -> Duration {
        match self.timeout {
            Some(t) if !t.is_zero() => t,
            _ => DEFAULT_STEP_TIMEOUT,
        }
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
