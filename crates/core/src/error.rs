// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for pipeline runs
//!
//! Callers match failures structurally rather than by message text:
//! - [`StepError`] compares equal to any other `StepError` with the same step
//!   name, so "did step X fail" is `err.step_error() == Some(&StepError::for_step("X"))`
//! - the cause chain is reachable through [`std::error::Error::source`], so a
//!   timeout is detected by finding [`DeadlineExceeded`] underneath
//! - [`SignalError`] and [`ValidationError`] are separate variants of
//!   [`PipelineError`]

use crate::Signal;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Boxed error used as the cause of a step failure
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Cause attached to a step that ran past its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline exceeded")]
pub struct DeadlineExceeded;

/// A named step failed
///
/// Equality only considers the step name; message and cause are informational.
#[derive(Debug)]
pub struct StepError {
    step: String,
    message: String,
    cause: Option<BoxError>,
}

impl StepError {
    pub fn new(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// A bare error for `step`, used as a probe when matching
    pub fn for_step(step: impl Into<String>) -> Self {
        Self::new(step, "")
    }

    /// Attach the lower-level error that caused this failure
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        self.cause = Some(cause.into());
        self
    }

    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// True if the step failed because it ran past its deadline
    pub fn is_timeout(&self) -> bool {
        self.cause().is_some_and(|c| c.is::<DeadlineExceeded>())
    }
}

impl PartialEq for StepError {
    fn eq(&self, other: &Self) -> bool {
        self.step == other.step
    }
}

impl Eq for StepError {}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {:?}: {}", self.step, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Input rejected before any step runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("project directory is required")]
    MissingProject,
    #[error("step {index} has an empty name")]
    EmptyStepName { index: usize },
    #[error("duplicate step name: {0}")]
    DuplicateStep(String),
}

/// The run was aborted by an external termination request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{signal}: exiting: received termination signal")]
pub struct SignalError {
    pub signal: Signal,
}

/// Everything a pipeline run can fail with
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Signal(#[from] SignalError),
    #[error("failed to listen for termination signals: {0}")]
    SignalSetup(#[source] std::io::Error),
    #[error("pipeline task aborted: {0}")]
    Aborted(String),
}

impl PipelineError {
    pub fn step_error(&self) -> Option<&StepError> {
        match self {
            PipelineError::Step(e) => Some(e),
            _ => None,
        }
    }

    /// Name of the step that failed, if a step failed
    pub fn failed_step(&self) -> Option<&str> {
        self.step_error().map(StepError::step)
    }

    pub fn is_timeout(&self) -> bool {
        self.step_error().is_some_and(StepError::is_timeout)
    }

    pub fn signal(&self) -> Option<Signal> {
        match self {
            PipelineError::Signal(e) => Some(e.signal),
            _ => None,
        }
    }

    pub fn is_signal(&self) -> bool {
        self.signal().is_some()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
