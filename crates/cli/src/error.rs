// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! - What went wrong (message)
//! - The underlying causes, outermost first (context)
//! - How to fix it (suggestions)

use lci_core::{PipelineError, ValidationError};
use lci_runbook::ParseError;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Push every error in `cause`'s chain as a context line
    fn with_chain(mut self, cause: Option<&(dyn Error + 'static)>) -> Self {
        let mut next = cause;
        while let Some(err) = next {
            self.context.push(err.to_string());
            next = err.source();
        }
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl CliError {
    /// Error for a failed pipeline run.
    pub fn pipeline(err: PipelineError) -> Self {
        let cli = match &err {
            PipelineError::Step(step) => {
                let cli = CliError::new(format!(
                    "step '{}' failed: {}",
                    step.step(),
                    step.message()
                ))
                .with_chain(step.cause().map(|c| c as &(dyn Error + 'static)));
                if step.is_timeout() {
                    cli.with_suggestion("Raise the step's `timeout` in the pipeline file")
                        .with_suggestion(
                            "Or set LCI_STEP_TIMEOUT_MS for timeout steps without one",
                        )
                } else {
                    cli.with_suggestion("Run with -v to see each command as it runs")
                }
            }
            PipelineError::Signal(signal) => CliError::new(signal.to_string())
                .with_context("Remaining steps were not run"),
            PipelineError::Validation(ValidationError::MissingProject) => {
                CliError::new(err.to_string())
                    .with_suggestion("Pass the project directory: lci -p <path>")
            }
            _ => CliError::new(err.to_string()).with_chain(err.source()),
        };
        cli.with_source(err)
    }

    /// Error for a pipeline file that could not be loaded.
    pub fn pipeline_file(path: &Path, err: ParseError) -> Self {
        CliError::new(format!("invalid pipeline file {}", path.display()))
            .with_context(err.to_string())
            .with_suggestion("Steps are [step.<name>] tables with at least `run`")
            .with_source(err)
    }

    /// Error for a branch choice outside the listed range.
    pub fn invalid_branch_choice(input: &str, count: usize) -> Self {
        CliError::new(format!("invalid branch choice: {:?}", input))
            .with_context(format!("Expected a number from 1 to {}", count))
            .with_suggestion("Pass the branch directly: lci --branch <name>")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
