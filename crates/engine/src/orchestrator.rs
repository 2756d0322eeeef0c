// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline orchestrator
//!
//! Steps run strictly in order on one background task. The caller waits on
//! whichever comes first: a termination signal, the first step failure, or
//! completion of the last step. On a signal the task is detached, not joined.

use crate::signals::ShutdownSignals;
use crate::step::{build_step, Execute};
use lci_adapters::{CommandRunner, ProcessRunner, TracedCommandRunner};
use lci_core::{PipelineError, Signal, SignalError, StepError, StepSpec, ValidationError};
use std::collections::HashSet;
use std::future::Future;
use std::io::Write;
use std::path::Path;
use tracing::Instrument;

/// Runs pipelines against a command runner
pub struct Orchestrator<C> {
    runner: C,
}

impl<C: CommandRunner> Orchestrator<C> {
    pub fn new(runner: C) -> Self {
        Self { runner }
    }

    /// Run `pipeline` to completion or to its first failure.
    ///
    /// Each success message is written to `sink` as one line before the next
    /// step starts. Returns early with [`PipelineError::Signal`] as soon as
    /// `shutdown` resolves.
    pub async fn run<W, F>(
        &self,
        project: &Path,
        sink: W,
        pipeline: Vec<StepSpec>,
        shutdown: F,
    ) -> Result<(), PipelineError>
    where
        W: Write + Send + 'static,
        F: Future<Output = Signal>,
    {
        validate(project, &pipeline)?;

        let steps = pipeline
            .into_iter()
            .map(|spec| build_step(spec, self.runner.clone()))
            .collect();

        run_steps(steps, sink, shutdown)
            .instrument(tracing::info_span!("pipeline", project = %project.display()))
            .await
    }
}

/// Run `pipeline` with real processes and SIGINT/SIGTERM handling
pub async fn run<W>(project: &Path, sink: W, pipeline: Vec<StepSpec>) -> Result<(), PipelineError>
where
    W: Write + Send + 'static,
{
    let signals = ShutdownSignals::register().map_err(PipelineError::SignalSetup)?;
    Orchestrator::new(TracedCommandRunner::new(ProcessRunner::new()))
        .run(project, sink, pipeline, signals.recv())
        .await
}

/// Reject a run before any step starts
pub fn validate(project: &Path, pipeline: &[StepSpec]) -> Result<(), ValidationError> {
    if project.as_os_str().is_empty() {
        return Err(ValidationError::MissingProject);
    }

    let mut seen = HashSet::new();
    for (index, spec) in pipeline.iter().enumerate() {
        if spec.name.is_empty() {
            return Err(ValidationError::EmptyStepName { index });
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(ValidationError::DuplicateStep(spec.name.clone()));
        }
    }

    Ok(())
}

/// Drive already-built steps on a background task, racing `shutdown`
pub async fn run_steps<W, F>(
    steps: Vec<Box<dyn Execute>>,
    sink: W,
    shutdown: F,
) -> Result<(), PipelineError>
where
    W: Write + Send + 'static,
    F: Future<Output = Signal>,
{
    tracing::info!(steps = steps.len(), "pipeline starting");

    // The JoinHandle is the single result slot: the task never blocks on
    // publishing its outcome, even if nobody is waiting any more.
    let task = tokio::spawn(drive(steps, sink).in_current_span());

    tokio::select! {
        biased;

        signal = shutdown => {
            tracing::warn!(%signal, "termination signal received, abandoning pipeline");
            Err(SignalError { signal }.into())
        }

        joined = task => match joined {
            Ok(Ok(())) => {
                tracing::info!("pipeline complete");
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::error!(step = e.step(), error = %e, "pipeline failed");
                Err(e.into())
            }
            Err(e) => Err(PipelineError::Aborted(e.to_string())),
        },
    }
}

async fn drive<W: Write>(steps: Vec<Box<dyn Execute>>, mut sink: W) -> Result<(), StepError> {
    for step in &steps {
        let span = tracing::info_span!("step", name = step.name(), kind = %step.kind());
        let start = std::time::Instant::now();

        let message = match step.execute().instrument(span.clone()).await {
            Ok(message) => message,
            Err(e) => {
                span.in_scope(|| {
                    tracing::error!(
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        error = %e,
                        "step failed"
                    )
                });
                return Err(e);
            }
        };

        writeln!(sink, "{}", message)
            .and_then(|()| sink.flush())
            .map_err(|e| StepError::new(step.name(), "failed to write output").with_cause(e))?;

        span.in_scope(|| {
            tracing::info!(
                elapsed_ms = start.elapsed().as_millis() as u64,
                "step succeeded"
            )
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
