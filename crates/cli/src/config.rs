// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline source and environment settings

use crate::error::CliError;
use lci_core::{StepKind, StepSpec};
use lci_runbook::{builtin, load_pipeline, PipelineDef};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for timeout steps that do not set one
pub const STEP_TIMEOUT_ENV: &str = "LCI_STEP_TIMEOUT_MS";

/// Pipeline file looked up inside the project
pub const PROJECT_PIPELINE: &str = ".lci/pipeline.toml";

/// Where the pipeline came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineSource {
    File(PathBuf),
    Builtin,
}

/// `--pipeline`, else the project's pipeline file, else the built-in pipeline
pub fn pipeline_source(project: &Path, explicit: Option<&Path>) -> PipelineSource {
    if let Some(path) = explicit {
        return PipelineSource::File(path.to_path_buf());
    }
    let local = project.join(PROJECT_PIPELINE);
    if local.is_file() {
        PipelineSource::File(local)
    } else {
        PipelineSource::Builtin
    }
}

pub fn load(source: &PipelineSource) -> Result<PipelineDef, CliError> {
    match source {
        PipelineSource::File(path) => {
            load_pipeline(path).map_err(|e| CliError::pipeline_file(path, e))
        }
        PipelineSource::Builtin => Ok(builtin::go_pipeline()),
    }
}

/// Parse a millisecond timeout from the environment value, if set
pub fn step_timeout(value: Option<&str>) -> Result<Option<Duration>, CliError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Some(Duration::from_millis(ms))),
        _ => Err(CliError::new(format!("invalid {}: {:?}", STEP_TIMEOUT_ENV, raw))
            .with_context("Expected a positive number of milliseconds")),
    }
}

/// Give timeout steps without their own deadline `timeout`
pub fn apply_default_timeout(steps: &mut [StepSpec], timeout: Duration) {
    steps
        .iter_mut()
        .filter(|s| s.kind == StepKind::Timeout && s.timeout.is_none())
        .for_each(|s| s.timeout = Some(timeout));
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
