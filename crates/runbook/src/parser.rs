// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline TOML parsing

use crate::{JobDef, PipelineDef};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during pipeline parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a pipeline from TOML content.
///
/// Steps are the `[step.<name>]` tables, run in the order they appear.
pub fn parse_pipeline(content: &str) -> Result<PipelineDef, ParseError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("root must be a table".to_string()))?;

    if let Some(key) = table.keys().find(|k| k.as_str() != "step") {
        return Err(ParseError::InvalidFormat(format!(
            "unknown top-level key: {}",
            key
        )));
    }

    let steps = match table.get("step") {
        Some(value) => value
            .as_table()
            .ok_or_else(|| ParseError::InvalidFormat("step must be a table".to_string()))?,
        None => return Ok(PipelineDef::default()),
    };

    let mut jobs = Vec::with_capacity(steps.len());
    for (name, value) in steps {
        jobs.push(parse_job(name, value)?);
    }

    Ok(PipelineDef::new(jobs))
}

fn parse_job(name: &str, value: &toml::Value) -> Result<JobDef, ParseError> {
    let t = value
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat(format!("step.{} must be a table", name)))?;

    if !t.contains_key("run") {
        return Err(ParseError::MissingField(format!("step.{}.run", name)));
    }

    let mut job = value.clone().try_into::<JobDef>()?;
    job.name = name.to_string();

    if job.run.trim().is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "step.{}.run must not be empty",
            name
        )));
    }

    Ok(job)
}

/// Read and parse a pipeline file
pub fn load_pipeline(path: &Path) -> Result<PipelineDef, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pipeline(&content)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
