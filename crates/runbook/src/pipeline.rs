// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline definitions

use crate::template::{interpolate, placeholders};
use lci_core::{StepKind, StepSpec};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Step kind as written in a pipeline file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindDef {
    Plain,
    Silent,
    Timeout,
}

impl From<KindDef> for StepKind {
    fn from(kind: KindDef) -> Self {
        match kind {
            KindDef::Plain => StepKind::Plain,
            KindDef::Silent => StepKind::Silent,
            KindDef::Timeout => StepKind::Timeout,
        }
    }
}

/// One `[step.<name>]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobDef {
    /// Step name (the table key)
    #[serde(skip)]
    pub name: String,
    /// Executable to run
    pub run: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Success message; defaults to `<name>: SUCCESS`
    #[serde(default)]
    pub success: Option<String>,
    #[serde(with = "humantime_serde", default)]
    pub timeout: Option<Duration>,
    #[serde(default)]
    pub kind: Option<KindDef>,
}

impl JobDef {
    pub fn new<I, S>(name: &str, run: &str, args: I, success: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            run: run.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            success: Some(success.to_string()),
            timeout: None,
            kind: None,
        }
    }

    pub fn silent(mut self) -> Self {
        self.kind = Some(KindDef::Silent);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Explicit `kind`, else `timeout` when a timeout is set, else `plain`
    pub fn step_kind(&self) -> StepKind {
        match (self.kind, self.timeout) {
            (Some(kind), _) => kind.into(),
            (None, Some(_)) => StepKind::Timeout,
            (None, None) => StepKind::Plain,
        }
    }

    fn success_message(&self) -> String {
        self.success
            .clone()
            .unwrap_or_else(|| format!("{}: SUCCESS", self.name))
    }

    fn templates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.run.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(self.success.as_deref())
    }

    /// Resolve into a runnable step in `project`
    pub fn to_spec(&self, project: &Path, vars: &HashMap<String, String>) -> StepSpec {
        let mut spec = StepSpec::new(
            self.name.clone(),
            interpolate(&self.run, vars),
            project,
            interpolate(&self.success_message(), vars),
            self.args.iter().map(|arg| interpolate(arg, vars)),
        );
        spec.kind = self.step_kind();
        spec.timeout = self.timeout;
        spec
    }
}

/// An ordered pipeline of jobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineDef {
    pub jobs: Vec<JobDef>,
}

impl PipelineDef {
    pub fn new(jobs: Vec<JobDef>) -> Self {
        Self { jobs }
    }

    /// Step names in execution order
    pub fn names(&self) -> Vec<&str> {
        self.jobs.iter().map(|j| j.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&JobDef> {
        self.jobs.iter().find(|j| j.name == name)
    }

    /// True if any job references `{name}`
    pub fn uses_var(&self, name: &str) -> bool {
        self.jobs
            .iter()
            .flat_map(JobDef::templates)
            .any(|t| placeholders(t).contains(name))
    }

    /// Resolve every job into a step running in `project`, in order
    pub fn steps(&self, project: &Path, vars: &HashMap<String, String>) -> Vec<StepSpec> {
        self.jobs.iter().map(|j| j.to_spec(project, vars)).collect()
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
