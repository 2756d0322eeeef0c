// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lci - local CI pipeline runner

mod config;
mod error;
mod prompt;

use anyhow::Result;
use clap::Parser;
use config::{PipelineSource, STEP_TIMEOUT_ENV};
use error::CliError;
use lci_adapters::{GitAdapter, RepoAdapter, TracedRepoAdapter};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lci", version, about = "Run a project's CI pipeline locally")]
struct Cli {
    /// Project directory the steps run in
    #[arg(short, long, default_value = "", value_parser = parse_project)]
    project: PathBuf,

    /// Pipeline file (default: <project>/.lci/pipeline.toml, else the built-in Go pipeline)
    #[arg(long)]
    pipeline: Option<PathBuf>,

    /// Branch to push; prompts from the local branches when omitted
    #[arg(short, long)]
    branch: Option<String>,

    /// Log each step and command to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Accepts an empty path so the run reports it instead of clap
fn parse_project(value: &str) -> Result<PathBuf, std::convert::Infallible> {
    Ok(PathBuf::from(value))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CliError>() {
                Some(cli_err) => eprint!("{}", cli_err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Reject a missing project before anything is looked up relative to it
    lci_engine::validate(&cli.project, &[]).map_err(|e| CliError::pipeline(e.into()))?;

    let source = config::pipeline_source(&cli.project, cli.pipeline.as_deref());
    if let PipelineSource::File(path) = &source {
        tracing::info!(path = %path.display(), "loading pipeline file");
    }
    let pipeline = config::load(&source)?;

    let mut vars = HashMap::new();
    vars.insert("project".to_string(), cli.project.display().to_string());
    if let Some(branch) = resolve_branch(&cli, pipeline.uses_var("branch")).await? {
        vars.insert("branch".to_string(), branch);
    }

    let mut steps = pipeline.steps(&cli.project, &vars);
    let env_timeout = std::env::var(STEP_TIMEOUT_ENV).ok();
    if let Some(timeout) = config::step_timeout(env_timeout.as_deref())? {
        config::apply_default_timeout(&mut steps, timeout);
    }

    lci_engine::run(&cli.project, std::io::stdout(), steps)
        .await
        .map_err(CliError::pipeline)?;
    Ok(())
}

/// `--branch`, else an interactive choice if the pipeline needs one
async fn resolve_branch(cli: &Cli, needed: bool) -> Result<Option<String>> {
    if let Some(branch) = &cli.branch {
        return Ok(Some(branch.clone()));
    }
    if !needed {
        return Ok(None);
    }

    let branches = list_branches(&cli.project).await?;
    let stdin = std::io::stdin();
    let branch = prompt::choose_branch(&branches, stdin.lock(), std::io::stderr())?;
    Ok(Some(branch))
}

async fn list_branches(project: &Path) -> Result<Vec<String>> {
    let repo = TracedRepoAdapter::new(GitAdapter::new(project.to_path_buf()));
    repo.branches().await.map_err(|e| {
        CliError::new(format!("cannot list branches in {}", project.display()))
            .with_context(e.to_string())
            .with_suggestion("Pass the branch directly: lci --branch <name>")
            .with_source(e)
            .into()
    })
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("LCI_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
