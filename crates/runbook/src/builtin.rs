// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipelines that ship with the binary

use crate::{JobDef, PipelineDef};
use std::time::Duration;

/// Deadline for pushing to the remote
pub const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Build, lint, test, format-check, then push `{branch}` to origin
pub fn go_pipeline() -> PipelineDef {
    PipelineDef::new(vec![
        JobDef::new("go build", "go", ["build", "."], "GO Build: SUCCESS"),
        JobDef::new("go lint", "golangci-lint", ["run"], "GO Lint: SUCCESS"),
        JobDef::new("go test", "go", ["test", "-v"], "GO Test: SUCCESS"),
        JobDef::new("go fmt", "gofmt", ["-l", "."], "GO Fmt: SUCCESS").silent(),
        JobDef::new("git push", "git", ["push", "origin", "{branch}"], "Git Push: SUCCESS")
            .with_timeout(PUSH_TIMEOUT),
    ])
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
