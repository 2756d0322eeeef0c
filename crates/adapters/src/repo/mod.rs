// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository adapters

mod git;

pub use git::GitAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRepoAdapter;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from repo operations
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("no branches found")]
    NoBranches,
}

/// Adapter for repository queries
#[async_trait]
pub trait RepoAdapter: Clone + Send + Sync + 'static {
    /// List local branch names
    async fn branches(&self) -> Result<Vec<String>, RepoError>;
}
