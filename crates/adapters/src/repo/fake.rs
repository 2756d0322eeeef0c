// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake repository adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{RepoAdapter, RepoError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Fake repository adapter returning a fixed branch list
#[derive(Clone, Default)]
pub struct FakeRepoAdapter {
    branches: Arc<Mutex<Vec<String>>>,
}

impl FakeRepoAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branches<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: Arc::new(Mutex::new(branches.into_iter().map(Into::into).collect())),
        }
    }
}

#[async_trait]
impl RepoAdapter for FakeRepoAdapter {
    async fn branches(&self) -> Result<Vec<String>, RepoError> {
        let branches = self
            .branches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if branches.is_empty() {
            return Err(RepoError::NoBranches);
        }
        Ok(branches)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
