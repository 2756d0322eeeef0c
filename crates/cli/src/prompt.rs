// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive branch selection

use crate::error::CliError;
use std::io::{BufRead, Write};

/// List `branches` as `[n] name` and read a 1-based choice from `input`
pub fn choose_branch<R, W>(branches: &[String], mut input: R, mut out: W) -> anyhow::Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Select a branch to push:")?;
    for (i, branch) in branches.iter().enumerate() {
        writeln!(out, "[{}] {}", i + 1, branch)?;
    }
    write!(out, "> ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();

    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| branches.get(i))
        .cloned()
        .ok_or_else(|| CliError::invalid_branch_choice(answer, branches.len()).into())
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
