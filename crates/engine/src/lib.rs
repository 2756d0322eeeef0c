// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lci step execution engine

mod orchestrator;
mod signals;
mod step;

pub use orchestrator::{run, run_steps, validate, Orchestrator};
pub use signals::ShutdownSignals;
pub use step::{build_step, Execute, PlainStep, SilentStep, TimeoutStep};
