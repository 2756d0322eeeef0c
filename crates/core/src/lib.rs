// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lci-core: data model for the lci pipeline runner
//!
//! This crate provides:
//! - Step definitions and the step kinds the engine knows how to run
//! - The error taxonomy shared by every layer (step, validation, signal)

pub mod error;
pub mod signal;
pub mod step;

pub use error::{
    BoxError, DeadlineExceeded, PipelineError, SignalError, StepError, ValidationError,
};
pub use signal::Signal;
pub use step::{StepKind, StepSpec, DEFAULT_STEP_TIMEOUT};
