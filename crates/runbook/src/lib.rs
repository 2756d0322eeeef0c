// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pipeline definition files
//!
//! A pipeline file declares steps as `[step.<name>]` tables. Declaration order
//! is execution order.

pub mod builtin;
mod parser;
mod pipeline;
mod template;

pub use parser::{load_pipeline, parse_pipeline, ParseError};
pub use pipeline::{JobDef, KindDef, PipelineDef};
pub use template::{interpolate, placeholders};
