// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

pub mod annot;
pub mod config;
pub mod errors;
pub mod logging;
pub mod report;
mod runner;
pub mod seq;

pub use crate::runner::{classify_file, RunSummary};

use crate::errors::TfError;

pub fn run() -> Result<(), TfError> {
    runner::run()
}
