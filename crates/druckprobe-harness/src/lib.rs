// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckprobe Harness — sequential case runner, the canonical probe suites,
// POS integration steps, and plain-text report rendering.  This crate turns
// the HTTP plumbing in `druckprobe-client` into pass/fail verdicts.

pub mod pos;
pub mod receipt;
pub mod report;
pub mod runner;
pub mod suites;

pub use runner::{classify, run_all, run_case};
