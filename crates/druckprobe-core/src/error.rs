// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Druckprobe.

use thiserror::Error;

/// Top-level error type for all Druckprobe operations.
#[derive(Debug, Error)]
pub enum DruckprobeError {
    // -- Payload construction --
    #[error("invalid print payload: {0}")]
    InvalidPayload(String),

    // -- Transport --
    #[error("request failed: {0}")]
    Request(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Serialization --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DruckprobeError>;
