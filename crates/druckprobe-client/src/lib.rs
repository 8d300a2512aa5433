// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckprobe Client — typed silent-print payloads, tolerant response
// decoding, and the reqwest-based probe clients for the print server and
// POS frontend.

pub mod client;
pub mod payload;
pub mod response;

pub use client::{FrontendClient, Observation, PrintServerClient};
pub use payload::{PrintOptions, SilentPrintRequest};
pub use response::{
    FrontendStatus, HealthResponse, PrinterCapabilities, PrinterInfo, PrintersResponse,
    SilentPrintResponse,
};
