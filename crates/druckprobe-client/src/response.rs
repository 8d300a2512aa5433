// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed views over the print server's JSON responses.
//
// Decoding is deliberately tolerant: fields default when absent, and unknown
// capability keys are kept as raw JSON. A slightly off-contract server still
// yields a usable report line rather than a decode error.

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use druckprobe_core::types::ResponseBody;

/// Decode a typed view from a lenient body, when it is JSON of that shape.
pub fn from_body<T: DeserializeOwned>(body: &ResponseBody) -> Option<T> {
    match body {
        ResponseBody::Json(value) => serde_json::from_value(value.clone()).ok(),
        ResponseBody::Text(_) => None,
    }
}

/// `GET /health` response shape.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    /// Server uptime in seconds.
    #[serde(default)]
    pub uptime: f64,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Capability flags advertised for a printer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrinterCapabilities {
    #[serde(default)]
    pub thermal: bool,
    /// Capability keys this harness does not interpret.
    #[serde(flatten)]
    pub other: HashMap<String, Value>,
}

/// One printer as reported by `GET /api/printers`.
#[derive(Debug, Clone, Deserialize)]
pub struct PrinterInfo {
    pub name: String,
    #[serde(default)]
    pub capabilities: PrinterCapabilities,
}

impl PrinterInfo {
    /// Label used in report lines.
    pub fn kind_label(&self) -> &'static str {
        if self.capabilities.thermal {
            "Thermal"
        } else {
            "Standard"
        }
    }
}

/// `GET /api/printers` response shape.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub printers: Vec<PrinterInfo>,
}

/// `POST /api/print/silent` response shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SilentPrintResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of probing the POS frontend's root URL.
#[derive(Debug, Clone)]
pub struct FrontendStatus {
    pub status: u16,
    pub content_type: Option<String>,
}

impl FrontendStatus {
    pub fn is_accessible(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
