// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Druckprobe probe harness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for a probe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output format requested from the silent-print endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintFormat {
    Pdf,
    Png,
}

/// Standard page sizes the silent-print endpoint accepts by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

/// Expected outcome category for a probe case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expectation {
    /// The server must accept the request: 200 with `success: true`.
    Success,
    /// The server must reject the request with a 4xx/5xx status.
    Failure,
    /// Judged like `Success`, but a miss is reported as a warning and
    /// never vetoes readiness. Used for steps that depend on the server's
    /// rendering environment rather than its API contract.
    Advisory,
}

/// HTTP verbs the harness issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// The request half of a probe case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRequest {
    pub method: HttpMethod,
    /// Path relative to the target base URL, with leading slash.
    pub path: String,
    /// JSON body for POST cases.
    pub body: Option<Value>,
}

impl CaseRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A single black-box probe: one request, one expected outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Name shown in the report.
    pub name: String,
    pub request: CaseRequest,
    pub expectation: Expectation,
    /// Whether this case counts toward the run's readiness verdict.
    pub required: bool,
}

/// A response body decoded leniently: JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Decode a raw body, keeping the text as-is when it is not JSON.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    /// The boolean `success` field, when the body is a JSON object carrying one.
    pub fn success_flag(&self) -> Option<bool> {
        match self {
            Self::Json(value) => value.get("success").and_then(Value::as_bool),
            Self::Text(_) => None,
        }
    }
}

/// The observed outcome of a single probe case.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Case name, copied from the probe that produced this result.
    pub name: String,
    /// HTTP status, absent when the request never reached the server.
    pub status: Option<u16>,
    /// Wall-clock duration of the exchange in milliseconds.
    pub duration_ms: u64,
    /// Decoded response body, absent when no body was captured.
    pub body: Option<ResponseBody>,
    /// Whether the observed outcome matched the expectation.
    pub passed: bool,
    /// The expectation this result was judged against.
    pub expectation: Expectation,
    /// Whether this case counts toward readiness.
    pub required: bool,
    /// Transport error detail when no response was observed.
    pub error: Option<String>,
}

impl TestResult {
    /// A failing result for a request that produced no HTTP response.
    pub fn transport_failure(
        name: impl Into<String>,
        expectation: Expectation,
        required: bool,
        duration_ms: u64,
        error: String,
    ) -> Self {
        Self {
            name: name.into(),
            status: None,
            duration_ms,
            body: None,
            passed: false,
            expectation,
            required,
            error: Some(error),
        }
    }

    /// A missed advisory expectation: reported, but not a failure.
    pub fn is_warning(&self) -> bool {
        !self.passed && self.expectation == Expectation::Advisory
    }

    /// A missed non-advisory expectation.
    pub fn is_failure(&self) -> bool {
        !self.passed && self.expectation != Expectation::Advisory
    }
}

/// Ordered results of a probe run with an overall readiness verdict.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: RunId,
    /// Base URL the run was aimed at.
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Results in execution order, one per attempted case.
    pub results: Vec<TestResult>,
}

impl RunSummary {
    pub fn new(target: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            run_id: RunId::new(),
            target: target.into(),
            started_at: now,
            finished_at: now,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Stamp the end of the run.
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn warnings(&self) -> usize {
        self.results.iter().filter(|r| r.is_warning()).count()
    }

    /// True when every required case passed. Advisory misses and optional
    /// cases never veto readiness.
    pub fn ready(&self) -> bool {
        self.results.iter().filter(|r| r.required).all(|r| r.passed)
    }
}
