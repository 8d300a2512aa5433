// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// POS integration probe steps.
//
// The integration pipeline is fixed: backend health → printer discovery →
// silent receipt submission, then frontend availability, then the
// end-to-end workflow rerun. Two endpoints carry no `success` flag and get
// bespoke verdicts here: health passes on `status: "healthy"`, the frontend
// on any 2xx. Receipt submissions render through the server's headless
// browser, so a rendering miss is a warning, not a failure.

use std::time::Instant;

use chrono::{DateTime, Utc};

use druckprobe_client::client::{FrontendClient, PRINTERS_PATH, PrintServerClient, SILENT_PRINT_PATH};
use druckprobe_client::payload::{PrintOptions, SilentPrintRequest};
use druckprobe_client::response::{HealthResponse, PrintersResponse, from_body};
use druckprobe_core::error::Result;
use druckprobe_core::types::{CaseRequest, Expectation, PageSize, PrintFormat, TestCase, TestResult};

use crate::receipt;

/// Spool target when discovery reports no printers; the server resolves it
/// to its own default device.
pub const FALLBACK_PRINTER: &str = "default";

/// Probe the backend health endpoint.
///
/// The health body carries no `success` flag, so the verdict is bespoke:
/// 200 plus `status: "healthy"`. The decoded body is returned so callers
/// can surface the uptime.
pub async fn backend_health(
    client: &PrintServerClient,
    health_path: &str,
) -> (TestResult, Option<HealthResponse>) {
    let case_name = "Print Server Health";
    let start = Instant::now();
    match client.send(&CaseRequest::get(health_path)).await {
        Ok(observed) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            let health: Option<HealthResponse> = from_body(&observed.body);
            let healthy = observed.status == 200
                && health.as_ref().map(HealthResponse::is_healthy).unwrap_or(false);
            let result = TestResult {
                name: case_name.into(),
                status: Some(observed.status),
                duration_ms,
                body: Some(observed.body),
                passed: healthy,
                expectation: Expectation::Success,
                required: true,
                error: None,
            };
            (result, health)
        }
        Err(e) => (
            TestResult::transport_failure(
                case_name,
                Expectation::Success,
                true,
                start.elapsed().as_millis() as u64,
                e.to_string(),
            ),
            None,
        ),
    }
}

/// Case for `GET /api/printers`. The standard verdict applies.
pub fn discovery_case(name: &str, required: bool) -> TestCase {
    TestCase {
        name: name.into(),
        request: CaseRequest::get(PRINTERS_PATH),
        expectation: Expectation::Success,
        required,
    }
}

/// First discovered printer name, or the fallback target.
pub fn spool_target(printers: Option<&PrintersResponse>) -> String {
    printers
        .and_then(|p| p.printers.first())
        .map(|p| p.name.clone())
        .unwrap_or_else(|| FALLBACK_PRINTER.to_string())
}

/// Case submitting the sample receipt to the silent-print endpoint.
///
/// Advisory: the submission must be accepted for the step to pass, but a
/// miss never vetoes readiness.
pub fn receipt_submission_case(
    name: &str,
    printer: &str,
    page_size: Option<PageSize>,
    now: DateTime<Utc>,
) -> Result<TestCase> {
    let order = receipt::sample_order(now);
    let body = SilentPrintRequest::from_html(&receipt::receipt_html(&order), PrintFormat::Pdf)
        .with_options(PrintOptions {
            printer: Some(printer.to_string()),
            copies: Some(1),
            page_size,
            ..Default::default()
        })
        .to_value()?;
    Ok(TestCase {
        name: name.into(),
        request: CaseRequest::post(SILENT_PRINT_PATH, body),
        expectation: Expectation::Advisory,
        required: false,
    })
}

/// Probe the POS frontend root. Passes on any 2xx answer; the served
/// content type is returned for display.
pub async fn frontend_availability(client: &FrontendClient) -> (TestResult, Option<String>) {
    let case_name = "POS Frontend Availability";
    let start = Instant::now();
    match client.availability().await {
        Ok(frontend) => {
            let result = TestResult {
                name: case_name.into(),
                status: Some(frontend.status),
                duration_ms: start.elapsed().as_millis() as u64,
                body: None,
                passed: frontend.is_accessible(),
                expectation: Expectation::Success,
                required: true,
                error: None,
            };
            (result, frontend.content_type)
        }
        Err(e) => (
            TestResult::transport_failure(
                case_name,
                Expectation::Success,
                true,
                start.elapsed().as_millis() as u64,
                e.to_string(),
            ),
            None,
        ),
    }
}
