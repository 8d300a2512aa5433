// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The canonical silent-print probe suite.
//
// Four cases in fixed order: inline HTML to pdf, a remote URL to png, a
// deliberate contract violation that must be rejected, and the thermal
// receipt template at 384x800 png. The violating body is assembled raw
// because the typed payload builder refuses to produce it.

use chrono::{DateTime, Utc};
use serde_json::json;

use druckprobe_client::client::SILENT_PRINT_PATH;
use druckprobe_client::payload::{PrintOptions, SilentPrintRequest, encode_markup};
use druckprobe_core::error::Result;
use druckprobe_core::types::{CaseRequest, Expectation, PrintFormat, TestCase};

use crate::receipt;

/// Inline markup for the first case.
const SAMPLE_HTML: &str = "<h1>Test Print Job</h1>\
<p>This is a test of the silent print endpoint with HTML content.</p>\
<ul><li>Item 1</li><li>Item 2</li><li>Item 3</li></ul>";

/// Remote page for the URL case.
const SAMPLE_URL: &str = "https://httpbin.org/html";

/// The silent-print cases, in submission order.
pub fn silent_print_suite(now: DateTime<Utc>) -> Result<Vec<TestCase>> {
    let html_body = SilentPrintRequest::from_html(SAMPLE_HTML, PrintFormat::Pdf)
        .with_options(PrintOptions {
            copies: Some(1),
            ..Default::default()
        })
        .to_value()?;

    let url_body = SilentPrintRequest::from_url(SAMPLE_URL, PrintFormat::Png)
        .with_options(PrintOptions {
            copies: Some(1),
            width: Some(800),
            height: Some(600),
            ..Default::default()
        })
        .to_value()?;

    // Both content sources at once. The server must answer 400.
    let invalid_body = json!({
        "html": encode_markup("<h1>Test</h1>"),
        "url": "https://example.com",
        "format": "pdf",
        "options": { "copies": 1 }
    });

    let receipt_body = SilentPrintRequest::from_html(&receipt::receipt_template(now), PrintFormat::Png)
        .with_options(PrintOptions {
            copies: Some(1),
            width: Some(384),
            height: Some(800),
            ..Default::default()
        })
        .to_value()?;

    Ok(vec![
        TestCase {
            name: "HTML Content Test".into(),
            request: CaseRequest::post(SILENT_PRINT_PATH, html_body),
            expectation: Expectation::Success,
            required: true,
        },
        TestCase {
            name: "URL Test".into(),
            request: CaseRequest::post(SILENT_PRINT_PATH, url_body),
            expectation: Expectation::Success,
            required: true,
        },
        TestCase {
            name: "Invalid Payload Test (should fail with 400)".into(),
            request: CaseRequest::post(SILENT_PRINT_PATH, invalid_body),
            expectation: Expectation::Failure,
            required: true,
        },
        TestCase {
            name: "Receipt Template Test".into(),
            request: CaseRequest::post(SILENT_PRINT_PATH, receipt_body),
            expectation: Expectation::Success,
            required: true,
        },
    ])
}
