// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text report rendering.
//
// The report is the binaries' stdout product: a header, one numbered line
// per case with a dot leader and a PASS/FAIL/WARN verdict, detail lines for
// anything that missed, then the counters. The readiness verdict renders
// separately so integration runs can append their phase breakdown first.

use druckprobe_core::types::{Expectation, ResponseBody, RunSummary, TestResult};

/// Column the verdicts start at, covering the longest canonical case name.
const NAME_COLUMN: usize = 48;
/// Longest response snippet shown under a missed case.
const SNIPPET_MAX: usize = 160;

/// Render the full report for a run.
pub fn render(summary: &RunSummary) -> String {
    let mut out = format!("Run: {}\n", summary.run_id);
    out.push_str(&format!(
        "Date: {}\n",
        summary.started_at.format("%d %b %Y, %l:%M %p")
    ));
    out.push_str(&format!("Target: {}\n\n", summary.target));

    for (idx, result) in summary.results.iter().enumerate() {
        out.push_str(&result_line(idx + 1, result));
        if !result.passed {
            out.push_str(&detail_line(result));
        }
    }

    out.push('\n');
    out.push_str(&counts_line(summary));
    out
}

/// Readiness verdict line for runs gated on required cases.
pub fn render_verdict(summary: &RunSummary) -> String {
    if summary.ready() {
        "Overall status: INTEGRATION READY\n".into()
    } else {
        "Overall status: ISSUES DETECTED\n".into()
    }
}

fn result_line(number: usize, result: &TestResult) -> String {
    let name = format!("{number}. {}", result.name);
    let verdict = match (result.passed, result.is_warning()) {
        (true, _) => "PASS",
        (false, true) => "WARN",
        (false, false) => "FAIL",
    };
    let outcome = match result.status {
        Some(status) if result.passed && result.expectation == Expectation::Failure => {
            format!("{verdict} ({status} rejected as expected, {}ms)", result.duration_ms)
        }
        Some(status) => format!("{verdict} ({status}, {}ms)", result.duration_ms),
        None => format!("{verdict} (no response, {}ms)", result.duration_ms),
    };
    format!("  {name} {} {outcome}\n", leader(name.len()))
}

fn leader(used: usize) -> String {
    ".".repeat(NAME_COLUMN.saturating_sub(used).max(3))
}

/// One indented line explaining what the server said (or why it never did).
fn detail_line(result: &TestResult) -> String {
    if let Some(error) = &result.error {
        return format!("     error: {error}\n");
    }
    match &result.body {
        Some(body) => format!("     response: {}\n", snippet(body)),
        None => String::new(),
    }
}

fn snippet(body: &ResponseBody) -> String {
    let raw = match body {
        ResponseBody::Json(value) => value.to_string(),
        ResponseBody::Text(text) => text.clone(),
    };
    if raw.chars().count() <= SNIPPET_MAX {
        raw
    } else {
        let cut: String = raw.chars().take(SNIPPET_MAX).collect();
        format!("{cut}...")
    }
}

fn counts_line(summary: &RunSummary) -> String {
    let mut line = format!(
        "{} run, {} passed, {} failed",
        summary.total(),
        summary.passed(),
        summary.failed()
    );
    if summary.warnings() > 0 {
        line.push_str(&format!(", {} warning(s)", summary.warnings()));
    }
    line.push('\n');
    line
}
