// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sequential probe execution.
//
// Cases run strictly one after another, so server-side effects (spooled
// jobs, queue order) stay attributable to the case that caused them. A
// failing case is recorded and the run carries on; nothing is retried.

use std::time::Instant;

use tracing::{debug, info, warn};

use druckprobe_client::client::PrintServerClient;
use druckprobe_core::types::{Expectation, ResponseBody, RunSummary, TestCase, TestResult};

/// Judge one observed exchange against a case's expectation.
///
/// Success and advisory cases pass on 200 with `success: true` in the body;
/// expected-failure cases pass when the server rejected the request with any
/// 4xx/5xx status. Same inputs, same verdict.
pub fn classify(expectation: Expectation, status: u16, body: &ResponseBody) -> bool {
    match expectation {
        Expectation::Success | Expectation::Advisory => {
            status == 200 && body.success_flag() == Some(true)
        }
        Expectation::Failure => status >= 400,
    }
}

/// Execute one probe case and record what happened.
///
/// Transport failures become failing results with the error detail kept;
/// they never propagate.
pub async fn run_case(client: &PrintServerClient, case: &TestCase) -> TestResult {
    debug!(name = %case.name, "running probe case");
    let start = Instant::now();
    match client.send(&case.request).await {
        Ok(observed) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            let passed = classify(case.expectation, observed.status, &observed.body);
            if passed {
                debug!(name = %case.name, status = observed.status, duration_ms, "case passed");
            } else {
                warn!(name = %case.name, status = observed.status, duration_ms, "case missed its expectation");
            }
            TestResult {
                name: case.name.clone(),
                status: Some(observed.status),
                duration_ms,
                body: Some(observed.body),
                passed,
                expectation: case.expectation,
                required: case.required,
                error: None,
            }
        }
        Err(e) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            warn!(name = %case.name, error = %e, duration_ms, "case never reached the server");
            TestResult::transport_failure(
                case.name.clone(),
                case.expectation,
                case.required,
                duration_ms,
                e.to_string(),
            )
        }
    }
}

/// Execute a case list in order and summarize the run.
///
/// Every attempted case yields exactly one result, in list order.
pub async fn run_all(client: &PrintServerClient, cases: &[TestCase]) -> RunSummary {
    let mut summary = RunSummary::new(client.base_url());
    for case in cases {
        let result = run_case(client, case).await;
        summary.push(result);
    }
    summary.finish();
    info!(
        total = summary.total(),
        passed = summary.passed(),
        failed = summary.failed(),
        warnings = summary.warnings(),
        "probe run complete"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::{Value, json};

    use druckprobe_core::config::ProbeConfig;
    use druckprobe_core::types::CaseRequest;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub");
        });
        format!("http://{addr}")
    }

    fn test_config() -> ProbeConfig {
        ProbeConfig {
            health_timeout_secs: 1,
            request_timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Stub that enforces the html/url mutual-exclusion contract.
    fn silent_print_stub() -> Router {
        Router::new().route(
            "/api/print/silent",
            post(|Json(body): Json<Value>| async move {
                let has_html = body.get("html").is_some();
                let has_url = body.get("url").is_some();
                if has_html == has_url {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"success": false, "error": "provide exactly one of html or url"})),
                    )
                } else {
                    (
                        StatusCode::OK,
                        Json(json!({"success": true, "jobId": "stub-job", "message": "queued"})),
                    )
                }
            }),
        )
    }

    fn silent_case(name: &str, body: Value, expectation: Expectation) -> TestCase {
        TestCase {
            name: name.into(),
            request: CaseRequest::post("/api/print/silent", body),
            expectation,
            required: true,
        }
    }

    #[test]
    fn classification_follows_the_contract() {
        let ok = ResponseBody::decode(r#"{"success": true}"#);
        let refused = ResponseBody::decode(r#"{"success": false, "error": "bad"}"#);
        let html = ResponseBody::Text("<html></html>".into());

        assert!(classify(Expectation::Success, 200, &ok));
        assert!(!classify(Expectation::Success, 200, &refused));
        assert!(!classify(Expectation::Success, 200, &html));
        assert!(!classify(Expectation::Success, 500, &ok));

        assert!(classify(Expectation::Failure, 400, &refused));
        assert!(classify(Expectation::Failure, 500, &html));
        assert!(!classify(Expectation::Failure, 200, &ok));

        assert!(classify(Expectation::Advisory, 200, &ok));
        assert!(!classify(Expectation::Advisory, 503, &refused));
    }

    #[tokio::test]
    async fn accepted_and_rejected_cases_both_classify() {
        let base = spawn_stub(silent_print_stub()).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");

        let cases = vec![
            silent_case(
                "HTML Content Test",
                json!({"html": "PGgxPlRlc3Q8L2gxPg==", "format": "pdf", "options": {}}),
                Expectation::Success,
            ),
            silent_case(
                "Invalid Payload Test",
                json!({"html": "PGgxPlRlc3Q8L2gxPg==", "url": "https://example.com", "format": "pdf", "options": {}}),
                Expectation::Failure,
            ),
        ];

        let summary = run_all(&client, &cases).await;
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 0);
        assert!(summary.ready());
        assert_eq!(summary.results[1].status, Some(400));
    }

    #[tokio::test]
    async fn the_canonical_suite_passes_against_a_conforming_stub() {
        let base = spawn_stub(silent_print_stub()).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");

        let cases = crate::suites::silent_print_suite(chrono::Utc::now()).expect("suite builds");
        let summary = run_all(&client, &cases).await;

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.passed(), 4);
        assert!(summary.ready());
        // The contract-violation case passed by being rejected.
        assert_eq!(summary.results[2].status, Some(400));
        // The receipt template rendered to a 200 with success: true.
        assert_eq!(summary.results[3].status, Some(200));
    }

    #[tokio::test]
    async fn a_failing_case_does_not_stop_the_run() {
        let base = spawn_stub(silent_print_stub()).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");

        let cases = vec![
            // Expected to succeed but the stub rejects it: a hard failure.
            silent_case("Empty Payload", json!({"format": "pdf", "options": {}}), Expectation::Success),
            silent_case(
                "URL Test",
                json!({"url": "https://example.com", "format": "png", "options": {}}),
                Expectation::Success,
            ),
        ];

        let summary = run_all(&client, &cases).await;
        assert_eq!(summary.total(), 2);
        assert!(!summary.results[0].passed);
        assert!(summary.results[1].passed);
        assert!(!summary.ready());
    }

    #[tokio::test]
    async fn unreachable_server_yields_one_result_per_case() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client =
            PrintServerClient::new(&format!("http://{addr}"), &test_config()).expect("client");
        let cases = vec![
            silent_case("first", json!({"url": "https://example.com", "format": "pdf"}), Expectation::Success),
            silent_case("second", json!({"url": "https://example.com", "format": "png"}), Expectation::Success),
        ];

        let summary = run_all(&client, &cases).await;
        assert_eq!(summary.total(), 2);
        for result in &summary.results {
            assert!(!result.passed);
            assert_eq!(result.status, None);
            assert!(result.error.is_some());
        }
    }

    #[tokio::test]
    async fn verdicts_are_stable_across_repeat_runs() {
        let base = spawn_stub(silent_print_stub()).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");

        let cases = vec![
            silent_case(
                "HTML Content Test",
                json!({"html": "PGgxPlRlc3Q8L2gxPg==", "format": "pdf", "options": {}}),
                Expectation::Success,
            ),
            silent_case(
                "Invalid Payload Test",
                json!({"html": "x", "url": "https://example.com", "format": "pdf", "options": {}}),
                Expectation::Failure,
            ),
        ];

        let first = run_all(&client, &cases).await;
        let second = run_all(&client, &cases).await;
        let verdicts = |s: &RunSummary| s.results.iter().map(|r| r.passed).collect::<Vec<_>>();
        assert_eq!(verdicts(&first), verdicts(&second));
        assert_ne!(first.run_id, second.run_id);
    }
}
