// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async HTTP probe clients.
//
// One client per base URL. An HTTP error status is a successful observation
// (contract-violation probes expect a 4xx); only transport failures such as
// refused connections and timeouts surface as errors.

use std::time::Duration;

use tracing::{debug, instrument, warn};

use druckprobe_core::config::ProbeConfig;
use druckprobe_core::error::{DruckprobeError, Result};
use druckprobe_core::types::{CaseRequest, HttpMethod, ResponseBody};

use crate::response::FrontendStatus;

/// Path of the printer discovery endpoint.
pub const PRINTERS_PATH: &str = "/api/printers";
/// Path of the silent-print submission endpoint.
pub const SILENT_PRINT_PATH: &str = "/api/print/silent";
/// Path of the job-status listing, referenced in the closing hint.
pub const JOBS_PATH: &str = "/api/print/jobs";

/// A single observed HTTP exchange.
#[derive(Debug, Clone)]
pub struct Observation {
    pub status: u16,
    pub body: ResponseBody,
}

/// Client bound to one print server base URL.
pub struct PrintServerClient {
    base_url: String,
    health_path: String,
    health_timeout: Duration,
    http: reqwest::Client,
}

impl PrintServerClient {
    /// Build a client for the given base URL using the config's budgets.
    pub fn new(base_url: &str, config: &ProbeConfig) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            health_path: config.health_path.clone(),
            health_timeout: config.health_timeout(),
            http: build_http_client(config.request_timeout())?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path on this server.
    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Pre-flight health probe.
    ///
    /// True only when the health endpoint answers 200 within the fixed
    /// budget. Timeouts and refused connections yield `false`; the caller
    /// always gets a verdict, never an error to propagate.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn check_health(&self) -> bool {
        let url = self.url_for(&self.health_path);
        match self.http.get(&url).timeout(self.health_timeout).send().await {
            Ok(response) => {
                let healthy = response.status() == reqwest::StatusCode::OK;
                debug!(status = response.status().as_u16(), healthy, "health probe answered");
                healthy
            }
            Err(e) => {
                warn!(error = %flatten_reqwest_error(&e), "health probe got no answer");
                false
            }
        }
    }

    /// Issue one probe request and capture the exchange.
    #[instrument(skip(self, case), fields(method = %case.method, path = %case.path))]
    pub async fn send(&self, case: &CaseRequest) -> Result<Observation> {
        let url = self.url_for(&case.path);
        let mut builder = match case.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
        };
        if let Some(body) = &case.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DruckprobeError::Request(flatten_reqwest_error(&e)))?;
        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .map_err(|e| DruckprobeError::Request(format!("read body: {e}")))?;

        debug!(status, bytes = raw.len(), "probe request answered");
        Ok(Observation {
            status,
            body: ResponseBody::decode(&raw),
        })
    }
}

/// Client bound to the POS frontend's base URL.
pub struct FrontendClient {
    base_url: String,
    http: reqwest::Client,
}

impl FrontendClient {
    pub fn new(base_url: &str, config: &ProbeConfig) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: build_http_client(config.request_timeout())?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the frontend root and report status plus served content type.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn availability(&self) -> Result<FrontendStatus> {
        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|e| DruckprobeError::Request(flatten_reqwest_error(&e)))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        debug!(status, content_type = content_type.as_deref().unwrap_or("-"), "frontend answered");
        Ok(FrontendStatus { status, content_type })
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DruckprobeError::Request(format!("build http client: {e}")))
}

/// Flatten a reqwest error into a stable, single-line detail string.
fn flatten_reqwest_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::{Value, json};

    /// Serve a router on an ephemeral loopback port and return its base URL.
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

    #[tokio::test]
    async fn check_health_accepts_a_healthy_server() {
        let router = Router::new().route(
            "/health",
            get(|| async { Json(json!({"status": "healthy", "uptime": 4.2})) }),
        );
        let base = spawn_stub(router).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");
        assert!(client.check_health().await);
    }

    #[tokio::test]
    async fn check_health_is_false_when_nothing_listens() {
        // Bind then drop, so the port is known-closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client =
            PrintServerClient::new(&format!("http://{addr}"), &test_config()).expect("client");
        assert!(!client.check_health().await);
    }

    #[tokio::test]
    async fn check_health_is_false_on_non_200() {
        let router = Router::new().route(
            "/health",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "starting") }),
        );
        let base = spawn_stub(router).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");
        assert!(!client.check_health().await);
    }

    #[tokio::test]
    async fn check_health_times_out_against_a_stalled_server() {
        let router = Router::new().route(
            "/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "eventually"
            }),
        );
        let base = spawn_stub(router).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");
        assert!(!client.check_health().await);
    }

    #[tokio::test]
    async fn send_posts_json_and_reads_the_answer() {
        let router = Router::new().route(
            SILENT_PRINT_PATH,
            post(|Json(body): Json<Value>| async move {
                Json(json!({"success": true, "jobId": "j-1", "echoFormat": body["format"]}))
            }),
        );
        let base = spawn_stub(router).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");

        let case = CaseRequest::post(SILENT_PRINT_PATH, json!({"format": "pdf"}));
        let observed = client.send(&case).await.expect("observation");
        assert_eq!(observed.status, 200);
        assert_eq!(observed.body.success_flag(), Some(true));
        match observed.body {
            ResponseBody::Json(value) => assert_eq!(value["echoFormat"], "pdf"),
            ResponseBody::Text(text) => panic!("expected JSON, got text: {text}"),
        }
    }

    #[tokio::test]
    async fn send_observes_rejections_without_erroring() {
        let router = Router::new().route(
            SILENT_PRINT_PATH,
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"success": false, "error": "provide html or url, not both"})),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");

        let case = CaseRequest::post(SILENT_PRINT_PATH, json!({}));
        let observed = client.send(&case).await.expect("observation");
        assert_eq!(observed.status, 400);
        assert_eq!(observed.body.success_flag(), Some(false));
    }

    #[tokio::test]
    async fn send_keeps_non_json_bodies_as_text() {
        let router = Router::new().route("/", get(|| async { "<html><body>POS</body></html>" }));
        let base = spawn_stub(router).await;
        let client = PrintServerClient::new(&base, &test_config()).expect("client");

        let observed = client.send(&CaseRequest::get("/")).await.expect("observation");
        assert_eq!(observed.status, 200);
        assert_eq!(
            observed.body,
            ResponseBody::Text("<html><body>POS</body></html>".into())
        );
    }

    #[tokio::test]
    async fn send_errors_on_unreachable_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client =
            PrintServerClient::new(&format!("http://{addr}"), &test_config()).expect("client");
        let err = client
            .send(&CaseRequest::get(PRINTERS_PATH))
            .await
            .expect_err("transport failure");
        assert!(matches!(err, DruckprobeError::Request(_)));
    }

    #[tokio::test]
    async fn availability_captures_status_and_content_type() {
        let router = Router::new().route(
            "/",
            get(|| async {
                (
                    [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    "<!doctype html><title>POS</title>",
                )
            }),
        );
        let base = spawn_stub(router).await;
        let client = FrontendClient::new(&base, &test_config()).expect("client");

        let status = client.availability().await.expect("status");
        assert!(status.is_accessible());
        assert_eq!(
            status.content_type.as_deref(),
            Some("text/html; charset=utf-8")
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client =
            PrintServerClient::new("http://localhost:3001/", &test_config()).expect("client");
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(
            client.url_for("/api/printers"),
            "http://localhost:3001/api/printers"
        );
    }
}
