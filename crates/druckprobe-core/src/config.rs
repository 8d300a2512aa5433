// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Probe configuration.
//
// Defaults match the local POS development layout. Environment overrides
// are parsed fail-closed: a variable that is set but empty or malformed is
// a configuration error, never silently ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DruckprobeError, Result};

/// Environment variable overriding the POS print server base URL.
pub const ENV_PRINT_SERVER_URL: &str = "DRUCKPROBE_PRINT_SERVER_URL";
/// Environment variable overriding the standalone silent-print server base URL.
pub const ENV_SILENT_SERVER_URL: &str = "DRUCKPROBE_SILENT_SERVER_URL";
/// Environment variable overriding the POS frontend base URL.
pub const ENV_FRONTEND_URL: &str = "DRUCKPROBE_FRONTEND_URL";
/// Environment variable overriding the per-request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "DRUCKPROBE_TIMEOUT_SECS";

/// Probe targets and timing budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Base URL of the POS print server backend.
    pub print_server_url: String,
    /// Base URL of the standalone silent-print server.
    pub silent_server_url: String,
    /// Base URL of the POS frontend.
    pub frontend_url: String,
    /// Health endpoint path on the target server.
    pub health_path: String,
    /// Pre-flight health probe budget in seconds.
    pub health_timeout_secs: u64,
    /// Per-case request budget in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            print_server_url: "http://localhost:3001".into(),
            silent_server_url: "http://localhost:3000".into(),
            frontend_url: "http://localhost:8080".into(),
            health_path: "/health".into(),
            health_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

impl ProbeConfig {
    /// Defaults with `DRUCKPROBE_*` environment overrides applied.
    ///
    /// The health timeout is a fixed budget and takes no override; a slow
    /// health answer means the server is not ready, full stop.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = read_env(ENV_PRINT_SERVER_URL)? {
            config.print_server_url = url;
        }
        if let Some(url) = read_env(ENV_SILENT_SERVER_URL)? {
            config.silent_server_url = url;
        }
        if let Some(url) = read_env(ENV_FRONTEND_URL)? {
            config.frontend_url = url;
        }
        if let Some(raw) = read_env(ENV_TIMEOUT_SECS)? {
            config.request_timeout_secs = parse_timeout(ENV_TIMEOUT_SECS, &raw)?;
        }
        Ok(config)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Read an environment variable, rejecting set-but-empty values.
fn read_env(key: &str) -> Result<Option<String>> {
    match std::env::var(key) {
        Ok(value) => non_empty(key, &value).map(Some),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(DruckprobeError::Config(format!(
            "{key} is not valid UTF-8"
        ))),
    }
}

/// Trim a variable's value, rejecting the empty string.
fn non_empty(key: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DruckprobeError::Config(format!("{key} is set but empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a timeout override. Zero is rejected: a zero budget would fail
/// every request before it leaves the socket.
fn parse_timeout(key: &str, raw: &str) -> Result<u64> {
    let secs: u64 = raw.parse().map_err(|_| {
        DruckprobeError::Config(format!("{key} must be an integer number of seconds, got '{raw}'"))
    })?;
    if secs == 0 {
        return Err(DruckprobeError::Config(format!("{key} must be at least 1")));
    }
    Ok(secs)
}
