// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared support for the probe binaries: logging setup and the console rule.

/// Initialise tracing with env-filter control.
///
/// Defaults to warnings only, keeping stdout for the rendered report; set
/// `RUST_LOG=debug` to watch individual exchanges.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

/// Horizontal rule printed between report sections.
pub fn rule() -> String {
    "=".repeat(50)
}
