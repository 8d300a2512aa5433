// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed request payloads for the silent-print endpoint.
//
// The endpoint takes a JSON object with exactly one content source (base64
// HTML or a URL), an output format, and nested render options. Payloads are
// built as explicit structs and validated before serialization, so a
// contract-violating request can only be produced on purpose.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::Value;

use druckprobe_core::error::{DruckprobeError, Result};
use druckprobe_core::types::{PageSize, PrintFormat};

/// Encode HTML markup the way the silent-print endpoint expects it.
pub fn encode_markup(markup: &str) -> String {
    BASE64.encode(markup.as_bytes())
}

/// Render and spool options forwarded to the print server.
///
/// Absent fields are omitted from the wire object so the server applies its
/// own defaults.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    /// Spool target; the server falls back to its default printer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copies: Option<u32>,
    /// Render width in pixels, for png output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Render height in pixels, for png output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
}

/// A silent-print submission: one content source plus render options.
#[derive(Debug, Clone, Serialize)]
pub struct SilentPrintRequest {
    /// Base64-encoded HTML markup to render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Public URL to fetch and render instead of inline markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub format: PrintFormat,
    pub options: PrintOptions,
}

impl SilentPrintRequest {
    /// Build a request from inline HTML markup (encoded on the way in).
    pub fn from_html(markup: &str, format: PrintFormat) -> Self {
        Self {
            html: Some(encode_markup(markup)),
            url: None,
            format,
            options: PrintOptions::default(),
        }
    }

    /// Build a request that renders a remote URL.
    pub fn from_url(url: impl Into<String>, format: PrintFormat) -> Self {
        Self {
            html: None,
            url: Some(url.into()),
            format,
            options: PrintOptions::default(),
        }
    }

    /// Attach render options.
    #[must_use]
    pub fn with_options(mut self, options: PrintOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the invariants the server enforces with a 400.
    ///
    /// `html` and `url` are mutually exclusive and one must be present.
    /// Copies and pixel dimensions must be non-zero when given.
    pub fn validate(&self) -> Result<()> {
        match (&self.html, &self.url) {
            (Some(_), Some(_)) => {
                return Err(DruckprobeError::InvalidPayload(
                    "html and url are mutually exclusive".into(),
                ));
            }
            (None, None) => {
                return Err(DruckprobeError::InvalidPayload(
                    "one of html or url is required".into(),
                ));
            }
            _ => {}
        }
        if self.options.copies == Some(0) {
            return Err(DruckprobeError::InvalidPayload(
                "copies must be at least 1".into(),
            ));
        }
        if self.options.width == Some(0) || self.options.height == Some(0) {
            return Err(DruckprobeError::InvalidPayload(
                "width and height must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Validate, then serialize to the wire JSON object.
    pub fn to_value(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}
