// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! JSON body formatting for API responses
//!
//! Every body the service writes, success or error, goes through
//! [`JsonFormat`] so that layout, escaping and key order are decided in one
//! place and driven by configuration.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use tracing::error;

/// Layout and escaping policy for JSON bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonFormat {
    /// Multi-line output with two-space indentation
    pub pretty: bool,
    /// Escape every non-ASCII character as `\uXXXX`
    pub ascii_only: bool,
    /// Emit object keys in lexicographic order instead of declaration order
    pub sort_keys: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self {
            pretty: true,
            ascii_only: false,
            sort_keys: false,
        }
    }
}

impl JsonFormat {
    /// Serialize `value` according to this format
    pub fn to_vec<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = if self.sort_keys {
            let sorted = sort_keys(serde_json::to_value(value)?);
            self.write(&sorted)?
        } else {
            self.write(value)?
        };

        if self.ascii_only {
            out = escape_non_ascii(&out);
        }
        if self.pretty {
            out.push('\n');
        }

        Ok(out.into_bytes())
    }

    fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

/// Rebuild every object in `value` with its keys in sorted order
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Non-ASCII characters only occur inside JSON strings, so escaping them in
/// the serialized text yields an equivalent document.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
    }
    out
}

/// JSON responder that honours a [`JsonFormat`]
#[derive(Debug, Clone)]
pub struct FormattedJson<T> {
    pub status: StatusCode,
    pub value: T,
    pub format: JsonFormat,
}

impl<T> FormattedJson<T> {
    pub fn new(value: T, format: JsonFormat) -> Self {
        Self::with_status(StatusCode::OK, value, format)
    }

    pub fn with_status(status: StatusCode, value: T, format: JsonFormat) -> Self {
        Self {
            status,
            value,
            format,
        }
    }
}

impl<T: Serialize> IntoResponse for FormattedJson<T> {
    fn into_response(self) -> Response {
        match self.format.to_vec(&self.value) {
            Ok(body) => (
                self.status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("text/plain; charset=utf-8"),
                    )],
                    e.to_string(),
                )
                    .into_response()
            }
        }
    }
}
