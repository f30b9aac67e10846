// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process image request types and validation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::api::errors::ApiError;

/// Request for image processing
///
/// Read through a JSON object map, so a key that is present always yields
/// `Some` (even for `null`) and a repeated key keeps its last value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct ProcessImageRequest {
    /// Encoded image content, usually base64 text or a data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<Value>,

    /// Position descriptors for the objects in the image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_positions: Option<Value>,
}

impl From<Map<String, Value>> for ProcessImageRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            image_data: body.remove("imageData"),
            object_positions: body.remove("objectPositions"),
        }
    }
}

impl ProcessImageRequest {
    pub fn new(image_data: Value, object_positions: Value) -> Self {
        Self {
            image_data: Some(image_data),
            object_positions: Some(object_positions),
        }
    }

    /// Validate the process image request
    ///
    /// Both keys must be present. Their values are not inspected.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.image_data.is_none() {
            return Err(ApiError::ValidationError {
                field: "imageData".to_string(),
                message: "imageData is required".to_string(),
            });
        }

        if self.object_positions.is_none() {
            return Err(ApiError::ValidationError {
                field: "objectPositions".to_string(),
                message: "objectPositions is required".to_string(),
            });
        }

        Ok(())
    }

    /// Describe the image payload without decoding it
    pub fn image_summary(&self) -> Option<ImagePayloadSummary> {
        self.image_data.as_ref().map(ImagePayloadSummary::from_value)
    }

    /// Number of position descriptors, when `objectPositions` is an array
    pub fn object_count(&self) -> Option<usize> {
        match self.object_positions.as_ref()? {
            Value::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Leading part of the image payload for trace output
    pub fn image_preview(&self, max_chars: usize) -> String {
        match &self.image_data {
            Some(Value::String(s)) => truncate_chars(s, max_chars),
            Some(other) => truncate_chars(&other.to_string(), max_chars),
            None => String::new(),
        }
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// What kind of value was sent as `imageData`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayloadKind {
    /// `data:<media type>[;base64],...`
    DataUrl { media_type: String },
    /// Any other string, typically bare base64
    Text,
    /// A non-string JSON value, with its JSON type name
    Other(&'static str),
}

/// Diagnostic summary of an image payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayloadSummary {
    pub kind: ImagePayloadKind,
    /// Length in bytes, for string payloads
    pub length: Option<usize>,
}

impl ImagePayloadSummary {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => {
                let kind = match s.strip_prefix("data:") {
                    Some(rest) => {
                        let end = rest.find([';', ',']).unwrap_or(rest.len());
                        ImagePayloadKind::DataUrl {
                            media_type: rest[..end].to_string(),
                        }
                    }
                    None => ImagePayloadKind::Text,
                };
                Self {
                    kind,
                    length: Some(s.len()),
                }
            }
            other => Self {
                kind: ImagePayloadKind::Other(json_type_name(other)),
                length: None,
            },
        }
    }
}

impl fmt::Display for ImagePayloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, self.length) {
            (ImagePayloadKind::DataUrl { media_type }, Some(len)) => {
                write!(f, "data URL ({}), {} bytes", media_type, len)
            }
            (ImagePayloadKind::Text, Some(len)) => write!(f, "string, {} bytes", len),
            (ImagePayloadKind::Other(name), _) => write!(f, "JSON {}", name),
            (_, None) => write!(f, "string"),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
