// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process image response types

use serde::{Deserialize, Serialize};

use crate::processing::ProcessedImage;

/// Response from image processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageResponse {
    /// Processed image data produced by the backend
    pub processed_data: String,
}

impl ProcessImageResponse {
    pub fn new(processed_data: impl Into<String>) -> Self {
        Self {
            processed_data: processed_data.into(),
        }
    }
}

impl From<ProcessedImage> for ProcessImageResponse {
    fn from(image: ProcessedImage) -> Self {
        Self::new(image.processed_data)
    }
}
