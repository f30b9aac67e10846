// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image processing backends
//!
//! The HTTP layer only talks to [`ImageProcessor`]. The shipped backend,
//! [`PlaceholderProcessor`], performs no work on the image and answers every
//! request with a fixed value.

use async_trait::async_trait;
use thiserror::Error;

use crate::api::process_image::ProcessImageRequest;

/// Value returned by [`PlaceholderProcessor`] for every request
pub const PLACEHOLDER_OUTPUT: &str = "temp";

/// Errors a processing backend can report
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The request was well-formed JSON but unusable by this backend
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing failed: {0}")]
    Failed(String),
}

/// Output of a processing backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub processed_data: String,
}

#[async_trait]
pub trait ImageProcessor: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    async fn process(
        &self,
        request: &ProcessImageRequest,
    ) -> Result<ProcessedImage, ProcessingError>;
}

/// Backend that ignores its input and returns [`PLACEHOLDER_OUTPUT`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderProcessor;

#[async_trait]
impl ImageProcessor for PlaceholderProcessor {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn process(
        &self,
        _request: &ProcessImageRequest,
    ) -> Result<ProcessedImage, ProcessingError> {
        Ok(ProcessedImage {
            processed_data: PLACEHOLDER_OUTPUT.to_string(),
        })
    }
}
