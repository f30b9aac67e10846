// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process image endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

use super::request::ProcessImageRequest;
use super::response::ProcessImageResponse;
use crate::api::errors::{ApiError, ApiErrorResponse};
use crate::api::http_server::AppState;
use crate::api::response_formatter::{FormattedJson, JsonFormat};

/// Characters of the image payload echoed at trace level
const IMAGE_PREVIEW_CHARS: usize = 64;

/// POST /process-image - Process an image and its object positions
///
/// # Request
/// - `imageData`: Encoded image content, any JSON value (required)
/// - `objectPositions`: Object position descriptors, any JSON value (required)
///
/// # Response
/// - `processedData`: Output of the configured processor ("temp" for the
///   placeholder backend)
///
/// # Errors
/// - 400 Bad Request: Body is not JSON, not an object, or misses a key
/// - 413 Payload Too Large: Body exceeds the configured limit
/// - 415 Unsupported Media Type: Content type is not `application/json`
/// - 500 Internal Server Error: Processor failed
pub async fn process_image_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessImageRequest>, JsonRejection>,
) -> Result<FormattedJson<ProcessImageResponse>, ApiErrorResponse> {
    info!("Process image request received");

    // 1. Parse body
    let Json(request) =
        payload.map_err(|rejection| reject(ApiError::from(rejection), state.json_format))?;

    // 2. Validate request
    request
        .validate()
        .map_err(|e| reject(e, state.json_format))?;

    debug!(
        "Process image request parsed: imageData={}, objectPositions={}",
        request
            .image_summary()
            .map(|s| s.to_string())
            .unwrap_or_default(),
        describe_positions(&request)
    );
    trace!("imageData: {}", request.image_preview(IMAGE_PREVIEW_CHARS));

    // 3. Run processor
    let start = Instant::now();
    let processed = state.processor.process(&request).await.map_err(|e| {
        error!("Processor '{}' failed: {}", state.processor.name(), e);
        reject(ApiError::from(e), state.json_format)
    })?;

    info!(
        "Process image complete via '{}' in {}ms",
        state.processor.name(),
        start.elapsed().as_millis()
    );

    // 4. Build response
    Ok(FormattedJson::new(
        ProcessImageResponse::from(processed),
        state.json_format,
    ))
}

fn reject(error: ApiError, format: JsonFormat) -> ApiErrorResponse {
    let response = ApiErrorResponse::new(error, format);
    warn!(
        "Process image request rejected [{}]: {}",
        response.request_id, response.error
    );
    response
}

fn describe_positions(request: &ProcessImageRequest) -> String {
    match request.object_count() {
        Some(count) => format!("{} entries", count),
        None => "non-array value".to_string(),
    }
}
