// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod http_server;
pub mod process_image;
pub mod response_formatter;

pub use errors::{ApiError, ApiErrorResponse, ErrorResponse};
pub use http_server::{create_app, serve, start_server, AppState, PROCESS_IMAGE_ROUTE};
pub use process_image::{process_image_handler, ProcessImageRequest, ProcessImageResponse};
pub use response_formatter::{FormattedJson, JsonFormat};
