// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod processing;
pub mod version;

pub use api::{create_app, start_server, AppState, ProcessImageRequest, ProcessImageResponse};
pub use config::{ConfigError, ServerConfig};
pub use processing::{ImageProcessor, PlaceholderProcessor, ProcessedImage, ProcessingError};
