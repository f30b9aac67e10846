// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process image API endpoint module
//!
//! Provides POST /process-image for submitting an image together with the
//! positions of the objects it shows.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::process_image_handler;
pub use request::{ImagePayloadKind, ImagePayloadSummary, ProcessImageRequest};
pub use response::ProcessImageResponse;
