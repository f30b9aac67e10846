// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the image processing node

use crate::api::http_server::PROCESS_IMAGE_ROUTE;

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Package name as published
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Routes served by this version, as (method, path)
pub const ROUTES: &[(&str, &str)] = &[("POST", PROCESS_IMAGE_ROUTE)];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("{} {}", PACKAGE_NAME, VERSION_NUMBER)
}

/// Get full version info for diagnostics
pub fn get_version_info() -> serde_json::Value {
    let routes: Vec<String> = ROUTES
        .iter()
        .map(|(method, path)| format!("{} {}", method, path))
        .collect();

    serde_json::json!({
        "name": PACKAGE_NAME,
        "version": VERSION_NUMBER,
        "routes": routes,
    })
}
