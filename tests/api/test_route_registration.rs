// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route Registration tests
//!
//! These tests verify that:
//! - /process-image is registered and accepts POST
//! - Other methods on /process-image are rejected with 405
//! - No other routes exist

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use image_processing_node::{
    api::http_server::{create_app, AppState, PROCESS_IMAGE_ROUTE},
    config::ServerConfig,
};
use tower::util::ServiceExt;

async fn status_for(method: Method, uri: &str) -> StatusCode {
    let app = create_app(AppState::new_for_test(), &ServerConfig::default());
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(r#"{"imageData": "x", "objectPositions": []}"#))
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}

#[cfg(test)]
mod route_registration_tests {
    use super::*;

    #[test]
    fn test_route_path() {
        assert_eq!(PROCESS_IMAGE_ROUTE, "/process-image");
    }

    #[tokio::test]
    async fn test_process_image_route_accepts_post() {
        assert_eq!(
            status_for(Method::POST, "/process-image").await,
            StatusCode::OK,
            "POST requests should be accepted"
        );
    }

    #[tokio::test]
    async fn test_process_image_route_rejects_other_methods() {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            assert_eq!(
                status_for(method.clone(), "/process-image").await,
                StatusCode::METHOD_NOT_ALLOWED,
                "{} requests should be rejected with 405",
                method
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_routes_not_found() {
        for uri in ["/", "/health", "/process", "/process-image/extra", "/v1/process-image"] {
            assert_eq!(
                status_for(Method::POST, uri).await,
                StatusCode::NOT_FOUND,
                "{} should not be routed",
                uri
            );
        }
    }
}
