// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response body formatting tests
//!
//! Bodies are pretty-printed by default and follow the JSON_* settings of
//! ServerConfig for both success and error responses.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use image_processing_node::{
    api::http_server::{create_app, AppState},
    config::ServerConfig,
    processing::PlaceholderProcessor,
};
use std::sync::Arc;
use tower::util::ServiceExt;

async fn raw_body(config: ServerConfig, body: &str) -> (StatusCode, String) {
    let state = AppState::from_config(Arc::new(PlaceholderProcessor), &config);
    let app = create_app(state, &config);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/process-image")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

const VALID: &str = r#"{"imageData": "abc123==", "objectPositions": [{"x":1,"y":2}]}"#;

#[cfg(test)]
mod json_formatting_tests {
    use super::*;

    #[tokio::test]
    async fn test_default_body_is_pretty_printed() {
        let (status, body) = raw_body(ServerConfig::default(), VALID).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{\n  \"processedData\": \"temp\"\n}\n");
        assert!(body.lines().count() > 1);
    }

    #[tokio::test]
    async fn test_compact_body_when_pretty_disabled() {
        let config = ServerConfig {
            json_pretty: false,
            ..ServerConfig::default()
        };
        let (_, body) = raw_body(config, VALID).await;

        assert_eq!(body, r#"{"processedData":"temp"}"#);
    }

    #[tokio::test]
    async fn test_error_body_is_pretty_printed() {
        let (status, body) = raw_body(ServerConfig::default(), r#"{"objectPositions": []}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("{\n  \"errorType\": \"validation_error\",\n"));
        assert!(body.ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_error_body_key_order_follows_declaration() {
        let config = ServerConfig {
            json_pretty: false,
            ..ServerConfig::default()
        };
        let (_, body) = raw_body(config, r#"{"objectPositions": []}"#).await;

        let error_type = body.find("\"errorType\"").unwrap();
        let message = body.find("\"message\"").unwrap();
        let request_id = body.find("\"requestId\"").unwrap();
        assert!(error_type < message && message < request_id);
    }

    #[tokio::test]
    async fn test_sorted_error_body_keys() {
        let config = ServerConfig {
            json_pretty: false,
            json_sort_keys: true,
            ..ServerConfig::default()
        };
        let (_, body) = raw_body(config, r#"{"objectPositions": []}"#).await;

        let details = body.find("\"details\"").unwrap();
        let error_type = body.find("\"errorType\"").unwrap();
        let message = body.find("\"message\"").unwrap();
        assert!(details < error_type && error_type < message);
    }
}
