// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::post, Router};
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::process_image::process_image_handler;
use super::response_formatter::JsonFormat;
use crate::config::ServerConfig;
use crate::processing::{ImageProcessor, PlaceholderProcessor};

/// Route served by the image processing endpoint
pub const PROCESS_IMAGE_ROUTE: &str = "/process-image";

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<dyn ImageProcessor>,
    pub json_format: JsonFormat,
}

impl AppState {
    pub fn new(processor: Arc<dyn ImageProcessor>, json_format: JsonFormat) -> Self {
        Self {
            processor,
            json_format,
        }
    }

    pub fn from_config(processor: Arc<dyn ImageProcessor>, config: &ServerConfig) -> Self {
        Self::new(processor, config.json_format())
    }

    /// Placeholder processor with the default JSON format
    pub fn new_for_test() -> Self {
        Self::new(Arc::new(PlaceholderProcessor), JsonFormat::default())
    }
}

/// Build the CORS layer for the configured origins
///
/// A `*` entry anywhere in the list allows every origin.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = &config.cors_allowed_origins;
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        // Origins are checked by ServerConfig::validate; skip any that slipped through.
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect::<Vec<_>>(),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let body_limit = match config.max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route(PROCESS_IMAGE_ROUTE, post(process_image_handler))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

/// Serve `app` on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("listener has no local address")?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server terminated with an error")?;

    info!("API server on {} stopped", addr);
    Ok(())
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
pub async fn start_server(config: ServerConfig, processor: Arc<dyn ImageProcessor>) -> Result<()> {
    let addr = config.socket_addr()?;
    let state = AppState::from_config(processor, &config);
    let app = create_app(state, &config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    serve(listener, app, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
