// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use image_processing_node::{
    api::start_server,
    config::ServerConfig,
    processing::{ImageProcessor, PlaceholderProcessor},
    version,
};
use std::{env, sync::Arc};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Loads .env before reading RUST_LOG below
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting {}", version::get_version_string());
    debug!("Build info: {}", version::get_version_info());
    debug!("Configuration: {:?}", config);

    let processor: Arc<dyn ImageProcessor> = Arc::new(PlaceholderProcessor);
    info!("Image processor: {}", processor.name());
    info!(
        "CORS: {}",
        if config.allows_any_origin() {
            "any origin".to_string()
        } else {
            config.cors_allowed_origins.join(", ")
        }
    );

    start_server(config, processor).await
}
