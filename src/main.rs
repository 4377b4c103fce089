// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GymBro API Server
//!
//! Serves the fitness-coaching API: accounts and profiles in Firestore,
//! workout and nutrition guidance from a hosted generative model.

use gymbro::{config::Config, db::FirestoreDb, services::AiService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        e
    })?;
    tracing::info!(port = config.port, model = %config.gemini_model, "Starting GymBro API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to Firestore");
            e
        })?;

    let ai = AiService::new(&config);
    tracing::info!(base_url = %config.gemini_base_url, "Generative API client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        ai,
    });

    // Build router
    let app = gymbro::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gymbro=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .try_init()?;
    Ok(())
}
