// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! GymBro: AI-assisted fitness coaching backend
//!
//! This crate stores user fitness profiles in Firestore and turns them into
//! prompts for a hosted generative-language API (workouts, meals, form
//! checks), relaying the model's answers back to the client.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::AiService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub ai: AiService,
}
