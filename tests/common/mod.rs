// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use gymbro::config::Config;
use gymbro::db::FirestoreDb;
use gymbro::models::{ActivityLevel, FitnessGoal, Sex, User};
use gymbro::routes::create_router;
use gymbro::services::AiService;
use gymbro::AppState;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by the in-memory store and a mock AI that
/// replays `ai_responses` in order.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_ai(ai_responses: &[&str]) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: FirestoreDb::new_in_memory(),
        ai: AiService::new_mock(ai_responses.iter().copied()),
    });

    (create_router(state.clone()), state)
}

/// Create a test app whose AI has no canned responses (every call fails).
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_ai(&[])
}

/// Create a test app whose database is offline.
#[allow(dead_code)]
pub fn create_offline_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: FirestoreDb::new_mock(),
        ai: AiService::new_mock(Vec::<String>::new()),
    });

    (create_router(state.clone()), state)
}

/// Create a test JWT token.
#[allow(dead_code)]
pub fn create_test_jwt(username: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = chrono::Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: username.to_string(),
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// A complete profile (30-ish male, no notes, no goals).
#[allow(dead_code)]
pub fn test_user(username: &str) -> User {
    User {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        salt: String::new(),
        hashed_password: String::new(),
        password_iterations: 1000,
        dob: "010190".to_string(),
        sex: Sex::Male,
        weight: 180.0,
        height_inches: 70.0,
        activity_level: ActivityLevel::ModeratelyActive,
        fitness_goal: FitnessGoal::MaintainWeight,
        join_date: "010125".to_string(),
        max_streak: 0,
        health_concerns_raw: vec![],
        dietary_restrictions_raw: vec![],
        allergies_raw: vec![],
        health_concerns_normalized: vec![],
        dietary_restrictions_normalized: vec![],
        allergies_normalized: vec![],
        dietary_goals: None,
        workout_history: vec![],
        current_workout_plan: None,
    }
}

/// Store `user` and return a bearer token for it.
#[allow(dead_code)]
pub async fn seed_user(state: &AppState, user: &User) -> String {
    state.db.create_user(user).await.unwrap();
    create_test_jwt(&user.username, &state.config.jwt_signing_key)
}

/// POST a JSON body, optionally with a bearer token.
#[allow(dead_code)]
pub fn json_request(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// POST an urlencoded form.
#[allow(dead_code)]
pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// GET, optionally with a bearer token.
#[allow(dead_code)]
pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
#[allow(dead_code)]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
