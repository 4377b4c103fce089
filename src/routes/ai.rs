// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AI feature endpoints (`/api/ai/*`).
//!
//! Text endpoints answer with a generic apology when the model call fails;
//! JSON endpoints fall back to returning the raw model text.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{optional_session, AuthUser};
use crate::models::{User, WorkoutHistoryEntry};
use crate::routes::json_body;
use crate::services::normalize::parse_json_response;
use crate::services::prompts::{
    analyze_meal_prompt, assist_prompt, check_form_prompt, display_value,
    generate_workout_prompt, meal_suggestion_prompt, update_workout_prompt, UserContext,
    WorkoutOptions,
};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

/// Routes that require a session.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ai/assist", post(assist))
        .route("/api/ai/generate-workout", post(generate_workout))
        .route("/api/ai/update-workout-plan", post(update_workout_plan))
        .route(
            "/api/ai/generate-meal-suggestion",
            post(generate_meal_suggestion),
        )
}

/// Routes usable without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ai/analyze-meal", post(analyze_meal))
        .route("/api/ai/check-form", post(check_form))
}

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    pub message: Option<String>,
    pub level: Option<String>,
    pub goal: Option<String>,
    pub performance: Option<String>,
}

#[derive(Serialize)]
pub struct AssistResponse {
    pub response: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateWorkoutRequest {
    pub level: Option<String>,
    pub goal: Option<String>,
    pub equipment: Option<String>,
    pub mood: Option<Value>,
    pub mood_context: Option<String>,
    pub focus: Option<String>,
    pub duration: Option<Value>,
    pub weight: Option<Value>,
    pub height_inches: Option<Value>,
}

#[derive(Serialize)]
pub struct GenerateWorkoutResponse {
    /// Parsed plan, or `{raw_response}` when the model did not return JSON
    pub workout: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkoutRequest {
    pub current_plan: Option<Value>,
    pub completed: Option<Value>,
    pub difficulty_rating: Option<Value>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeMealRequest {
    pub meal_description: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeMealResponse {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckFormRequest {
    pub exercise: Option<String>,
    pub form_description: Option<String>,
    pub level: Option<String>,
}

#[derive(Serialize)]
pub struct CheckFormResponse {
    pub feedback: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MealSuggestionRequest {
    pub meal_type: Option<String>,
}

#[derive(Serialize)]
pub struct MealSuggestionResponse {
    pub suggestion: String,
}

// ─── Helpers ─────────────────────────────────────────────────────

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Non-blank string field, trimmed.
fn required(field: Option<String>, name: &str) -> Result<String> {
    match field.map(|s| s.trim().to_string()) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(AppError::BadRequest(format!("Missing {}", name))),
    }
}

fn or_default(field: Option<String>, default: &str) -> String {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

async fn require_user(state: &AppState, username: &str) -> Result<User> {
    state
        .db
        .get_user(username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
}

/// Shape the model's answer to a workout-feedback prompt.
///
/// A JSON object with both `explanation` and `updated_plan` passes through;
/// anything else is wrapped with an explanation and the raw output.
pub fn workout_update_response(text: &str) -> Value {
    match parse_json_response(text) {
        Some(Value::Object(map))
            if map.contains_key("explanation") && map.contains_key("updated_plan") =>
        {
            Value::Object(map)
        }
        Some(other) => {
            tracing::warn!("Workout update response missing expected keys");
            json!({
                "explanation": "<p>AI response is missing expected structure.</p>",
                "updated_plan": {
                    "error": "AI response format incorrect",
                    "raw_response": other,
                },
            })
        }
        None => {
            tracing::warn!("Workout update response was not valid JSON");
            json!({
                "explanation": "<p>AI response received, but it was not valid JSON.</p>",
                "updated_plan": {
                    "error": "Failed to parse plan update as JSON",
                    "raw_response": text,
                },
            })
        }
    }
}

// ─── Handlers ────────────────────────────────────────────────────

/// General chat with the assistant.
async fn assist(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<AssistRequest>, JsonRejection>,
) -> Result<Json<AssistResponse>> {
    let req = json_body(payload)?;
    let message = required(req.message, "message")?;

    let user = require_user(&state, &auth.username).await?;
    let ctx = UserContext::from_user(&user, today());

    // Unstated level and goal come from the stored profile
    let prompt = assist_prompt(
        &ctx,
        &or_default(req.level, user.activity_level.as_str()),
        &or_default(req.goal, user.fitness_goal.as_str()),
        &or_default(req.performance, "average"),
        &message,
    );

    tracing::info!(username = %auth.username, "Assist request");
    let response = state.ai.generate_or_fallback(&prompt).await;

    Ok(Json(AssistResponse { response }))
}

/// Generate a workout plan and remember it as the user's current plan.
async fn generate_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<GenerateWorkoutRequest>, JsonRejection>,
) -> Result<Json<GenerateWorkoutResponse>> {
    let req = json_body(payload)?;

    // A missing profile degrades the prompt instead of failing the request
    let user = state.db.get_user(&auth.username).await?;
    let ctx = user.as_ref().map(|u| UserContext::from_user(u, today()));

    let profile_value = |requested: Option<Value>, stored: Option<f64>| match requested {
        Some(v) if !v.is_null() => display_value(&v),
        _ => stored
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
    };

    let opts = WorkoutOptions {
        level: or_default(req.level, "Beginner"),
        goal: or_default(req.goal, "General Fitness"),
        equipment: or_default(req.equipment, "Bodyweight"),
        mood: req.mood.filter(|v| !v.is_null()).map(|v| display_value(&v)),
        mood_context: req.mood_context.unwrap_or_default().trim().to_string(),
        focus: or_default(req.focus, "Full Body"),
        duration: match req.duration {
            Some(v) if !v.is_null() => display_value(&v),
            _ => "30".to_string(),
        },
        weight: profile_value(req.weight, user.as_ref().map(|u| u.weight)),
        height_inches: profile_value(req.height_inches, user.as_ref().map(|u| u.height_inches)),
    };

    let prompt = generate_workout_prompt(ctx.as_ref(), &opts);
    tracing::info!(username = %auth.username, focus = %opts.focus, "Generating workout");
    let text = state.ai.generate_or_fallback(&prompt).await;

    let workout = match parse_json_response(&text) {
        Some(plan @ Value::Object(_)) => {
            if user.is_some() {
                state
                    .db
                    .set_current_workout_plan(&auth.username, plan.clone())
                    .await?;
            }
            plan
        }
        _ => {
            tracing::warn!(username = %auth.username, "Workout response was not a JSON object");
            json!({ "raw_response": text })
        }
    };

    Ok(Json(GenerateWorkoutResponse { workout }))
}

/// Record feedback on a finished workout and ask for the next plan.
async fn update_workout_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<UpdateWorkoutRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let req = json_body(payload)?;
    let user = require_user(&state, &auth.username).await?;

    let current_plan = req
        .current_plan
        .filter(|plan| !plan.is_null())
        .or(user.current_workout_plan);
    let not_specified = || Value::String("Not specified".to_string());
    let completed = req.completed.filter(|v| !v.is_null()).unwrap_or_else(not_specified);
    let difficulty = req
        .difficulty_rating
        .filter(|v| !v.is_null())
        .unwrap_or_else(not_specified);
    let notes = req.notes.unwrap_or_default();

    let entry = WorkoutHistoryEntry {
        timestamp: format_utc_rfc3339(chrono::Utc::now()),
        workout_plan: current_plan.clone(),
        completed: completed.clone(),
        difficulty_rating: difficulty.clone(),
        notes: notes.clone(),
    };
    let user = state.db.append_workout_history(&auth.username, entry).await?;

    let ctx = UserContext::from_user(&user, today());
    let prompt = update_workout_prompt(
        &ctx,
        &current_plan.unwrap_or(Value::Null),
        &display_value(&completed),
        &display_value(&difficulty),
        if notes.trim().is_empty() { "None" } else { notes.as_str() },
    );

    let text = state.ai.generate_or_fallback(&prompt).await;
    let response = workout_update_response(&text);

    // A full next-session plan replaces the current one
    let next_plan = response
        .get("updated_plan")
        .filter(|plan| plan.is_object() && plan.get("raw_response").is_none());
    if let Some(plan) = next_plan {
        state
            .db
            .set_current_workout_plan(&auth.username, plan.clone())
            .await?;
    }

    Ok(Json(response))
}

/// Suggest one meal that fits the user's targets and constraints.
async fn generate_meal_suggestion(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<MealSuggestionRequest>, JsonRejection>,
) -> Result<Json<MealSuggestionResponse>> {
    let req = json_body(payload)?;
    let user = require_user(&state, &auth.username).await?;

    let Some(goals) = user.dietary_goals.clone() else {
        return Err(AppError::BadRequest(
            "Dietary goals not calculated.".to_string(),
        ));
    };

    let ctx = UserContext::from_user(&user, today());
    let prompt = meal_suggestion_prompt(&ctx, &goals, &or_default(req.meal_type, "any"));
    let suggestion = state.ai.generate_or_fallback(&prompt).await;

    Ok(Json(MealSuggestionResponse { suggestion }))
}

/// Estimate nutrition for a described meal; uses the profile when signed in.
async fn analyze_meal(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    payload: std::result::Result<Json<AnalyzeMealRequest>, JsonRejection>,
) -> Result<Json<AnalyzeMealResponse>> {
    let req = json_body(payload)?;
    let meal_description = required(req.meal_description, "meal_description")?;

    let user = match optional_session(&jar, &headers, &state.config.jwt_signing_key) {
        Some(auth) => {
            let user = state.db.get_user(&auth.username).await?;
            if user.is_none() {
                tracing::warn!(username = %auth.username, "Analyzing meal without profile");
            }
            user
        }
        None => None,
    };
    let ctx = user.as_ref().map(|u| UserContext::from_user(u, today()));

    let prompt = analyze_meal_prompt(ctx.as_ref(), &meal_description);
    let analysis = state.ai.generate_or_fallback(&prompt).await;

    Ok(Json(AnalyzeMealResponse { analysis }))
}

/// Feedback on a written description of exercise form.
async fn check_form(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CheckFormRequest>, JsonRejection>,
) -> Result<Json<CheckFormResponse>> {
    let req = json_body(payload)?;
    let exercise = required(req.exercise, "exercise")?;
    let form_description = required(req.form_description, "form_description")?;

    let prompt = check_form_prompt(
        &exercise,
        &form_description,
        &or_default(req.level, "Beginner"),
    );
    let feedback = state.ai.generate_or_fallback(&prompt).await;

    Ok(Json(CheckFormResponse { feedback }))
}
