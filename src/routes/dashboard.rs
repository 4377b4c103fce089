// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard pages (session required).
//!
//! Pages answer with JSON; a session whose user document is gone is cleared
//! and sent back to the login page.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::middleware::auth::{removal_cookie, AuthUser};
use crate::models::{
    ActivityLevel, DietaryGoals, FitnessGoal, KeywordCategory, Sex, User, WorkoutHistoryEntry,
};
use crate::routes::auth::validate_dob;
use crate::routes::json_body;
use crate::services::normalize::{normalize_keywords, split_lines};
use crate::services::nutrition::{calculate_age, calculate_dietary_goals, BodyProfile};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/profile", get(get_profile).post(update_profile))
        .route("/dashboard/workout", get(workout_page))
        .route("/dashboard/diet", get(diet_page))
        .route("/dashboard/about", get(about_page))
}

// ─── Response types ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardResponse {
    pub username: String,
    pub join_date: String,
    pub max_streak: u32,
    pub fitness_goal: FitnessGoal,
    pub activity_level: ActivityLevel,
    pub dietary_goals: Option<DietaryGoals>,
    pub workouts_logged: usize,
    pub has_current_plan: bool,
}

/// Profile as shown to its owner (no password material).
#[derive(Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub dob: String,
    pub age: Option<u32>,
    pub sex: Sex,
    pub weight: f64,
    pub height_inches: f64,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    pub join_date: String,
    pub max_streak: u32,
    pub health_concerns_raw: Vec<String>,
    pub dietary_restrictions_raw: Vec<String>,
    pub allergies_raw: Vec<String>,
    pub health_concerns_normalized: Vec<String>,
    pub dietary_restrictions_normalized: Vec<String>,
    pub allergies_normalized: Vec<String>,
    pub dietary_goals: Option<DietaryGoals>,
}

impl ProfileResponse {
    fn new(user: User) -> Self {
        let age = calculate_age(&user.dob, chrono::Utc::now().date_naive());
        Self {
            username: user.username,
            email: user.email,
            dob: user.dob,
            age,
            sex: user.sex,
            weight: user.weight,
            height_inches: user.height_inches,
            activity_level: user.activity_level,
            fitness_goal: user.fitness_goal,
            join_date: user.join_date,
            max_streak: user.max_streak,
            health_concerns_raw: user.health_concerns_raw,
            dietary_restrictions_raw: user.dietary_restrictions_raw,
            allergies_raw: user.allergies_raw,
            health_concerns_normalized: user.health_concerns_normalized,
            dietary_restrictions_normalized: user.dietary_restrictions_normalized,
            allergies_normalized: user.allergies_normalized,
            dietary_goals: user.dietary_goals,
        }
    }
}

#[derive(Serialize)]
pub struct WorkoutPageResponse {
    /// Newest first
    pub workout_history: Vec<WorkoutHistoryEntry>,
    pub current_workout_plan: Option<Value>,
}

#[derive(Serialize)]
pub struct Constraint {
    pub raw: Vec<String>,
    pub normalized: Vec<String>,
}

#[derive(Serialize)]
pub struct DietPageResponse {
    pub dietary_goals: Option<DietaryGoals>,
    pub health_concerns: Constraint,
    pub dietary_restrictions: Constraint,
    pub allergies: Constraint,
}

#[derive(Serialize)]
pub struct AboutResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub disclaimer: &'static str,
}

/// Partial profile update (JSON). Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_dob"))]
    pub dob: Option<String>,
    pub sex: Option<Sex>,
    #[validate(range(exclusive_min = 0.0, max = 1500.0))]
    pub weight: Option<f64>,
    #[validate(range(exclusive_min = 0.0, max = 120.0))]
    pub height_inches: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
    /// Free text, one item per line
    pub health_concerns_raw: Option<String>,
    pub dietary_restrictions_raw: Option<String>,
    pub allergies_raw: Option<String>,
}

// ─── Handlers ────────────────────────────────────────────────────

/// Load the session's user, or clear the session if the user is gone.
async fn load_user(
    state: &AppState,
    auth: &AuthUser,
    jar: CookieJar,
) -> Result<std::result::Result<User, Response>> {
    match state.db.get_user(&auth.username).await? {
        Some(user) => Ok(Ok(user)),
        None => {
            tracing::warn!(username = %auth.username, "Session user not found, clearing session");
            Ok(Err(
                (jar.remove(removal_cookie()), Redirect::to("/login")).into_response()
            ))
        }
    }
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<Response> {
    let user = match load_user(&state, &auth, jar).await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    Ok(Json(DashboardResponse {
        workouts_logged: user.workout_history.len(),
        has_current_plan: user.current_workout_plan.is_some(),
        username: user.username,
        join_date: user.join_date,
        max_streak: user.max_streak,
        fitness_goal: user.fitness_goal,
        activity_level: user.activity_level,
        dietary_goals: user.dietary_goals,
    })
    .into_response())
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<Response> {
    let user = match load_user(&state, &auth, jar).await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    Ok(Json(ProfileResponse::new(user)).into_response())
}

/// Apply a partial update, re-normalizing any notes that were sent and
/// recomputing the dietary goals.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<ProfileResponse>> {
    let update = json_body(payload)?;
    update.validate()?;

    // Normalize outside the write; only fields that were sent
    let notes = |text: &Option<String>| text.as_deref().map(split_lines);
    let health_raw = notes(&update.health_concerns_raw);
    let dietary_raw = notes(&update.dietary_restrictions_raw);
    let allergies_raw = notes(&update.allergies_raw);

    let (health_norm, dietary_norm, allergies_norm) = tokio::join!(
        normalize_optional(&state, health_raw.as_deref(), KeywordCategory::Health),
        normalize_optional(&state, dietary_raw.as_deref(), KeywordCategory::Dietary),
        normalize_optional(&state, allergies_raw.as_deref(), KeywordCategory::Allergy),
    );

    let today = chrono::Utc::now().date_naive();
    let user = state
        .db
        .update_user(&auth.username, move |user| {
            if let Some(email) = &update.email {
                user.email = email.trim().to_string();
            }
            if let Some(dob) = &update.dob {
                user.dob = dob.clone();
            }
            if let Some(sex) = update.sex {
                user.sex = sex;
            }
            if let Some(weight) = update.weight {
                user.weight = weight;
            }
            if let Some(height) = update.height_inches {
                user.height_inches = height;
            }
            if let Some(level) = update.activity_level {
                user.activity_level = level;
            }
            if let Some(goal) = update.fitness_goal {
                user.fitness_goal = goal;
            }
            if let (Some(raw), Some(normalized)) = (&health_raw, &health_norm) {
                user.health_concerns_raw = raw.clone();
                user.health_concerns_normalized = normalized.clone();
            }
            if let (Some(raw), Some(normalized)) = (&dietary_raw, &dietary_norm) {
                user.dietary_restrictions_raw = raw.clone();
                user.dietary_restrictions_normalized = normalized.clone();
            }
            if let (Some(raw), Some(normalized)) = (&allergies_raw, &allergies_norm) {
                user.allergies_raw = raw.clone();
                user.allergies_normalized = normalized.clone();
            }

            user.dietary_goals = calculate_dietary_goals(
                BodyProfile::from(&*user),
                &user.health_concerns_normalized,
                today,
            );
        })
        .await?;

    tracing::info!(username = %user.username, "Profile updated");
    Ok(Json(ProfileResponse::new(user)))
}

async fn normalize_optional(
    state: &AppState,
    raw: Option<&[String]>,
    category: KeywordCategory,
) -> Option<Vec<String>> {
    match raw {
        Some(lines) => Some(normalize_keywords(&state.ai, lines, category).await),
        None => None,
    }
}

async fn workout_page(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<Response> {
    let user = match load_user(&state, &auth, jar).await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    let mut workout_history = user.workout_history;
    workout_history.reverse();

    Ok(Json(WorkoutPageResponse {
        workout_history,
        current_workout_plan: user.current_workout_plan,
    })
    .into_response())
}

async fn diet_page(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<Response> {
    let user = match load_user(&state, &auth, jar).await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    Ok(Json(DietPageResponse {
        dietary_goals: user.dietary_goals,
        health_concerns: Constraint {
            raw: user.health_concerns_raw,
            normalized: user.health_concerns_normalized,
        },
        dietary_restrictions: Constraint {
            raw: user.dietary_restrictions_raw,
            normalized: user.dietary_restrictions_normalized,
        },
        allergies: Constraint {
            raw: user.allergies_raw,
            normalized: user.allergies_normalized,
        },
    })
    .into_response())
}

async fn about_page() -> Json<AboutResponse> {
    Json(AboutResponse {
        name: "GymBro",
        version: env!("CARGO_PKG_VERSION"),
        description: "AI-assisted workouts, meal ideas and form feedback tailored to your profile.",
        disclaimer: "GymBro does not give medical advice. Consult a professional before starting a new program.",
    })
}
