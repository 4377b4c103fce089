// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and session routes.

use axum::{
    extract::{rejection::FormRejection, State},
    http::HeaderMap,
    response::Redirect,
    routing::get,
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::{Validate, ValidationError};

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, optional_session, removal_cookie, session_cookie};
use crate::models::keywords::{ALLERGY_KEYWORDS, DIETARY_KEYWORDS, HEALTH_KEYWORDS};
use crate::models::{ActivityLevel, FitnessGoal, KeywordCategory, Sex, User};
use crate::routes::form_body;
use crate::services::normalize::{normalize_keywords, split_lines};
use crate::services::nutrition::{calculate_age, calculate_dietary_goals, BodyProfile};
use crate::services::password::{hash_password, verify_password, PasswordHash};
use crate::time_utils::format_mmddyy;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

/// Usernames become document IDs: keep them to a safe character set.
pub(crate) fn validate_username(username: &str) -> std::result::Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset"))
    }
}

/// Date of birth must be a real MMDDYY date in the past.
pub(crate) fn validate_dob(dob: &str) -> std::result::Result<(), ValidationError> {
    let today = chrono::Utc::now().date_naive();
    match calculate_age(dob, today) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("dob_mmddyy")),
    }
}

/// Registration form (`application/x-www-form-urlencoded`).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 3, max = 32), custom(function = "validate_username"))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// MMDDYY
    #[validate(custom(function = "validate_dob"))]
    pub dob: String,
    pub sex: Sex,
    /// Pounds
    #[validate(range(exclusive_min = 0.0, max = 1500.0))]
    pub weight: f64,
    #[validate(range(exclusive_min = 0.0, max = 120.0))]
    pub height_inches: f64,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    /// Free text, one item per line
    #[serde(default)]
    pub health_concerns_raw: String,
    #[serde(default)]
    pub dietary_restrictions_raw: String,
    #[serde(default)]
    pub allergies_raw: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
struct FormField {
    name: &'static str,
    kind: &'static str,
    required: bool,
}

const fn field(name: &'static str, kind: &'static str, required: bool) -> FormField {
    FormField {
        name,
        kind,
        required,
    }
}

#[derive(Serialize)]
pub struct Vocabularies {
    health: &'static [&'static str],
    dietary: &'static [&'static str],
    allergy: &'static [&'static str],
}

#[derive(Serialize)]
pub struct RegisterFormResponse {
    action: &'static str,
    fields: Vec<FormField>,
    sex: Vec<&'static str>,
    activity_levels: Vec<&'static str>,
    fitness_goals: Vec<&'static str>,
    vocabularies: Vocabularies,
}

#[derive(Serialize)]
pub struct LoginFormResponse {
    action: &'static str,
    fields: Vec<FormField>,
}

/// Landing page: dashboard with a session, login page otherwise.
async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Redirect {
    match optional_session(&jar, &headers, &state.config.jwt_signing_key) {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

/// Describe the registration form.
async fn register_form() -> Json<RegisterFormResponse> {
    Json(RegisterFormResponse {
        action: "/register",
        fields: vec![
            field("username", "text", true),
            field("email", "email", true),
            field("password", "password", true),
            field("dob", "mmddyy", true),
            field("sex", "select", true),
            field("weight", "number", true),
            field("height_inches", "number", true),
            field("activity_level", "select", true),
            field("fitness_goal", "select", true),
            field("health_concerns_raw", "textarea", false),
            field("dietary_restrictions_raw", "textarea", false),
            field("allergies_raw", "textarea", false),
        ],
        sex: [Sex::Male, Sex::Female, Sex::Other]
            .iter()
            .map(Sex::as_str)
            .collect(),
        activity_levels: [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtraActive,
        ]
        .iter()
        .map(ActivityLevel::as_str)
        .collect(),
        fitness_goals: [
            FitnessGoal::GainMuscle,
            FitnessGoal::LoseWeight,
            FitnessGoal::MaintainWeight,
        ]
        .iter()
        .map(FitnessGoal::as_str)
        .collect(),
        vocabularies: Vocabularies {
            health: HEALTH_KEYWORDS,
            dietary: DIETARY_KEYWORDS,
            allergy: ALLERGY_KEYWORDS,
        },
    })
}

/// Describe the login form.
async fn login_form() -> Json<LoginFormResponse> {
    Json(LoginFormResponse {
        action: "/login",
        fields: vec![
            field("username", "text", true),
            field("password", "password", true),
        ],
    })
}

/// Create an account, then send the user to the login page.
async fn register(
    State(state): State<Arc<AppState>>,
    form: std::result::Result<Form<RegisterForm>, FormRejection>,
) -> Result<Redirect> {
    let form = form_body(form)?;
    form.validate()?;

    let username = form.username.trim().to_string();

    // Cheap early check; create_user is authoritative
    if state.db.get_user(&username).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Username '{}' already exists",
            username
        )));
    }

    let password = form.password;
    let PasswordHash {
        salt_hex,
        hash_hex,
        iterations,
    } = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))??;

    let health_concerns_raw = split_lines(&form.health_concerns_raw);
    let dietary_restrictions_raw = split_lines(&form.dietary_restrictions_raw);
    let allergies_raw = split_lines(&form.allergies_raw);

    let (health_concerns_normalized, dietary_restrictions_normalized, allergies_normalized) = tokio::join!(
        normalize_keywords(&state.ai, &health_concerns_raw, KeywordCategory::Health),
        normalize_keywords(&state.ai, &dietary_restrictions_raw, KeywordCategory::Dietary),
        normalize_keywords(&state.ai, &allergies_raw, KeywordCategory::Allergy),
    );

    let today = chrono::Utc::now().date_naive();
    let mut user = User {
        username,
        email: form.email.trim().to_string(),
        salt: salt_hex,
        hashed_password: hash_hex,
        password_iterations: iterations,
        dob: form.dob,
        sex: form.sex,
        weight: form.weight,
        height_inches: form.height_inches,
        activity_level: form.activity_level,
        fitness_goal: form.fitness_goal,
        join_date: format_mmddyy(today),
        max_streak: 0,
        health_concerns_raw,
        dietary_restrictions_raw,
        allergies_raw,
        health_concerns_normalized,
        dietary_restrictions_normalized,
        allergies_normalized,
        dietary_goals: None,
        workout_history: Vec::new(),
        current_workout_plan: None,
    };
    user.dietary_goals = calculate_dietary_goals(
        BodyProfile::from(&user),
        &user.health_concerns_normalized,
        today,
    );

    state.db.create_user(&user).await?;

    tracing::info!(
        username = %user.username,
        health = ?user.health_concerns_normalized,
        has_goals = user.dietary_goals.is_some(),
        "User registered"
    );

    Ok(Redirect::to("/login"))
}

/// Check credentials, set the session cookie and go to the dashboard.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<(CookieJar, Redirect)> {
    let form = form_body(form)?;
    let username = form.username.trim().to_string();

    // Unknown user and wrong password look the same to the client
    let Some(user) = state.db.get_user(&username).await? else {
        tracing::info!(username = %username, "Login for unknown user");
        return Err(AppError::InvalidCredentials);
    };

    let password = form.password;
    let valid = tokio::task::spawn_blocking(move || {
        verify_password(
            &password,
            &user.salt,
            &user.hashed_password,
            user.password_iterations,
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Password check task failed: {}", e)))?;

    if !valid {
        tracing::info!(username = %username, "Login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = create_jwt(&username, &state.config.jwt_signing_key)?;
    tracing::info!(username = %username, "User logged in");

    Ok((
        jar.add(session_cookie(token, state.config.cookie_secure)),
        Redirect::to("/dashboard"),
    ))
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(removal_cookie()), Redirect::to("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            username: "iron_mike-2".to_string(),
            email: "mike@example.com".to_string(),
            password: "correct horse".to_string(),
            dob: "070490".to_string(),
            sex: Sex::Male,
            weight: 185.0,
            height_inches: 71.0,
            activity_level: ActivityLevel::VeryActive,
            fitness_goal: FitnessGoal::GainMuscle,
            health_concerns_raw: String::new(),
            dietary_restrictions_raw: String::new(),
            allergies_raw: String::new(),
        }
    }

    #[test]
    fn test_register_form_valid() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_register_form_rejects_bad_fields() {
        let mut form = valid_form();
        form.username = "bad/name".to_string();
        assert!(form.validate().is_err());

        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        assert!(form.validate().is_err());

        let mut form = valid_form();
        form.password = "short".to_string();
        assert!(form.validate().is_err());

        let mut form = valid_form();
        form.dob = "1990-07-04".to_string();
        assert!(form.validate().is_err());

        let mut form = valid_form();
        form.weight = 0.0;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_validate_username_charset() {
        assert!(validate_username("Lifter_99-x").is_ok());
        assert!(validate_username("no spaces").is_err());
        assert!(validate_username("dots.are.bad").is_err());
    }
}
