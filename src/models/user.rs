//! User model for storage and API.

use serde::{Deserialize, Serialize};

use crate::models::WorkoutHistoryEntry;

/// Iteration count assumed for password records written before the count
/// was stored alongside the hash.
pub const LEGACY_PASSWORD_ITERATIONS: u32 = 1000;

fn default_password_iterations() -> u32 {
    LEGACY_PASSWORD_ITERATIONS
}

/// Biological sex, used to pick the BMR constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

/// Self-reported activity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    /// TDEE multiplier applied to BMR.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

/// Fitness goal selected at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    GainMuscle,
    LoseWeight,
    MaintainWeight,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::GainMuscle => "gain_muscle",
            FitnessGoal::LoseWeight => "lose_weight",
            FitnessGoal::MaintainWeight => "maintain_weight",
        }
    }
}

/// Daily dietary targets derived from the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryGoals {
    pub calories: i64,
    pub protein_grams: i64,
    pub sodium_mg: i64,
    pub water_liters: f64,
}

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username (also used as document ID)
    pub username: String,
    pub email: String,
    /// PBKDF2 salt (hex)
    pub salt: String,
    /// PBKDF2 output (hex)
    pub hashed_password: String,
    #[serde(default = "default_password_iterations")]
    pub password_iterations: u32,
    /// Date of birth (MMDDYY)
    pub dob: String,
    pub sex: Sex,
    /// Body weight in pounds
    pub weight: f64,
    pub height_inches: f64,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    /// Join date (MMDDYY)
    pub join_date: String,
    #[serde(default)]
    pub max_streak: u32,

    // ─── Free-text notes, one entry per line ─────────────────────
    #[serde(default)]
    pub health_concerns_raw: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions_raw: Vec<String>,
    #[serde(default)]
    pub allergies_raw: Vec<String>,

    // ─── Normalized keywords (vocabulary subsets) ────────────────
    #[serde(default)]
    pub health_concerns_normalized: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions_normalized: Vec<String>,
    #[serde(default)]
    pub allergies_normalized: Vec<String>,

    #[serde(default)]
    pub dietary_goals: Option<DietaryGoals>,

    /// Most recent workouts, oldest first (at most `MAX_WORKOUT_HISTORY`)
    #[serde(default)]
    pub workout_history: Vec<WorkoutHistoryEntry>,
    /// Last plan produced by workout generation
    #[serde(default)]
    pub current_workout_plan: Option<serde_json::Value>,
}
