// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod keywords;
pub mod user;
pub mod workout;

pub use keywords::KeywordCategory;
pub use user::{ActivityLevel, DietaryGoals, FitnessGoal, Sex, User};
pub use workout::{WorkoutHistoryEntry, MAX_WORKOUT_HISTORY};
