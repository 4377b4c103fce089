// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Controlled vocabularies for normalized health, diet and allergy notes.

use serde::Serialize;

pub const HEALTH_KEYWORDS: &[&str] = &[
    "hypertension",
    "diabetes_type1",
    "diabetes_type2",
    "high_cholesterol",
    "kidney_disease",
    "ibs",
    "celiac_disease",
    "gerd",
    "acid_reflux",
    "knee_pain",
    "back_pain",
    "shoulder_injury",
    "hip_pain",
    "wrist_pain",
    "arthritis",
    "osteoporosis",
    "asthma",
    "copd",
    "heart_disease",
    "arrhythmia",
    "post_surgery_recovery",
    "pregnancy",
    "postpartum",
    "migraine",
    "anemia",
    "thyroid_issue",
    "autoimmune_disorder",
    "chronic_fatigue",
    // Catch-all categories
    "other_joint_pain",
    "other_cardiovascular",
    "other_metabolic",
    "other_respiratory",
    "other_musculoskeletal",
    "other_digestive",
];

pub const DIETARY_KEYWORDS: &[&str] = &[
    "vegetarian",
    "vegan",
    "pescatarian",
    "gluten_free",
    "lactose_intolerant",
    "dairy_free",
    "low_carb",
    "keto",
    "paleo",
    "low_fodmap",
    "low_sodium",
    "low_sugar",
    "halal",
    "kosher",
    "fasting",
    "intermittent_fasting",
    "nutrient_deficiency",
    "other_restriction",
];

pub const ALLERGY_KEYWORDS: &[&str] = &[
    "peanuts",
    "tree_nuts",
    "milk",
    "eggs",
    "soy",
    "wheat",
    "fish",
    "shellfish",
    "sesame",
    "mustard",
    "celery",
    "sulfites",
    "lupin",
    "molluscs",
    "corn",
    "nightshades",
    "citrus",
    "seeds",
    "other_allergy",
];

/// Health keywords that lower the sodium target.
pub const SODIUM_SENSITIVE_CONDITIONS: &[&str] = &["hypertension", "heart_disease", "kidney_disease"];

/// Which vocabulary a free-text note is normalized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Health,
    Dietary,
    Allergy,
}

impl KeywordCategory {
    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            KeywordCategory::Health => HEALTH_KEYWORDS,
            KeywordCategory::Dietary => DIETARY_KEYWORDS,
            KeywordCategory::Allergy => ALLERGY_KEYWORDS,
        }
    }

    /// Human description used in prompts and logs.
    pub fn description(&self) -> &'static str {
        match self {
            KeywordCategory::Health => "health concerns",
            KeywordCategory::Dietary => "dietary restrictions",
            KeywordCategory::Allergy => "allergies",
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.vocabulary().contains(&keyword)
    }
}
