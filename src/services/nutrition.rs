// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Age and dietary goal calculations.
//!
//! BMR uses the Mifflin-St Jeor equation; TDEE scales it by the activity
//! multiplier of the user's tier.

use chrono::{Datelike, NaiveDate};

use crate::models::keywords::SODIUM_SENSITIVE_CONDITIONS;
use crate::models::{ActivityLevel, DietaryGoals, FitnessGoal, Sex, User};
use crate::time_utils::parse_mmddyy;

const KG_PER_LB: f64 = 0.453592;
const CM_PER_INCH: f64 = 2.54;
const LITERS_PER_FL_OZ: f64 = 0.0295735;

const DEFAULT_SODIUM_MG: f64 = 2300.0;
const REDUCED_SODIUM_MG: f64 = 1500.0;

/// Body metrics needed for the calculation.
#[derive(Debug, Clone, Copy)]
pub struct BodyProfile<'a> {
    pub dob: &'a str,
    pub sex: Sex,
    pub weight_lbs: f64,
    pub height_inches: f64,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
}

impl<'a> From<&'a User> for BodyProfile<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            dob: &user.dob,
            sex: user.sex,
            weight_lbs: user.weight,
            height_inches: user.height_inches,
            activity_level: user.activity_level,
            fitness_goal: user.fitness_goal,
        }
    }
}

/// Age in full years from an `MMDDYY` birth date.
///
/// Returns `None` for unparseable dates or birth dates in the future.
pub fn calculate_age(dob: &str, today: NaiveDate) -> Option<u32> {
    let birth = parse_mmddyy(dob, today)?;
    if birth > today {
        return None;
    }

    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Basal metabolic rate in kcal/day.
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
        // Midpoint of the two constants
        Sex::Other => base - 78.0,
    }
}

/// Compute daily targets for a profile.
///
/// `health_keywords` is the user's normalized health list; any sodium
/// sensitive condition lowers the sodium target.
pub fn calculate_dietary_goals(
    profile: BodyProfile<'_>,
    health_keywords: &[String],
    today: NaiveDate,
) -> Option<DietaryGoals> {
    if !(profile.weight_lbs.is_finite() && profile.weight_lbs > 0.0)
        || !(profile.height_inches.is_finite() && profile.height_inches > 0.0)
    {
        tracing::warn!(
            weight = profile.weight_lbs,
            height = profile.height_inches,
            "Insufficient body data to calculate dietary goals"
        );
        return None;
    }

    let Some(age) = calculate_age(profile.dob, today) else {
        tracing::warn!(dob = %profile.dob, "Could not calculate age for dietary goals");
        return None;
    };

    let weight_kg = profile.weight_lbs * KG_PER_LB;
    let height_cm = profile.height_inches * CM_PER_INCH;

    let bmr = basal_metabolic_rate(weight_kg, height_cm, age, profile.sex);
    let tdee = bmr * profile.activity_level.multiplier();

    let calories = match profile.fitness_goal {
        FitnessGoal::LoseWeight => {
            let floor = if profile.sex == Sex::Male { 1500.0 } else { 1200.0 };
            (tdee - 500.0).max(bmr * 0.9).max(floor)
        }
        FitnessGoal::GainMuscle => tdee + 300.0,
        FitnessGoal::MaintainWeight => tdee,
    };

    let protein_factor = match (profile.fitness_goal, profile.activity_level) {
        (FitnessGoal::GainMuscle, _) => 1.8,
        (_, ActivityLevel::VeryActive | ActivityLevel::ExtraActive) => 1.6,
        _ => 1.2,
    };
    let protein_grams = protein_factor * weight_kg;

    let sodium_mg = if health_keywords
        .iter()
        .any(|k| SODIUM_SENSITIVE_CONDITIONS.contains(&k.as_str()))
    {
        REDUCED_SODIUM_MG
    } else {
        DEFAULT_SODIUM_MG
    };

    // Half the body weight (lbs) in fluid ounces
    let water_liters = (profile.weight_lbs / 2.0) * LITERS_PER_FL_OZ;

    let goals = DietaryGoals {
        calories: calories.round() as i64,
        protein_grams: protein_grams.round() as i64,
        sodium_mg: sodium_mg.round() as i64,
        water_liters: (water_liters * 10.0).round() / 10.0,
    };

    tracing::debug!(?goals, age, "Calculated dietary goals");
    Some(goals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn profile(
        sex: Sex,
        weight_lbs: f64,
        height_inches: f64,
        activity_level: ActivityLevel,
        fitness_goal: FitnessGoal,
    ) -> BodyProfile<'static> {
        BodyProfile {
            // 30 years old on 2025-06-01
            dob: "010195",
            sex,
            weight_lbs,
            height_inches,
            activity_level,
            fitness_goal,
        }
    }

    #[test]
    fn test_calculate_age() {
        assert_eq!(calculate_age("010195", today()), Some(30));
        // Birthday later this year
        assert_eq!(calculate_age("120195", today()), Some(29));
        // Birthday today
        assert_eq!(calculate_age("060100", today()), Some(25));
        assert_eq!(calculate_age("bad", today()), None);
        // Future date within the 20xx window
        assert_eq!(calculate_age("120125", today()), None);
    }

    #[test]
    fn test_bmr_constants() {
        let male = basal_metabolic_rate(80.0, 180.0, 30, Sex::Male);
        let female = basal_metabolic_rate(80.0, 180.0, 30, Sex::Female);
        let other = basal_metabolic_rate(80.0, 180.0, 30, Sex::Other);

        assert!((male - 1780.0).abs() < 1e-9);
        assert!((female - 1614.0).abs() < 1e-9);
        assert!((other - 1697.0).abs() < 1e-9);
    }

    #[test]
    fn test_maintain_weight_male_moderate() {
        let p = profile(
            Sex::Male,
            180.0,
            70.0,
            ActivityLevel::ModeratelyActive,
            FitnessGoal::MaintainWeight,
        );

        // kg = 81.64656, cm = 177.8
        // BMR = 816.4656 + 1111.25 - 150 + 5 = 1782.7156
        // TDEE = 1782.7156 * 1.55 = 2763.209...
        let goals = calculate_dietary_goals(p, &[], today()).unwrap();

        assert_eq!(goals.calories, 2763);
        assert_eq!(goals.protein_grams, 98);
        assert_eq!(goals.sodium_mg, 2300);
        assert_eq!(goals.water_liters, 2.7);
    }

    #[test]
    fn test_lose_weight_respects_calorie_floor() {
        let p = profile(
            Sex::Female,
            130.0,
            64.0,
            ActivityLevel::Sedentary,
            FitnessGoal::LoseWeight,
        );

        // BMR = 589.6696 + 1016 - 150 - 161 = 1294.6696
        // TDEE - 500 = 1053.6, 0.9 * BMR = 1165.2, floor = 1200
        let goals = calculate_dietary_goals(p, &[], today()).unwrap();

        assert_eq!(goals.calories, 1200);
        assert_eq!(goals.protein_grams, 71);
        assert_eq!(goals.water_liters, 1.9);
    }

    #[test]
    fn test_lose_weight_uses_deficit_when_above_floor() {
        let p = profile(
            Sex::Male,
            220.0,
            72.0,
            ActivityLevel::VeryActive,
            FitnessGoal::LoseWeight,
        );

        // kg = 99.79024, cm = 182.88
        // BMR = 997.9024 + 1143 - 150 + 5 = 1995.9024
        // TDEE = 3442.93164, minus 500 = 2942.93
        let goals = calculate_dietary_goals(p, &[], today()).unwrap();

        assert_eq!(goals.calories, 2943);
        // Very active, not gaining: 1.6 g/kg
        assert_eq!(goals.protein_grams, 160);
    }

    #[test]
    fn test_gain_muscle_surplus_and_protein() {
        let p = profile(
            Sex::Male,
            180.0,
            70.0,
            ActivityLevel::ModeratelyActive,
            FitnessGoal::GainMuscle,
        );

        let goals = calculate_dietary_goals(p, &[], today()).unwrap();

        assert_eq!(goals.calories, 3063);
        // 1.8 * 81.64656 = 146.96
        assert_eq!(goals.protein_grams, 147);
    }

    #[test]
    fn test_sodium_reduced_for_sensitive_conditions() {
        let p = profile(
            Sex::Other,
            150.0,
            66.0,
            ActivityLevel::LightlyActive,
            FitnessGoal::MaintainWeight,
        );

        let none = calculate_dietary_goals(p, &["knee_pain".to_string()], today()).unwrap();
        let reduced = calculate_dietary_goals(
            p,
            &["knee_pain".to_string(), "kidney_disease".to_string()],
            today(),
        )
        .unwrap();

        assert_eq!(none.sodium_mg, 2300);
        assert_eq!(reduced.sodium_mg, 1500);
    }

    #[test]
    fn test_invalid_inputs_yield_none() {
        let mut p = profile(
            Sex::Male,
            0.0,
            70.0,
            ActivityLevel::Sedentary,
            FitnessGoal::MaintainWeight,
        );
        assert!(calculate_dietary_goals(p, &[], today()).is_none());

        p.weight_lbs = 180.0;
        p.height_inches = f64::NAN;
        assert!(calculate_dietary_goals(p, &[], today()).is_none());

        p.height_inches = 70.0;
        p.dob = "999999";
        assert!(calculate_dietary_goals(p, &[], today()).is_none());
    }
}
