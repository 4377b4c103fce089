// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt construction for the AI features.
//!
//! Every builder folds the user's profile, normalized constraints and the
//! request parameters into a single prompt string. Normalized keyword lists
//! drive the safety constraints; raw notes are included for nuance only.

use chrono::NaiveDate;
use serde_json::Value;

use crate::models::{DietaryGoals, KeywordCategory, User, WorkoutHistoryEntry};
use crate::services::nutrition::calculate_age;

/// Number of recent workouts summarized in workout prompts.
const HISTORY_SUMMARY_LEN: usize = 3;
const NOTES_PREVIEW_CHARS: usize = 50;

/// Profile view used when filling prompts.
#[derive(Debug, Clone, Copy)]
pub struct UserContext<'a> {
    pub user: &'a User,
    pub age: Option<u32>,
}

impl<'a> UserContext<'a> {
    pub fn from_user(user: &'a User, today: NaiveDate) -> Self {
        Self {
            user,
            age: calculate_age(&user.dob, today),
        }
    }

    pub fn age_str(&self) -> String {
        self.age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    fn height_str(&self) -> String {
        let inches = self.user.height_inches;
        if !(inches.is_finite() && inches > 0.0) {
            return "N/A".to_string();
        }
        let total = inches.round() as i64;
        format!("{}'{}\" ({} inches)", total / 12, total % 12, inches)
    }
}

/// Render a JSON request value for a prompt (strings without quotes).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "Not specified".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn join_normalized(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "None".to_string()
    } else {
        keywords.join(", ")
    }
}

fn join_raw(lines: &[String]) -> String {
    if lines.is_empty() {
        "None".to_string()
    } else {
        lines.join("; ")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn goals_str(goals: Option<&DietaryGoals>) -> String {
    match goals {
        Some(g) => format!(
            "{} kcal, {} g protein, < {} mg sodium, {} L water",
            g.calories, g.protein_grams, g.sodium_mg, g.water_liters
        ),
        None => "Not calculated".to_string(),
    }
}

/// Summarize the most recent workouts, newest first.
pub fn history_summary(history: &[WorkoutHistoryEntry]) -> String {
    let lines: Vec<String> = history
        .iter()
        .rev()
        .take(HISTORY_SUMMARY_LEN)
        .map(|entry| {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.timestamp)
                .map(|ts| ts.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|_| entry.timestamp.clone());

            let preview: String = entry.notes.chars().take(NOTES_PREVIEW_CHARS).collect();
            let ellipsis = if entry.notes.chars().count() > NOTES_PREVIEW_CHARS {
                "..."
            } else {
                ""
            };

            format!(
                "- {}: '{}' (Completed: {}, Difficulty: {}/10). Notes: '{}{}'",
                date,
                entry.plan_name().unwrap_or("Unnamed Plan"),
                display_value(&entry.completed),
                display_value(&entry.difficulty_rating),
                preview,
                ellipsis
            )
        })
        .collect();

    if lines.is_empty() {
        "No recent workout feedback recorded.".to_string()
    } else {
        lines.join("\n")
    }
}

/// General assistant chat.
pub fn assist_prompt(
    ctx: &UserContext<'_>,
    level: &str,
    goal: &str,
    performance: &str,
    message: &str,
) -> String {
    let user = ctx.user;
    format!(
        r#"You are GymBro, a friendly and supportive fitness AI assistant. The user is interacting with you through a fitness app.

User Profile & Context:
- Username: {username}
- Age: {age}
- Sex: {sex}
- Weight: {weight} lbs
- Height: {height}
- Stated Activity Level/Experience: {level}
- Stated Fitness Goal: {goal}
- Reported Recent Workout Performance: {performance}

--- Critical Constraints (Processed from User Input) ---
- Normalized Health Conditions: {health}
- Normalized Dietary Restrictions: {diet}
- Normalized Allergies: {allergies}

--- Original User Input (For Nuance/Context Only) ---
- Raw Health Input: {health_raw}
- Raw Dietary Input: {diet_raw}
- Raw Allergy Input: {allergies_raw}

- Calculated Dietary Goals (Optional Ref): {goals}

User's Message: "{message}"

Your Task:
1. Analyze the user's message and their full context (profile, goals, health info).
2. If the user seems to be venting or feeling down, respond empathetically and supportively first. Do not give medical advice.
3. Address the user's question with scientifically accurate fitness advice relevant to their level and goal.
4. Keep a supportive, encouraging tone and keep it concise (1-3 paragraphs).
5. Avoid promoting unrealistic fitness standards. Focus on consistency, health, and well-being.
6. CRITICAL SAFETY: Do NOT suggest exercises that conflict with the normalized health conditions, or foods that conflict with the normalized restrictions or allergies.
7. Format the response using simple HTML tags only (<p>, <b>, <strong>, <i>, <em>, <ul>, <li>, <br>). No Markdown. No <html>, <head> or <body> tags."#,
        username = user.username,
        age = ctx.age_str(),
        sex = user.sex.as_str(),
        weight = user.weight,
        height = ctx.height_str(),
        level = level,
        goal = goal,
        performance = performance,
        health = join_normalized(&user.health_concerns_normalized),
        diet = join_normalized(&user.dietary_restrictions_normalized),
        allergies = join_normalized(&user.allergies_normalized),
        health_raw = join_raw(&user.health_concerns_raw),
        diet_raw = join_raw(&user.dietary_restrictions_raw),
        allergies_raw = join_raw(&user.allergies_raw),
        goals = goals_str(user.dietary_goals.as_ref()),
        message = message,
    )
}

/// Parameters for workout generation, already defaulted.
#[derive(Debug, Clone)]
pub struct WorkoutOptions {
    pub level: String,
    pub goal: String,
    pub equipment: String,
    pub mood: Option<String>,
    pub mood_context: String,
    pub focus: String,
    pub duration: String,
    pub weight: String,
    pub height_inches: String,
}

/// Personalized workout plan (JSON output).
///
/// Works without a stored profile; missing fields read "N/A".
pub fn generate_workout_prompt(ctx: Option<&UserContext<'_>>, opts: &WorkoutOptions) -> String {
    let user = ctx.map(|c| c.user);
    let empty: &[String] = &[];
    let history = match user {
        Some(u) => history_summary(&u.workout_history),
        None => "None available".to_string(),
    };

    format!(
        r#"Generate a personalized workout plan for a user with the following profile:
- Age: {age}
- Sex: {sex}
- Weight: {weight} lbs
- Height: {height} inches
- Experience Level: {level}
- Goals: {goal}
- Desired Focus Area: {focus}
- Desired Duration: Approximately {duration} minutes
- Available Category/Equipment: {equipment}
- Current Mood (1-10, 1=very bad, 10=very good): {mood}
- Mood Context: {mood_context}
- Interpreted Health Conditions (Normalized): {health}
- Original Health Input (Raw): {health_raw}
- Interpreted Dietary Restrictions (Normalized): {diet}
- Interpreted Allergies (Normalized): {allergies}

Recent Workout History Summary (Last 3 Sessions, Newest First):
{history}

Constraints & Instructions:
- Generate the workout plan in the specified JSON format ONLY.
- The workout MUST suit the user's profile, goals, equipment, focus, duration, and mood.
- Leverage the recent workout history: if recent workouts were too easy or too hard, adjust accordingly.
- If mood is low (< 5), suggest a slightly less strenuous or shorter workout and say so in 'mood_adjustment_note'.
- Provide exercises with sets, reps or duration, rest periods, and concise form tips.
- CRITICAL: Base safety modifications on the normalized health conditions. Avoid high impact and deep squats for knee_pain or arthritis, heavy spinal loading for back_pain, breath holding for hypertension or heart_disease, and overhead pressing for shoulder_injury.

Required Output Format (JSON only):
{{
  "plan_name": "Personalized Workout for {focus}",
  "estimated_duration_minutes": {duration},
  "focus": "{focus}",
  "health_consideration_note": "string",
  "mood_adjustment_note": "string",
  "warm_up": [
    {{"exercise": "string", "duration": "string", "reps": "string (optional)", "sets": "integer (optional)", "form_tip": "string (optional)"}}
  ],
  "main_workout": [
    {{"exercise": "string", "sets": "integer", "reps": "string", "rest_seconds": "integer", "form_tip": "string"}}
  ],
  "cool_down": [
    {{"exercise": "string", "duration": "string", "form_tip": "string (optional)"}}
  ]
}}"#,
        age = ctx.map(|c| c.age_str()).unwrap_or_else(|| "N/A".to_string()),
        sex = user.map(|u| u.sex.as_str()).unwrap_or("N/A"),
        weight = opts.weight,
        height = opts.height_inches,
        level = opts.level,
        goal = opts.goal,
        focus = opts.focus,
        duration = opts.duration,
        equipment = opts.equipment,
        mood = opts.mood.as_deref().unwrap_or("Not specified"),
        mood_context = if opts.mood_context.is_empty() {
            "None"
        } else {
            opts.mood_context.as_str()
        },
        health = join_normalized(user.map_or(empty, |u| u.health_concerns_normalized.as_slice())),
        health_raw = join_raw(user.map_or(empty, |u| u.health_concerns_raw.as_slice())),
        diet = join_normalized(user.map_or(empty, |u| u.dietary_restrictions_normalized.as_slice())),
        allergies = join_normalized(user.map_or(empty, |u| u.allergies_normalized.as_slice())),
        history = history,
    )
}

/// Feedback on a finished workout, asking for the next session's plan.
pub fn update_workout_prompt(
    ctx: &UserContext<'_>,
    current_plan: &Value,
    completed: &str,
    difficulty: &str,
    notes: &str,
) -> String {
    let user = ctx.user;
    let plan_str =
        serde_json::to_string_pretty(current_plan).unwrap_or_else(|_| current_plan.to_string());

    format!(
        r#"Task: Evolve the user's workout approach based on their recent performance feedback.

User Profile Context:
- Experience Level: {level}
- Goal: {goal}

--- Critical Health Constraints (Processed from User Input) ---
- Normalized Health Conditions: {health}

--- Original Health Input (For Nuance/Context Only) ---
- Raw Health Input: {health_raw}

Workout Plan Just Completed:
```json
{plan}
```

User's Feedback on Completed Workout:
- Completed?: {completed}
- Difficulty Rating (1-10, 1=easy, 10=very hard): {difficulty}
- User Notes/Feelings: {notes}

Instructions:
1. Analyze the completed plan and the user's feedback.
2. Suggest specific progressions or regressions for the next workout.
3. Keep suggestions aligned with the user's goal and experience level.
4. CRITICAL SAFETY: every suggestion must be safe for the normalized health conditions. If the feedback mentions pain related to a listed condition, suggest modifications or regressions.
5. Output a JSON object with two keys: "explanation" (brief reasoning, simple HTML) and "updated_plan" (the complete plan JSON for the next session in the same structure as the completed plan, or an HTML string of modification suggestions if a full plan is not feasible).
6. Ensure valid JSON output. No text outside the JSON object."#,
        level = user.activity_level.as_str(),
        goal = user.fitness_goal.as_str(),
        health = join_normalized(&user.health_concerns_normalized),
        health_raw = join_raw(&user.health_concerns_raw),
        plan = plan_str,
        completed = completed,
        difficulty = difficulty,
        notes = notes,
    )
}

/// One meal idea that respects the user's constraints (HTML output).
pub fn meal_suggestion_prompt(
    ctx: &UserContext<'_>,
    goals: &DietaryGoals,
    meal_type: &str,
) -> String {
    let user = ctx.user;
    let meal_type = capitalize(meal_type);

    format!(
        r#"Generate a simple meal suggestion for a user.

User Profile Highlights:
- Goal: {goal}

--- Critical Dietary Constraints (Processed from User Input) ---
- Normalized Dietary Restrictions: {diet}
- Normalized Allergies: {allergies}
- Normalized Health Conditions (Consider for Diet): {health}

--- Original User Input (For Nuance/Context Only) ---
- Raw Dietary Input: {diet_raw}
- Raw Allergy Input: {allergies_raw}
- Raw Health Input: {health_raw}

Approximate Daily Targets (for context):
- Calories: {calories} kcal
- Protein: {protein} g
- Sodium: < {sodium} mg

Request:
- Suggest one meal idea suitable for: {meal_type}
- CRITICAL ADHERENCE: the meal MUST respect ALL normalized dietary restrictions and allergies.
- The meal should also suit the normalized health conditions (lower sugar for diabetes_type2, lower sodium for hypertension or kidney_disease, low fat for high_cholesterol).
- Provide meal name, brief description or ingredients, and rough calories/protein per serving.

Required Output Format (Simple HTML):
<h4>Suggested Meal ({meal_type}): [Meal Name]</h4>
<p><b>Description:</b> [Brief description].</p>
<p><b>Why it fits Constraints:</b> [1 sentence].</p>
<p><b>Approx. Nutrition (per serving):</b></p>
<ul><li>Calories: ~ [Number] kcal</li><li>Protein: ~ [Number] g</li></ul>
<p><i>Note: Nutritional values are estimates. Adjust portions as needed.</i></p>
Use only simple HTML tags: <h4>, <p>, <b>, <ul>, <li>, <i>. No Markdown."#,
        goal = user.fitness_goal.as_str(),
        diet = join_normalized(&user.dietary_restrictions_normalized),
        allergies = join_normalized(&user.allergies_normalized),
        health = join_normalized(&user.health_concerns_normalized),
        diet_raw = join_raw(&user.dietary_restrictions_raw),
        allergies_raw = join_raw(&user.allergies_raw),
        health_raw = join_raw(&user.health_concerns_raw),
        calories = goals.calories,
        protein = goals.protein_grams,
        sodium = goals.sodium_mg,
        meal_type = meal_type,
    )
}

/// Nutrition estimate and constraint check for a described meal.
pub fn analyze_meal_prompt(ctx: Option<&UserContext<'_>>, meal_description: &str) -> String {
    let empty: &[String] = &[];
    let (diet, allergies, diet_raw, allergies_raw) = match ctx {
        Some(c) => (
            c.user.dietary_restrictions_normalized.as_slice(),
            c.user.allergies_normalized.as_slice(),
            c.user.dietary_restrictions_raw.as_slice(),
            c.user.allergies_raw.as_slice(),
        ),
        None => (empty, empty, empty, empty),
    };

    format!(
        r#"Estimate approximate calories (kcal) and protein (g) for the meal described below.
Also check whether the meal seems to contain ingredients that conflict with the user's known dietary constraints.

Meal Description: "{meal}"

--- User's Dietary Constraints (Processed/Normalized) ---
- Restrictions: {diet}
- Allergies: {allergies}
--- Original User Dietary Input (Raw Context) ---
- Raw Restrictions: {diet_raw}
- Raw Allergies: {allergies_raw}

Instructions:
1. Provide estimates for calories and protein.
2. If the description clearly mentions an ingredient that conflicts with a normalized restriction or allergy, add ONE concise warning paragraph.
3. Do not add a warning without a clear conflict. Base warnings only on the normalized lists.

Required HTML Output Format:
<p>Estimated Calories: <b>[Number] kcal</b></p>
<p>Estimated Protein: <b>[Number] g</b></p>
<p><b>Potential Conflict Warning:</b> [only if a conflict is detected]</p>
<p><i>Note: Estimates are approximate. Ingredient analysis depends on description accuracy.</i></p>
Use only simple HTML tags. No Markdown."#,
        meal = meal_description,
        diet = join_normalized(diet),
        allergies = join_normalized(allergies),
        diet_raw = join_raw(diet_raw),
        allergies_raw = join_raw(allergies_raw),
    )
}

/// Feedback on a text description of exercise form (HTML output).
pub fn check_form_prompt(exercise: &str, form_description: &str, level: &str) -> String {
    format!(
        r#"Task: Analyze the user's description of their form for a specific exercise and provide constructive feedback.

Exercise: {exercise}
User's Experience Level: {level}
User's Description of Their Form: "{form}"

Instructions:
1. Based only on the user's description, provide specific, actionable feedback.
2. List 2-3 common mistakes people make when performing '{exercise}', especially for a {level}.
3. Offer clear tips for improvement focusing on technique and body mechanics.
4. Briefly mention key safety considerations for this exercise.
5. Keep the response encouraging, concise, and free of jargon.
6. Remind the user that text-based feedback cannot replace a visual assessment by a professional.
7. Format the response using simple HTML tags (<h4>, <p>, <b>, <ul>, <li>, <i>). No Markdown. No <html>, <head> or <body> tags."#,
        exercise = exercise,
        level = level,
        form = form_description,
    )
}

/// Map free-text notes onto a fixed vocabulary (JSON list output).
pub fn normalization_prompt(category: KeywordCategory, lines: &[String]) -> String {
    let keyword_list = category
        .vocabulary()
        .iter()
        .enumerate()
        .map(|(i, kw)| format!("{}. {}", i + 1, kw))
        .collect::<Vec<_>>()
        .join("\n");
    let input = serde_json::to_string(lines).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Analyze the following user-provided text describing their {kind}.
Identify any conditions/restrictions/allergies mentioned that are relevant to diet or exercise planning.
Map the user's description to the most appropriate keywords from the provided standardized list ONLY.
Output only a valid JSON list containing the matched standardized keywords.
If no keywords match, or the description is too vague or unrelated (e.g., "feeling tired"), output an empty JSON list: [].
Do not include keywords that are not explicitly supported by the user's text.

Allowed Standardized Keywords:
{keyword_list}

User Text Input List:
{input}

Required Output Format: Valid JSON list of strings (e.g., ["keyword1", "keyword2"])
JSON Output:"#,
        kind = category.description(),
        keyword_list = keyword_list,
        input = input,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, FitnessGoal, Sex};
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn test_user() -> User {
        User {
            username: "lifter".to_string(),
            email: "lifter@example.com".to_string(),
            salt: String::new(),
            hashed_password: String::new(),
            password_iterations: 1000,
            dob: "010195".to_string(),
            sex: Sex::Female,
            weight: 140.0,
            height_inches: 65.0,
            activity_level: ActivityLevel::LightlyActive,
            fitness_goal: FitnessGoal::GainMuscle,
            join_date: "010125".to_string(),
            max_streak: 0,
            health_concerns_raw: vec!["bad left knee".to_string()],
            dietary_restrictions_raw: vec![],
            allergies_raw: vec!["peanut butter makes me itchy".to_string()],
            health_concerns_normalized: vec!["knee_pain".to_string()],
            dietary_restrictions_normalized: vec![],
            allergies_normalized: vec!["peanuts".to_string()],
            dietary_goals: None,
            workout_history: vec![],
            current_workout_plan: None,
        }
    }

    fn entry(day: u32, name: &str, notes: &str) -> WorkoutHistoryEntry {
        WorkoutHistoryEntry {
            timestamp: format!("2025-05-{:02}T18:30:00Z", day),
            workout_plan: Some(json!({ "plan_name": name })),
            completed: json!("yes"),
            difficulty_rating: json!(7),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_history_summary_newest_first_and_limited() {
        let history = vec![
            entry(1, "A", ""),
            entry(2, "B", ""),
            entry(3, "C", ""),
            entry(4, "D", "felt strong"),
        ];

        let summary = history_summary(&history);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "- 2025-05-04: 'D' (Completed: yes, Difficulty: 7/10). Notes: 'felt strong'"
        );
        assert!(lines[2].contains("'B'"));
        assert!(!summary.contains("'A'"));
    }

    #[test]
    fn test_history_summary_truncates_notes() {
        let long_notes = "x".repeat(60);
        let summary = history_summary(&[entry(1, "A", &long_notes)]);
        assert!(summary.ends_with(&format!("'{}...'", "x".repeat(50))));
    }

    #[test]
    fn test_history_summary_empty_and_unnamed() {
        assert_eq!(history_summary(&[]), "No recent workout feedback recorded.");

        let mut e = entry(1, "A", "");
        e.workout_plan = None;
        e.timestamp = "yesterday".to_string();
        assert!(history_summary(&[e]).starts_with("- yesterday: 'Unnamed Plan'"));
    }

    #[test]
    fn test_assist_prompt_includes_constraints() {
        let user = test_user();
        let ctx = UserContext::from_user(&user, today());
        let prompt = assist_prompt(&ctx, "lightly_active", "gain_muscle", "average", "Hi!");

        assert!(prompt.contains("- Age: 30"));
        assert!(prompt.contains("Normalized Health Conditions: knee_pain"));
        assert!(prompt.contains("Normalized Dietary Restrictions: None"));
        assert!(prompt.contains("Raw Allergy Input: peanut butter makes me itchy"));
        assert!(prompt.contains("Height: 5'5\""));
        assert!(prompt.contains("User's Message: \"Hi!\""));
    }

    #[test]
    fn test_generate_workout_prompt_embeds_options() {
        let user = test_user();
        let ctx = UserContext::from_user(&user, today());
        let opts = WorkoutOptions {
            level: "Beginner".to_string(),
            goal: "Strength".to_string(),
            equipment: "Dumbbells".to_string(),
            mood: None,
            mood_context: String::new(),
            focus: "Upper Body".to_string(),
            duration: "45".to_string(),
            weight: "140".to_string(),
            height_inches: "65".to_string(),
        };

        let prompt = generate_workout_prompt(Some(&ctx), &opts);

        assert!(prompt.contains("\"plan_name\": \"Personalized Workout for Upper Body\""));
        assert!(prompt.contains("\"estimated_duration_minutes\": 45,"));
        assert!(prompt.contains("Current Mood (1-10, 1=very bad, 10=very good): Not specified"));
        assert!(prompt.contains("Mood Context: None"));
        assert!(prompt.contains("(Normalized): knee_pain"));
        assert!(prompt.contains("No recent workout feedback recorded."));

        let anonymous = generate_workout_prompt(None, &opts);
        assert!(anonymous.contains("- Age: N/A"));
        assert!(anonymous.contains("Summary (Last 3 Sessions, Newest First):\nNone available"));
    }

    #[test]
    fn test_meal_suggestion_capitalizes_meal_type() {
        let user = test_user();
        let ctx = UserContext::from_user(&user, today());
        let goals = DietaryGoals {
            calories: 2200,
            protein_grams: 114,
            sodium_mg: 2300,
            water_liters: 2.1,
        };

        let prompt = meal_suggestion_prompt(&ctx, &goals, "bREAKFAST");

        assert!(prompt.contains("suitable for: Breakfast"));
        assert!(prompt.contains("- Calories: 2200 kcal"));
        assert!(prompt.contains("Normalized Allergies: peanuts"));
    }

    #[test]
    fn test_analyze_meal_prompt_anonymous() {
        let prompt = analyze_meal_prompt(None, "cheese sandwich");
        assert!(prompt.contains("Meal Description: \"cheese sandwich\""));
        assert!(prompt.contains("- Restrictions: None"));
        assert!(prompt.contains("- Raw Allergies: None"));
    }

    #[test]
    fn test_normalization_prompt_lists_vocabulary() {
        let prompt = normalization_prompt(
            KeywordCategory::Allergy,
            &["peanuts".to_string(), "shrimp".to_string()],
        );

        assert!(prompt.contains("describing their allergies"));
        assert!(prompt.contains("1. peanuts\n2. tree_nuts"));
        assert!(prompt.contains(r#"["peanuts","shrimp"]"#));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("yes")), "yes");
        assert_eq!(display_value(&json!(7)), "7");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "Not specified");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("dinner"), "Dinner");
        assert_eq!(capitalize("ANY"), "Any");
        assert_eq!(capitalize(""), "");
    }
}
