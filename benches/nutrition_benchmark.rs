use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use gymbro::models::{ActivityLevel, FitnessGoal, Sex, WorkoutHistoryEntry};
use gymbro::services::normalize::extract_json;
use gymbro::services::nutrition::{calculate_dietary_goals, BodyProfile};
use gymbro::services::prompts::history_summary;
use serde_json::json;
use std::hint::black_box;

fn benchmark_dietary_goals(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date");
    let profile = BodyProfile {
        dob: "071588",
        sex: Sex::Female,
        weight_lbs: 142.0,
        height_inches: 64.5,
        activity_level: ActivityLevel::VeryActive,
        fitness_goal: FitnessGoal::LoseWeight,
    };
    let health = vec!["hypertension".to_string(), "knee_pain".to_string()];

    c.bench_function("calculate_dietary_goals", |b| {
        b.iter(|| calculate_dietary_goals(black_box(profile), black_box(&health), today))
    });
}

fn benchmark_response_parsing(c: &mut Criterion) {
    let plan = json!({
        "plan_name": "Personalized Workout for Full Body",
        "main_workout": (0..12).map(|i| json!({
            "exercise": format!("Exercise {}", i),
            "sets": 3,
            "reps": "8-12",
            "rest_seconds": 60,
            "form_tip": "Control the eccentric."
        })).collect::<Vec<_>>()
    });
    let fenced = format!(
        "Here is your plan:\n```json\n{}\n```\nStay hydrated!",
        serde_json::to_string_pretty(&plan).expect("serializable")
    );

    let mut group = c.benchmark_group("model_output");

    group.bench_function("extract_json_fenced", |b| {
        b.iter(|| extract_json(black_box(&fenced)))
    });

    let history: Vec<WorkoutHistoryEntry> = (0..7)
        .map(|day| WorkoutHistoryEntry {
            timestamp: format!("2026-05-{:02}T18:00:00Z", day + 1),
            workout_plan: Some(plan.clone()),
            completed: json!("yes"),
            difficulty_rating: json!(7),
            notes: "Felt strong on the presses, lower back a little tight afterwards.".to_string(),
        })
        .collect();

    group.bench_function("history_summary", |b| {
        b.iter(|| history_summary(black_box(&history)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_dietary_goals, benchmark_response_parsing);
criterion_main!(benches);
