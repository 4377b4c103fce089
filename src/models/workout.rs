// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout history log.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of workouts retained per user.
pub const MAX_WORKOUT_HISTORY: usize = 7;

/// One submitted workout with the user's feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutHistoryEntry {
    /// When the feedback was submitted (RFC3339)
    pub timestamp: String,
    /// The plan that was performed, as produced by workout generation
    #[serde(default)]
    pub workout_plan: Option<Value>,
    /// Completion flag as sent by the client ("yes", true, ...)
    #[serde(default)]
    pub completed: Value,
    /// Difficulty rating (1-10) as sent by the client
    #[serde(default)]
    pub difficulty_rating: Value,
    #[serde(default)]
    pub notes: String,
}

impl WorkoutHistoryEntry {
    /// Plan name from the stored plan, if it has one.
    pub fn plan_name(&self) -> Option<&str> {
        self.workout_plan
            .as_ref()
            .and_then(|plan| plan.get("plan_name"))
            .and_then(Value::as_str)
    }
}

/// Append an entry, evicting the oldest ones beyond `MAX_WORKOUT_HISTORY`.
pub fn push_bounded(history: &mut Vec<WorkoutHistoryEntry>, entry: WorkoutHistoryEntry) {
    history.push(entry);
    if history.len() > MAX_WORKOUT_HISTORY {
        let excess = history.len() - MAX_WORKOUT_HISTORY;
        history.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(n: usize) -> WorkoutHistoryEntry {
        WorkoutHistoryEntry {
            timestamp: format!("2025-01-{:02}T10:00:00Z", n + 1),
            workout_plan: Some(json!({ "plan_name": format!("Plan {}", n) })),
            completed: json!(true),
            difficulty_rating: json!(5),
            notes: String::new(),
        }
    }

    #[test]
    fn test_push_bounded_keeps_last_seven() {
        let mut history = Vec::new();
        for n in 0..10 {
            push_bounded(&mut history, entry(n));
            assert!(history.len() <= MAX_WORKOUT_HISTORY);
        }

        assert_eq!(history.len(), MAX_WORKOUT_HISTORY);
        assert_eq!(history.first().unwrap().plan_name(), Some("Plan 3"));
        assert_eq!(history.last().unwrap().plan_name(), Some("Plan 9"));
    }

    #[test]
    fn test_push_bounded_trims_oversized_history() {
        // Documents written by older code may hold more than the cap
        let mut history: Vec<_> = (0..12).map(entry).collect();
        push_bounded(&mut history, entry(12));

        assert_eq!(history.len(), MAX_WORKOUT_HISTORY);
        assert_eq!(history.first().unwrap().plan_name(), Some("Plan 6"));
    }

    #[test]
    fn test_plan_name_missing() {
        let mut e = entry(0);
        e.workout_plan = Some(json!("<p>free text</p>"));
        assert_eq!(e.plan_name(), None);

        e.workout_plan = None;
        assert_eq!(e.plan_name(), None);
    }

    #[test]
    fn test_entry_deserializes_with_defaults() {
        let e: WorkoutHistoryEntry =
            serde_json::from_value(json!({ "timestamp": "2025-01-01T00:00:00Z" })).unwrap();
        assert_eq!(e.completed, Value::Null);
        assert!(e.notes.is_empty());
    }
}
