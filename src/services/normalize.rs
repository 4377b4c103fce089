// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parsing of model output and keyword normalization.

use serde_json::Value;

use crate::models::KeywordCategory;
use crate::services::ai::AiService;
use crate::services::prompts::normalization_prompt;

/// Split a free-text field into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Locate the JSON payload in model output.
///
/// Strips Markdown code fences, then takes the span from the first `{` or
/// `[` to the last `}` or `]`, whichever kind they are.
pub fn extract_json(text: &str) -> Option<&str> {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        body = rest.strip_prefix("json").unwrap_or(rest);
        body = body.trim_end();
        body = body.strip_suffix("```").unwrap_or(body);
        body = body.trim();
    }

    let start = body.find(['{', '['])?;
    let end = body.rfind(['}', ']'])?;
    if end < start {
        return None;
    }

    Some(&body[start..=end])
}

/// Parse model output as JSON, tolerating fences and surrounding prose.
pub fn parse_json_response(text: &str) -> Option<Value> {
    let candidate = extract_json(text)?;
    match serde_json::from_str(candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "Model output is not valid JSON");
            None
        }
    }
}

/// Map free-text notes onto the category's vocabulary.
///
/// Returns an empty list when there is nothing to normalize or when the AI
/// call or its output is unusable; normalization never blocks the caller.
pub async fn normalize_keywords(
    ai: &AiService,
    raw: &[String],
    category: KeywordCategory,
) -> Vec<String> {
    let lines: Vec<String> = raw
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return Vec::new();
    }

    let prompt = normalization_prompt(category, &lines);
    let output = match ai.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, category = category.description(), "Keyword normalization failed");
            return Vec::new();
        }
    };

    let Some(Value::Array(items)) = parse_json_response(&output) else {
        tracing::warn!(
            category = category.description(),
            "Keyword normalization returned no JSON list"
        );
        return Vec::new();
    };

    let mut keywords: Vec<String> = Vec::new();
    for item in items {
        let Some(keyword) = item.as_str() else {
            continue;
        };
        if !category.contains(keyword) {
            tracing::debug!(keyword, "Dropping keyword outside vocabulary");
            continue;
        }
        if !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }

    tracing::debug!(?keywords, category = category.description(), "Normalized keywords");
    keywords
}
