// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the hosted generative-language API (Gemini `generateContent`).
//!
//! Every AI feature is a single text-in, text-out call: the prompt is sent as
//! one user turn and the text parts of the first candidate are concatenated.

use crate::config::Config;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Text returned to clients when the AI call fails.
pub const FALLBACK_RESPONSE: &str = "Sorry, I encountered an error processing your request.";

/// Generative-language API client.
#[derive(Clone)]
pub struct AiService {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    /// Canned responses (offline mode)
    mock: Option<Arc<MockAi>>,
}

/// Offline responder used by tests.
#[derive(Default)]
pub struct MockAi {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl AiService {
    /// Create a client from application configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
            mock: None,
        }
    }

    /// Create an offline client that replays `responses` in order.
    ///
    /// Once the responses are used up every call fails.
    pub fn new_mock<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = MockAi {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        };

        Self {
            http: reqwest::Client::new(),
            base_url: "http://mock.invalid".to_string(),
            model: "mock".to_string(),
            api_key: String::new(),
            mock: Some(Arc::new(mock)),
        }
    }

    /// Prompts received so far in offline mode.
    pub fn mock_prompts(&self) -> Vec<String> {
        self.mock
            .as_ref()
            .map(|m| {
                m.prompts
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .clone()
            })
            .unwrap_or_default()
    }

    /// Send a prompt and return the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        if let Some(mock) = &self.mock {
            return mock.respond(prompt);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AiService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Generative API rate limit hit (429)");
                return Err(AppError::AiService("Rate limit exceeded".to_string()));
            }

            return Err(AppError::AiService(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiService(format!("Invalid response body: {}", e)))?;

        extract_text(parsed)
    }

    /// Like [`generate`](Self::generate), but logs failures and answers with
    /// [`FALLBACK_RESPONSE`] instead.
    pub async fn generate_or_fallback(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "AI generation failed, using fallback response");
                FALLBACK_RESPONSE.to_string()
            }
        }
    }
}

impl MockAi {
    fn respond(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .ok_or_else(|| AppError::AiService("No mock response available".to_string()))
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, AppError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(AppError::AiService(format!("Prompt blocked: {}", reason)));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(AppError::AiService("Empty response".to_string()));
    }
    Ok(text)
}
