// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::generator::{GenerateError, TextGenerator};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const RANGER_INSTRUCTION: &str = "Ты дружелюбный и знающий гид-рейнджер вольерного комплекса «Лаура» \
в Кавказском заповеднике. Отвечай по-русски, кратко (2-4 предложения) и увлекательно. \
Рассказывай о животных комплекса, их повадках и охране природы. \
Если вопрос не связан с животными или заповедником, вежливо верни разговор к ним.";

/// Talks to the Gemini REST API with a ranger-guide persona.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            base_url: BASE_URL.to_owned(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the client at another `.../models` endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, GenerateError> {
        let url = format!(
            "{}/{model}:generateContent",
            self.base_url.trim_end_matches('/'),
            model = self.model,
        );

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|err| GenerateError::Request(err.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_owned());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerateError::Decode(err.without_url().to_string()))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate_reply(
        &self,
        user_text: &str,
        context: Option<&str>,
    ) -> Result<String, GenerateError> {
        let request = build_request(user_text, context);
        tracing::debug!(model = %self.model, has_context = context.is_some(), "calling gemini");
        let reply = self.send_request(&request).await;
        if let Err(err) = &reply {
            tracing::warn!(model = %self.model, error = %err, "gemini request failed");
        }
        reply
    }
}

fn build_prompt(user_text: &str, context: Option<&str>) -> String {
    match context {
        Some(animal) => format!(
            "Посетитель сейчас смотрит на животное: {animal}.\nВопрос посетителя: {user_text}"
        ),
        None => user_text.to_owned(),
    }
}

fn build_request(user_text: &str, context: Option<&str>) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_owned()),
            parts: vec![Part {
                text: build_prompt(user_text, context),
            }],
        }],
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part {
                text: RANGER_INSTRUCTION.to_owned(),
            }],
        }),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, GenerateError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerateError::EmptyResponse);
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: &str) -> GenerateError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_owned());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_owned());

    GenerateError::Http {
        status: status.as_u16(),
        message,
    }
}
