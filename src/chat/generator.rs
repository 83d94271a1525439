// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("no API key configured for the guide")]
    MissingApiKey,
    #[error("request to the text service failed: {0}")]
    Request(String),
    #[error("text service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("text service response could not be decoded: {0}")]
    Decode(String),
    #[error("text service returned no text")]
    EmptyResponse,
    #[error("text service did not answer within {0:?}")]
    Timeout(Duration),
}

/// External service that answers visitor questions.
///
/// `context` is the name of the animal the visitor is looking at, passed through untouched.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_reply(
        &self,
        user_text: &str,
        context: Option<&str>,
    ) -> Result<String, GenerateError>;
}

/// Stand-in used when no API key is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGenerator;

#[async_trait]
impl TextGenerator for UnavailableGenerator {
    async fn generate_reply(
        &self,
        _user_text: &str,
        _context: Option<&str>,
    ) -> Result<String, GenerateError> {
        Err(GenerateError::MissingApiKey)
    }
}

/// Bounds a generator call by `timeout`, if any.
pub async fn generate_with_timeout(
    generator: &dyn TextGenerator,
    user_text: &str,
    context: Option<&str>,
    timeout: Option<Duration>,
) -> Result<String, GenerateError> {
    let call = generator.generate_reply(user_text, context);
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| GenerateError::Timeout(limit))?,
        None => call.await,
    }
}
