// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Guide chat.
//!
//! [`ChatSession`] is the conversation state machine; [`TextGenerator`] is the service that
//! produces the guide's answers.

pub mod gemini;
pub mod generator;
pub mod message;
pub mod session;

pub use gemini::{GeminiGenerator, DEFAULT_GEMINI_MODEL};
pub use generator::{generate_with_timeout, GenerateError, TextGenerator, UnavailableGenerator};
pub use message::{ChatMessage, ChatRole, MessageId};
pub use session::{ChatRequest, ChatSession, APOLOGY_TEXT, WELCOME_TEXT};
