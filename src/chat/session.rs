// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::generator::{GenerateError, TextGenerator};
use super::message::{ChatMessage, ChatRole, MessageId};

pub const WELCOME_TEXT: &str =
    "Привет! Я ваш виртуальный гид по комплексу «Лаура». Спрашивайте меня о животных или заповеднике! 🌲";

pub const APOLOGY_TEXT: &str =
    "Простите, сейчас я не могу ответить. Проверьте соединение или API ключ.";

/// A question accepted by [`ChatSession::begin_send`] that still needs an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub user_text: String,
    pub context: Option<String>,
}

/// Conversation with the guide.
///
/// At most one request is in flight. The log only ever grows.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pending: bool,
    draft: String,
    next_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            messages: Vec::new(),
            pending: false,
            draft: String::new(),
            next_id: 0,
        };
        let id = session.allocate_id();
        session
            .messages
            .push(ChatMessage::new(id, ChatRole::Model, WELCOME_TEXT));
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// Accepts `text` as the next question.
    ///
    /// Returns `None` without touching the session when `text` is blank or a request is already
    /// in flight. Otherwise the user message is logged, the draft is cleared and the session
    /// waits for [`ChatSession::complete`].
    pub fn begin_send(&mut self, text: &str, context: Option<&str>) -> Option<ChatRequest> {
        if self.pending || text.trim().is_empty() {
            return None;
        }

        let id = self.allocate_id();
        self.messages
            .push(ChatMessage::new(id, ChatRole::User, text));
        self.draft.clear();
        self.pending = true;

        Some(ChatRequest {
            user_text: text.to_owned(),
            context: context.map(str::to_owned),
        })
    }

    /// Sends the current draft.
    pub fn submit_draft(&mut self, context: Option<&str>) -> Option<ChatRequest> {
        let draft = self.draft.clone();
        self.begin_send(&draft, context)
    }

    /// Records the outcome of the in-flight request and returns to idle.
    ///
    /// Failures become an apology message flagged as an error; they are logged, never returned.
    pub fn complete(&mut self, outcome: Result<String, GenerateError>) {
        if !self.pending {
            tracing::debug!("ignoring chat reply with no request in flight");
            return;
        }

        let id = self.allocate_id();
        let message = match outcome {
            Ok(text) => ChatMessage::new(id, ChatRole::Model, text),
            Err(err) => {
                tracing::warn!(error = %err, "guide reply failed");
                ChatMessage::error(id, APOLOGY_TEXT)
            }
        };
        self.messages.push(message);
        self.pending = false;
    }

    /// Sends `text` and waits for the reply.
    pub async fn send<G>(&mut self, text: &str, context: Option<&str>, generator: &G)
    where
        G: TextGenerator + ?Sized,
    {
        let Some(request) = self.begin_send(text, context) else {
            return;
        };
        let outcome = generator
            .generate_reply(&request.user_text, request.context.as_deref())
            .await;
        self.complete(outcome);
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ChatSession, APOLOGY_TEXT, WELCOME_TEXT};
    use crate::chat::{ChatRole, GenerateError, TextGenerator, UnavailableGenerator};

    #[derive(Default)]
    struct RecordingGenerator {
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate_reply(
            &self,
            user_text: &str,
            context: Option<&str>,
        ) -> Result<String, GenerateError> {
            self.calls
                .lock()
                .unwrap()
                .push((user_text.to_owned(), context.map(str::to_owned)));
            Ok(format!("ответ: {user_text}"))
        }
    }

    #[test]
    fn starts_with_the_welcome_message() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role(), ChatRole::Model);
        assert_eq!(session.messages()[0].text(), WELCOME_TEXT);
        assert!(!session.is_pending());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut session = ChatSession::new();
        session.set_draft("   ");
        assert!(session.submit_draft(None).is_none());
        assert!(session.begin_send("", None).is_none());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.draft(), "   ");
    }

    #[test]
    fn second_send_while_pending_is_ignored() {
        let mut session = ChatSession::new();
        let request = session.begin_send("Где волки?", Some("Волк")).unwrap();
        assert_eq!(request.context.as_deref(), Some("Волк"));
        assert!(session.is_pending());

        assert!(session.begin_send("И ещё вопрос", None).is_none());
        assert_eq!(session.messages().len(), 2);

        session.complete(Ok("В левом верхнем углу.".to_owned()));
        assert!(!session.is_pending());
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn message_ids_strictly_increase() {
        let mut session = ChatSession::new();
        session.begin_send("a", None).unwrap();
        session.complete(Ok("b".to_owned()));
        session.begin_send("c", None).unwrap();
        session.complete(Err(GenerateError::EmptyResponse));

        let ids: Vec<_> = session.messages().iter().map(|m| m.id()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn stray_completion_is_dropped() {
        let mut session = ChatSession::new();
        session.complete(Ok("нежданный ответ".to_owned()));
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn send_logs_question_and_answer() {
        let generator = RecordingGenerator::default();
        let mut session = ChatSession::new();
        session.set_draft("Что едят зубры?");

        session.send("Что едят зубры?", Some("Зубр"), &generator).await;

        let texts: Vec<_> = session.messages().iter().map(|m| m.text()).collect();
        assert_eq!(
            texts,
            vec![WELCOME_TEXT, "Что едят зубры?", "ответ: Что едят зубры?"]
        );
        assert_eq!(session.draft(), "");
        assert!(!session.is_pending());
        assert_eq!(
            generator.calls.lock().unwrap().as_slice(),
            &[("Что едят зубры?".to_owned(), Some("Зубр".to_owned()))]
        );
    }

    #[tokio::test]
    async fn failed_send_appends_the_apology() {
        let mut session = ChatSession::new();
        session.send("Привет", None, &UnavailableGenerator).await;

        let last = session.messages().last().unwrap();
        assert_eq!(last.role(), ChatRole::Model);
        assert_eq!(last.text(), APOLOGY_TEXT);
        assert!(last.is_error());
        assert_eq!(session.messages().len(), 3);
        assert!(!session.is_pending());
    }
}
