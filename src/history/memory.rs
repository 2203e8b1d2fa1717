//! In-memory chat history
//!
//! Keeps saved messages in a `Vec` in call order. Used when no chat backend
//! is configured, and as a recording collaborator in tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::ChatHistory;
use crate::error::PersistenceError;

/// A message as it was handed to `save_message`
#[derive(Debug, Clone, PartialEq)]
pub struct SavedMessage {
    pub chat_id: String,
    pub content: String,
    pub is_user_message: bool,
}

/// Chat history kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    saved: Mutex<Vec<SavedMessage>>,
    calls: Mutex<usize>,
    failure: Option<String>,
}

impl InMemoryHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history whose every save fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Messages saved so far, in call order
    pub fn saved(&self) -> Vec<SavedMessage> {
        match self.saved.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages saved for one chat, in call order
    pub fn saved_for(&self, chat_id: &str) -> Vec<SavedMessage> {
        self.saved()
            .into_iter()
            .filter(|m| m.chat_id == chat_id)
            .collect()
    }

    /// Number of `save_message` calls, successful or not
    pub fn call_count(&self) -> usize {
        match self.calls.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl ChatHistory for InMemoryHistory {
    async fn save_message(
        &self,
        content: &str,
        is_user_message: bool,
        chat_id: &str,
    ) -> Result<(), PersistenceError> {
        {
            let mut calls = match self.calls.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *calls += 1;
        }

        if let Some(reason) = &self.failure {
            return Err(PersistenceError::Rejected(reason.clone()));
        }

        let mut saved = match self.saved.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        saved.push(SavedMessage {
            chat_id: chat_id.to_string(),
            content: content.to_string(),
            is_user_message,
        });
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }
}
