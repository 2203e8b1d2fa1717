//! Translation between conversation messages and the Anthropic format
//!
//! Request side: role mapping plus the fixed generation parameters.
//! Response side: shape validation and reply extraction.

use super::types::{
    ConversationMessage, MessagesRequest, MessagesResponse, ProviderMessage, ProviderRole, Sender,
};
use crate::error::{RelayError, RelayResult};

/// Model every request is sent to
pub const MODEL: &str = "claude-3-opus-20240229";
/// Output token cap for every request
pub const MAX_TOKENS: u32 = 1000;
/// Sampling temperature for every request
pub const TEMPERATURE: f64 = 0.7;

/// Map a conversation sender to a provider role
pub fn to_provider_role(sender: Sender) -> ProviderRole {
    match sender {
        Sender::Ai => ProviderRole::Assistant,
        Sender::User => ProviderRole::User,
    }
}

/// Map a conversation elementwise, preserving order and count
pub fn to_provider_messages(messages: &[ConversationMessage]) -> Vec<ProviderMessage> {
    messages
        .iter()
        .map(|m| ProviderMessage {
            role: to_provider_role(m.sender),
            content: m.content.clone(),
        })
        .collect()
}

/// Build the request body for a conversation
pub fn build_request(messages: &[ConversationMessage]) -> MessagesRequest {
    MessagesRequest {
        model: MODEL.to_string(),
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        messages: to_provider_messages(messages),
    }
}

/// Pull `content[0].text` out of a response
///
/// Fails when `content` is missing or empty, or when the first block has no
/// text or an empty one.
pub fn extract_reply(response: &MessagesResponse) -> RelayResult<String> {
    let first = response
        .content
        .as_ref()
        .and_then(|blocks| blocks.first())
        .ok_or_else(|| RelayError::MalformedResponse("missing content".to_string()))?;

    match first.text.as_deref() {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(RelayError::MalformedResponse(
            "first content block has no text".to_string(),
        )),
    }
}
