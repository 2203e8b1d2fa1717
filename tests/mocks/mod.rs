//! Mock infrastructure for testing external services
//!
//! - Anthropic Messages API (the provider)
//! - Chat API (the history backend)

#![allow(dead_code)]

pub mod anthropic;
pub mod chat_api;

pub use anthropic::*;
pub use chat_api::*;
