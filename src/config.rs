//! Configuration management for the relay
//!
//! Configuration is loaded from environment variables. Every reader takes a
//! lookup function so tests can supply variables without touching the
//! process environment.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API base URL (the relay appends `/messages`)
    pub anthropic_api_url: String,
    /// Optional key used to seed the credential store on startup
    pub anthropic_api_key: Option<String>,

    /// Location of the JSON credential file
    pub credential_file: PathBuf,

    /// Chat persistence backend base URL; in-memory history when unset
    pub chat_api_url: Option<String>,
    /// Bearer token for the chat persistence backend
    pub chat_api_token: Option<String>,

    /// HTTP client timeout (in seconds)
    pub request_timeout_seconds: u64,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

/// Read a variable from the process environment
pub fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            anthropic_api_url: lookup("ANTHROPIC_API_URL")
                .unwrap_or_else(|| "https://api.anthropic.com/v1".to_string()),
            anthropic_api_key: Self::api_key_from(&lookup),

            credential_file: Self::credential_file_from(&lookup),

            chat_api_url: non_empty(&lookup, "CHAT_API_URL"),
            chat_api_token: non_empty(&lookup, "CHAT_API_TOKEN"),

            request_timeout_seconds: lookup("RELAY_REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|| "120".to_string())
                .parse()
                .context("Invalid RELAY_REQUEST_TIMEOUT_SECONDS")?,

            log_json: Self::log_json_from(&lookup),
        })
    }

    /// `ANTHROPIC_API_KEY`, when set and non-empty
    pub fn api_key_from<F>(lookup: &F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        non_empty(lookup, "ANTHROPIC_API_KEY")
    }

    /// `RELAY_CREDENTIAL_FILE`, defaulting to `.relay/credentials.json`
    pub fn credential_file_from<F>(lookup: &F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("RELAY_CREDENTIAL_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".relay/credentials.json"))
    }

    /// `RELAY_LOG_JSON`, true for `true` or `1`
    pub fn log_json_from<F>(lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("RELAY_LOG_JSON")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false)
    }

    /// Configuration pointing at explicit endpoints, without touching the environment
    pub fn with_endpoints(anthropic_api_url: &str, chat_api_url: Option<&str>) -> Self {
        Self {
            anthropic_api_url: anthropic_api_url.to_string(),
            anthropic_api_key: None,
            credential_file: PathBuf::from(".relay/credentials.json"),
            chat_api_url: chat_api_url.map(|s| s.to_string()),
            chat_api_token: None,
            request_timeout_seconds: 120,
            log_json: false,
        }
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.is_empty())
}
