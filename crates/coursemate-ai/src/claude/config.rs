//! Claude API client configuration.

use std::fmt;
use std::time::Duration;

use crate::AiError;

pub(crate) const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// How the client authenticates with the Claude API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Anthropic API key (`x-api-key` header).
    ApiKey,
    /// Bearer token (`Authorization: Bearer`).
    OAuth,
}

/// Claude API client configuration.
#[derive(Clone)]
pub struct ClaudeConfig {
    pub token: String,
    pub auth_method: AuthMethod,
    pub api_url: String,
    pub request_timeout: Duration,
}

impl fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("auth_method", &self.auth_method)
            .field("token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ClaudeConfig {
    pub fn new(token: impl Into<String>, auth_method: AuthMethod) -> Self {
        Self {
            token: token.into(),
            auth_method,
            api_url: ANTHROPIC_API_URL.to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Create config from the environment.
    ///
    /// Resolution order:
    /// 1. `ANTHROPIC_API_KEY` (API key auth)
    /// 2. `ANTHROPIC_AUTH_TOKEN` (bearer auth)
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AiError> {
        if let Some(key) = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()) {
            return Ok(Self::new(key, AuthMethod::ApiKey));
        }

        if let Some(token) = lookup("ANTHROPIC_AUTH_TOKEN").filter(|t| !t.trim().is_empty()) {
            return Ok(Self::new(token, AuthMethod::OAuth));
        }

        Err(AiError::NotConfigured(
            "Claude API not configured. Set ANTHROPIC_API_KEY or ANTHROPIC_AUTH_TOKEN.".into(),
        ))
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
