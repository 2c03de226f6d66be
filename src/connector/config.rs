use std::time::Duration;

use crate::domain::DomainError;

/// Default target: the SmartSpend backend running locally.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Where the assistant backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    base_url: String,
    /// `None` leaves reqwest's default (no request timeout).
    timeout: Option<Duration>,
}

impl AssistantConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        self.base_url = base.trim_end_matches('/').to_string();
        self
    }

    /// Construct from environment variables:
    ///
    /// | Variable                 | Default                 |
    /// |--------------------------|-------------------------|
    /// | `FINASSIST_API_URL`      | `http://localhost:8000` |
    /// | `FINASSIST_TIMEOUT_SECS` | unset (no timeout)      |
    pub fn from_env() -> Result<Self, DomainError> {
        let base =
            std::env::var("FINASSIST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let config = Self::new(base);

        match std::env::var("FINASSIST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    DomainError::config(format!("FINASSIST_TIMEOUT_SECS is not a number: {raw}"))
                })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            Err(_) => Ok(config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Supabase project coordinates plus the session token of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Reads `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `SUPABASE_ACCESS_TOKEN`.
    /// Returns `None` unless both the URL and the key are set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SUPABASE_URL").ok()?;
        let key = std::env::var("SUPABASE_ANON_KEY").ok()?;
        let config = Self::new(url, key);
        match std::env::var("SUPABASE_ACCESS_TOKEN") {
            Ok(token) if !token.is_empty() => Some(config.with_access_token(token)),
            _ => Some(config),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}
