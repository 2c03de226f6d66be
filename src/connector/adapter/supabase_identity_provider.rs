use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::IdentityProvider;
use crate::connector::SupabaseConfig;
use crate::domain::{DomainError, UserIdentity};

const USER_PATH: &str = "/auth/v1/user";

/// Subset of the Supabase `GET /auth/v1/user` response we need.
#[derive(Deserialize)]
struct SupabaseUser {
    id: String,
}

/// [`IdentityProvider`] that asks Supabase Auth who owns the current access
/// token.
///
/// No token means no session and no request is made. 401/403 from Supabase
/// also count as "logged out"; anything else unexpected is an error.
pub struct SupabaseIdentityProvider {
    client: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseIdentityProvider {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Option<Self> {
        SupabaseConfig::from_env().map(Self::new)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn current_user(&self) -> Result<Option<UserIdentity>, DomainError> {
        let Some(token) = self.config.access_token() else {
            debug!("SupabaseIdentityProvider: no access token, treating as logged out");
            return Ok(None);
        };

        let url = format!("{}{}", self.config.url(), USER_PATH);
        let response = self
            .client
            .get(&url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DomainError::auth(format!("SupabaseIdentityProvider: request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!("SupabaseIdentityProvider: session rejected ({status})");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("SupabaseIdentityProvider: auth API returned {status}: {body}");
            return Err(DomainError::auth(format!(
                "SupabaseIdentityProvider: auth API returned {status}"
            )));
        }

        let user: SupabaseUser = response.json().await.map_err(|e| {
            DomainError::auth(format!("SupabaseIdentityProvider: failed to parse user: {e}"))
        })?;

        Ok(Some(UserIdentity::new(user.id)))
    }
}
