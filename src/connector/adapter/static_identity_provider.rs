use async_trait::async_trait;

use crate::application::IdentityProvider;
use crate::domain::{DomainError, UserIdentity};

/// Identity provider with a fixed answer. Used by the CLI (`--user-id`) and in
/// tests.
pub struct StaticIdentityProvider {
    user: Option<UserIdentity>,
}

impl StaticIdentityProvider {
    pub fn new(user: Option<UserIdentity>) -> Self {
        Self { user }
    }

    pub fn logged_in(id: impl Into<String>) -> Self {
        Self::new(Some(UserIdentity::new(id)))
    }

    pub fn logged_out() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_user(&self) -> Result<Option<UserIdentity>, DomainError> {
        Ok(self.user.clone())
    }
}
