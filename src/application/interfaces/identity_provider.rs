use async_trait::async_trait;

use crate::domain::{DomainError, UserIdentity};

/// Source of the currently signed-in user.
///
/// Implementations talk to whatever session store the application uses.
/// `Ok(None)` means nobody is logged in; `Err` means the lookup itself failed.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Result<Option<UserIdentity>, DomainError>;
}
