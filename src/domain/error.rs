use thiserror::Error;

use super::AssistFailureKind;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

pub const NO_USER_MESSAGE: &str = "No logged in user. Please log in.";
pub const NETWORK_FAILED_MESSAGE: &str = "Network request failed. Is your backend running?";
pub const NO_STATUS_MESSAGE: &str = "Invalid response from backend (no status).";
pub const ZERO_STATUS_MESSAGE: &str =
    "Network error: Backend unreachable (status 0). Check apiUrl.";
pub const RATE_LIMIT_MESSAGE: &str = "⚠️ Sorry, the daily request limit has been reached for the Finance Assistant. \
Please try again tomorrow, and I’ll be ready to help you again with your financial planning.";
pub const TRY_AGAIN_SUFFIX: &str = "Please try again later.";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "⚠️ Sorry, something went wrong with the Finance Assistant. Please try again later.";

/// Everything that can go wrong while asking the assistant.
///
/// `Display` carries the internal detail and is meant for logs only. What the
/// end user sees comes from [`AssistError::user_message`].
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("no authenticated user: {0}")]
    Auth(String),

    #[error("request to backend failed: {0}")]
    Transport(String),

    #[error("backend response carried no status code")]
    MalformedResponse,

    #[error("backend responded with status 0")]
    ZeroStatus,

    #[error("backend rate limit reached (status 429): {body}")]
    RateLimited { body: String },

    #[error("backend returned status {status}: {body}")]
    Server { status: u16, body: String },

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl AssistError {
    pub fn kind(&self) -> AssistFailureKind {
        match self {
            Self::Auth(_) => AssistFailureKind::AuthFailure,
            Self::Transport(_) => AssistFailureKind::TransportFailure,
            Self::MalformedResponse => AssistFailureKind::MalformedResponseFailure,
            Self::ZeroStatus => AssistFailureKind::ZeroStatusFailure,
            Self::RateLimited { .. } => AssistFailureKind::RateLimitFailure,
            Self::Server { .. } => AssistFailureKind::ServerErrorFailure,
            Self::Unexpected(_) => AssistFailureKind::UnexpectedFailure,
        }
    }

    /// Text that is safe to render to an end user. Never includes raw bodies
    /// or transport detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(_) => NO_USER_MESSAGE.to_string(),
            Self::Transport(_) => NETWORK_FAILED_MESSAGE.to_string(),
            Self::MalformedResponse => NO_STATUS_MESSAGE.to_string(),
            Self::ZeroStatus => ZERO_STATUS_MESSAGE.to_string(),
            Self::RateLimited { .. } => RATE_LIMIT_MESSAGE.to_string(),
            Self::Server { status, body } => {
                let suffix = if body.is_empty() { "" } else { TRY_AGAIN_SUFFIX };
                format!(
                    "⚠️ The Finance Assistant service returned an error (status {status}). {suffix}"
                )
            }
            Self::Unexpected(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
