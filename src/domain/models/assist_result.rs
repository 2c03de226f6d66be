use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Structured tag for why a call failed. Callers only ever see the message
/// text; the tag is for branching in code and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistFailureKind {
    AuthFailure,
    TransportFailure,
    MalformedResponseFailure,
    ZeroStatusFailure,
    RateLimitFailure,
    ServerErrorFailure,
    UnexpectedFailure,
}

impl fmt::Display for AssistFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AuthFailure => "auth",
            Self::TransportFailure => "transport",
            Self::MalformedResponseFailure => "malformed_response",
            Self::ZeroStatusFailure => "zero_status",
            Self::RateLimitFailure => "rate_limit",
            Self::ServerErrorFailure => "server_error",
            Self::UnexpectedFailure => "unexpected",
        };
        write!(f, "{name}")
    }
}

/// Outcome of asking the assistant.
///
/// Serializes to the backend payload on success and to `{"message": "..."}` on
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssistResult {
    Success(Value),
    Failure {
        message: String,
        #[serde(skip)]
        kind: AssistFailureKind,
    },
}

impl AssistResult {
    pub fn failure(kind: AssistFailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            kind,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// The failure message, if this is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { message, .. } => Some(message.as_str()),
        }
    }

    pub fn failure_kind(&self) -> Option<AssistFailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            Self::Success(payload) => payload,
            Self::Failure { message, .. } => serde_json::json!({ "message": message }),
        }
    }
}
