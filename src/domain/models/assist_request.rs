use serde::Serialize;
use serde_json::Value;

use super::{ControlInstructions, MessageIntent, UserIdentity};
use crate::domain::DomainError;

/// Body of `POST /chatbot`.
///
/// Only built from a resolved [`UserIdentity`], so an unauthenticated request
/// cannot be constructed. `grounding` is omitted from the JSON when absent.
#[derive(Debug, Clone, Serialize)]
pub struct AssistRequest {
    user_id: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    grounding: Option<Value>,
    #[serde(rename = "targetLang")]
    target_lang: String,
    control_instructions: String,
    #[serde(skip)]
    intent: MessageIntent,
}

impl AssistRequest {
    pub fn new(
        user: &UserIdentity,
        message: impl Into<String>,
        target_lang: impl Into<String>,
        grounding: Option<Value>,
    ) -> Self {
        let message = message.into();
        let intent = MessageIntent::classify(&message);
        Self {
            user_id: user.id().to_string(),
            message,
            grounding,
            target_lang: target_lang.into(),
            control_instructions: ControlInstructions::for_intent(intent).render(),
            intent,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn grounding(&self) -> Option<&Value> {
        self.grounding.as_ref()
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn control_instructions(&self) -> &str {
        &self.control_instructions
    }

    pub fn intent(&self) -> MessageIntent {
        self.intent
    }

    pub fn to_json(&self) -> Result<Value, DomainError> {
        Ok(serde_json::to_value(self)?)
    }
}
