pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AskAssistantUseCase, ChatbotTransport, IdentityProvider, TransportError, TransportResponse,
};

pub use connector::{
    AssistantConfig, HttpChatbotTransport, StaticIdentityProvider, SupabaseConfig,
    SupabaseIdentityProvider,
};

pub use domain::{
    AssistError, AssistFailureKind, AssistRequest, AssistResult, ChatMessage, ControlInstructions,
    DomainError, MessageIntent, UserIdentity,
};
