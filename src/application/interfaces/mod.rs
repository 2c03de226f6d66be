mod chatbot_transport;
mod identity_provider;

pub use chatbot_transport::*;
pub use identity_provider::*;
