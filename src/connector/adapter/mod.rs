mod http_chatbot_transport;
mod static_identity_provider;
mod supabase_identity_provider;

pub use http_chatbot_transport::*;
pub use static_identity_provider::*;
pub use supabase_identity_provider::*;
