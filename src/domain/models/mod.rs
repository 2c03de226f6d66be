mod assist_request;
mod assist_result;
mod chat_message;
mod control_instructions;
mod intent;
mod user;

pub use assist_request::*;
pub use assist_result::*;
pub use chat_message::*;
pub use control_instructions::*;
pub use intent::*;
pub use user::*;
