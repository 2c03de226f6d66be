//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - HTTP transport to the assistant backend (reqwest)
//! - Identity providers (Supabase auth, static session)
//! - Configuration read from the environment

pub mod adapter;
mod config;

pub use adapter::*;
pub use config::*;
