//! # Application Layer
//!
//! Capability interfaces and the use case that asks the finance assistant.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
