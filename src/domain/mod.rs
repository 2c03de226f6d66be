//! # Domain Layer
//!
//! Request and result models for the finance assistant, the intent heuristic,
//! the control-instruction policy, and the error taxonomy.
//! This layer is independent of transport and identity infrastructure.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
