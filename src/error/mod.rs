//! Error types for the messaging client.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
