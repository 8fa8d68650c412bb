//! Configuration module for the messaging client.
//!
//! Exposes the section-oriented view of a configuration file that registry
//! initialization consumes, plus a TOML-backed implementation.

mod source;

pub use source::*;
