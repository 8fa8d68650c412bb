//! Transport module.
//!
//! Blocking TCP connections used for exactly one exchange each.

mod connection;

pub use connection::Connection;
