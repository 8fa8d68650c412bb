//! Delivery module.
//!
//! Orchestrates service resolution, connection setup, and message exchange.

mod messenger;

pub use messenger::MessagingClient;
