//! Tonnerre Messaging Library
//!
//! This crate provides a point-to-point messaging client: it registers named
//! remote services (host/port pairs) and exchanges framed, typed messages
//! with them over TCP, supporting both fire-and-forget and request/response
//! delivery.

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod services;
pub mod socket;
