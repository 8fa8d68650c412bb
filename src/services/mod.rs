//! Service registry module.
//!
//! Maps logical service names to their network locations.

mod registry;

pub use registry::{ServiceInfo, ServiceRegistry};
