//! Point-to-point delivery.

use tracing::{debug, error};

use crate::config::ConfigSource;
use crate::error::{MessagingError, MessagingResult};
use crate::protocol::{encode_message, read_message, Message, Payload};
use crate::services::ServiceRegistry;
use crate::socket::Connection;

/// Point-to-point messaging client.
///
/// Owns the service registry. Every delivery resolves the target service,
/// opens a fresh connection, and uses it for exactly one exchange; the
/// whole call blocks the calling thread from write through (for round
/// trips) the response read.
pub struct MessagingClient {
    registry: ServiceRegistry,
}

impl MessagingClient {
    /// Build a client from a configuration source.
    pub fn from_config(config: &impl ConfigSource) -> MessagingResult<Self> {
        Ok(Self {
            registry: ServiceRegistry::from_config(config)?,
        })
    }

    /// Build a client around an existing registry.
    pub fn new(registry: ServiceRegistry) -> Self {
        Self { registry }
    }

    /// The registry backing this client.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Send a fire-and-forget message.
    ///
    /// Marks the message one-way and never reads a response, even if the
    /// peer sends one.
    pub fn send(&self, service_name: &str, message: &mut Message) -> MessagingResult<()> {
        let mut connection = self.connect_for(service_name, message)?;

        message.set_one_way(true);
        let wire = encode_message(message)?;
        connection.write_all(&wire)?;

        debug!(
            service = service_name,
            request = message.request_name(),
            bytes = wire.len(),
            "One-way message delivered"
        );
        Ok(())
    }

    /// Send a message and synchronously read the peer's response.
    ///
    /// The connection carries exactly one request/response pair.
    pub fn send_and_receive(
        &self,
        service_name: &str,
        message: &Message,
    ) -> MessagingResult<Message> {
        let mut connection = self.connect_for(service_name, message)?;

        let wire = encode_message(message)?;
        connection.write_all(&wire)?;
        let response = read_message(&mut connection)?;

        debug!(
            service = service_name,
            request = message.request_name(),
            "Round trip complete"
        );
        Ok(response)
    }

    /// Validate the message, resolve the service, and open a connection.
    ///
    /// An unknown message type or an unregistered service fails before any
    /// socket is opened.
    fn connect_for(&self, service_name: &str, message: &Message) -> MessagingResult<Connection> {
        if matches!(message.payload(), Payload::Unknown) {
            error!(service = service_name, "Unable to send message, no message type set");
            return Err(MessagingError::InvalidMessage {
                message: "no message type set".to_string(),
            });
        }

        let info = self.registry.resolve(service_name)?;
        Connection::connect(info.host(), info.port())
    }
}
