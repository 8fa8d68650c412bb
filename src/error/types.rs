//! Error types for the messaging client.

use thiserror::Error;

/// Main error type for messaging operations.
#[derive(Error, Debug)]
pub enum MessagingError {
    /// Configuration-related errors (including "no services registered").
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The requested service is not present in the registry.
    #[error("Unknown service: {service}")]
    UnknownService { service: String },

    /// Transport connect/write failures.
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// Framing errors: short reads, malformed length prefixes, size limits.
    #[error("Framing error: {kind}")]
    Framing { kind: FramingErrorKind },

    /// Payload type missing or unrecognized.
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// Header block present but no key/value pair could be parsed.
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The message cannot be sent as constructed.
    #[error("Invalid message: {message}")]
    InvalidMessage { message: String },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Framing error kinds.
#[derive(Error, Debug)]
pub enum FramingErrorKind {
    #[error("Short read: wanted {wanted} bytes, got {got}")]
    ShortRead { wanted: usize, got: usize },

    #[error("Invalid header length prefix: '{text}'")]
    InvalidLengthPrefix { text: String },

    #[error("Header length is zero")]
    EmptyHeader,

    #[error("Invalid payload_length header: '{value}'")]
    InvalidPayloadLength { value: String },

    #[error("Payload too large: {size} bytes exceeds maximum of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Header block too large to frame: {size} bytes")]
    HeaderTooLarge { size: usize },
}

/// Result type alias for messaging operations.
pub type MessagingResult<T> = Result<T, MessagingError>;
