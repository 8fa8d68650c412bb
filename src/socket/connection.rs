//! Blocking TCP connection to a remote service.

use std::io::{Read, Write};
use std::net::TcpStream;

use tracing::{debug, error};

use crate::error::{MessagingError, MessagingResult};

/// A single-use connection to a remote peer.
///
/// Every delivery opens a fresh connection; there is no keep-alive and no
/// timeout imposed at this layer. Blocking behavior follows the underlying
/// stream.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    open: bool,
}

impl Connection {
    /// Open a connection to the given host and port.
    pub fn connect(host: &str, port: u16) -> MessagingResult<Self> {
        match TcpStream::connect((host, port)) {
            Ok(stream) => {
                debug!(host, port, "Connected");
                Ok(Self { stream, open: true })
            }
            Err(e) => {
                error!(host, port, error = %e, "Unable to connect");
                Err(MessagingError::Connection {
                    message: format!("connect to {}:{} failed: {}", host, port, e),
                })
            }
        }
    }

    /// Write the full buffer to the peer.
    pub fn write_all(&mut self, bytes: &[u8]) -> MessagingResult<()> {
        let result = self.stream.write_all(bytes).and_then(|()| self.stream.flush());
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                self.open = false;
                error!(error = %e, "Unable to write to socket");
                Err(MessagingError::Connection {
                    message: format!("socket write failed: {}", e),
                })
            }
        }
    }

    /// Whether the connection is still usable.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.stream.read(buf)
    }
}
