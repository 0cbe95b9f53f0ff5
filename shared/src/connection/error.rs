use std::io;

use thiserror::Error;

use crate::event::EventError;

use super::opcode::Opcode;

/// Errors raised by the framed message protocol. Every variant leaves the
/// connection unusable: a cluster with a silent or confused node cannot keep
/// its frames in lockstep.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The socket was closed, reset or could not be reached
    #[error("Connection to {peer} broken during {operation}: {message}")]
    ConnectionBroken {
        peer: String,
        operation: &'static str,
        kind: io::ErrorKind,
        message: String,
    },

    /// A valid opcode arrived while a different one was awaited
    #[error("Protocol desync with {peer}: expected {expected}, received opcode {received}")]
    ProtocolDesync {
        peer: String,
        expected: Opcode,
        received: u8,
    },

    /// A peer sent another message before the cluster finished the phase its
    /// previous message belonged to
    #[error("Protocol desync with {peer}: {received} arrived out of turn")]
    OutOfTurn { peer: String, received: Opcode },

    /// A byte arrived that is not an opcode at all
    #[error("Protocol desync with {peer}: received unknown opcode {value}")]
    UnknownOpcode { peer: String, value: u8 },

    /// A payload arrived intact but could not be decoded
    #[error("Malformed payload from {peer}: {source}")]
    MalformedPayload {
        peer: String,
        #[source]
        source: EventError,
    },

    /// A length prefix exceeded the configured ceiling
    #[error("Payload of {length} bytes from {peer} exceeds the {limit} byte limit")]
    PayloadTooLarge { peer: String, length: u32, limit: u32 },

    /// An outgoing payload was larger than the peer accepts; nothing was sent
    #[error("Refusing to send a {length} byte payload to {peer}: exceeds the {limit} byte limit")]
    OversizedPayload { peer: String, length: usize, limit: u32 },
}

impl ConnectionError {
    pub fn broken(peer: &str, operation: &'static str, error: &io::Error) -> Self {
        ConnectionError::ConnectionBroken {
            peer: peer.to_string(),
            operation,
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn peer(&self) -> &str {
        match self {
            ConnectionError::ConnectionBroken { peer, .. }
            | ConnectionError::ProtocolDesync { peer, .. }
            | ConnectionError::OutOfTurn { peer, .. }
            | ConnectionError::UnknownOpcode { peer, .. }
            | ConnectionError::MalformedPayload { peer, .. }
            | ConnectionError::PayloadTooLarge { peer, .. }
            | ConnectionError::OversizedPayload { peer, .. } => peer,
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(self, ConnectionError::ConnectionBroken { .. })
    }

    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            ConnectionError::ProtocolDesync { .. }
                | ConnectionError::OutOfTurn { .. }
                | ConnectionError::UnknownOpcode { .. }
        )
    }
}
