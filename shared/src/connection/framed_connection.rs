use std::io::{Read, Write};

use log::trace;

use framesync_serde::SerdeErr;

use crate::event::{decode_list, encode_list, EventError, EventList, EventRecord};

use super::{error::ConnectionError, opcode::Opcode};

/// Upper bound on a single payload unless configured otherwise
pub const DEFAULT_MAX_PAYLOAD_LEN: u32 = 64 * 1024 * 1024;

/// The largest length a signed 32-bit prefix can carry
pub const MAX_WIRE_PAYLOAD_LEN: u32 = i32::MAX as u32;

/// A byte stream to exactly one peer, speaking the framed message protocol:
/// a one-byte opcode, optionally followed by a 4-byte little-endian length
/// and that many payload bytes.
pub struct FramedConnection<S> {
    stream: S,
    peer: String,
    max_payload_len: u32,
}

impl<S> FramedConnection<S> {
    pub fn new<P: Into<String>>(stream: S, peer: P) -> Self {
        Self {
            stream,
            peer: peer.into(),
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }

    pub fn with_max_payload_len(mut self, max_payload_len: u32) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    /// Describes the remote end in error messages and logs
    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

// Outgoing

impl<S: Write> FramedConnection<S> {
    pub fn send_opcode(&mut self, opcode: Opcode) -> Result<(), ConnectionError> {
        trace!("send {} -> {}", opcode, self.peer);
        self.write_all(&[opcode.to_byte()], "send opcode")
    }

    pub fn send_payload(&mut self, bytes: &[u8]) -> Result<(), ConnectionError> {
        let length = self.outgoing_length(bytes.len())?;
        let mut frame = Vec::with_capacity(bytes.len() + 4);
        frame.extend_from_slice(&length.to_le_bytes());
        frame.extend_from_slice(bytes);
        self.write_all(&frame, "send payload")
    }

    /// Sends INPUT_EVENTS followed by the encoded list as its payload
    pub fn send_event_list(&mut self, list: &[EventRecord]) -> Result<(), ConnectionError> {
        let payload = encode_list(list);
        trace!(
            "send {} with {} event(s), {} byte(s) -> {}",
            Opcode::InputEvents,
            list.len(),
            payload.len(),
            self.peer
        );
        let length = self.outgoing_length(payload.len())?;
        // one write so the opcode and payload leave in the same segment
        let mut frame = Vec::with_capacity(payload.len() + 5);
        frame.push(Opcode::InputEvents.to_byte());
        frame.extend_from_slice(&length.to_le_bytes());
        frame.extend_from_slice(&payload);
        self.write_all(&frame, "send event list")
    }

    pub fn send_swap_request(&mut self) -> Result<(), ConnectionError> {
        self.send_opcode(Opcode::SwapRequest)
    }

    pub fn send_swap_now(&mut self) -> Result<(), ConnectionError> {
        self.send_opcode(Opcode::SwapNow)
    }

    /// The length prefix for a payload, or an error if the peer would refuse it
    fn outgoing_length(&self, length: usize) -> Result<i32, ConnectionError> {
        checked_length(length, self.max_payload_len).ok_or_else(|| {
            ConnectionError::OversizedPayload {
                peer: self.peer.clone(),
                length,
                limit: self.max_payload_len.min(MAX_WIRE_PAYLOAD_LEN),
            }
        })
    }

    fn write_all(&mut self, bytes: &[u8], operation: &'static str) -> Result<(), ConnectionError> {
        self.stream
            .write_all(bytes)
            .and_then(|_| self.stream.flush())
            .map_err(|error| ConnectionError::broken(&self.peer, operation, &error))
    }
}

// Incoming

impl<S: Read> FramedConnection<S> {
    /// Blocks until one opcode byte arrives
    pub fn read_opcode(&mut self) -> Result<Opcode, ConnectionError> {
        let [byte] = self.read_array::<1>("receive opcode")?;
        let opcode = Opcode::from_byte(byte).ok_or_else(|| ConnectionError::UnknownOpcode {
            peer: self.peer.clone(),
            value: byte,
        })?;
        trace!("recv {} <- {}", opcode, self.peer);
        Ok(opcode)
    }

    /// Blocks until an opcode arrives, failing if it is not `expected`
    pub fn receive_opcode(&mut self, expected: Opcode) -> Result<(), ConnectionError> {
        let [byte] = self.read_array::<1>("receive opcode")?;
        if byte != expected.to_byte() {
            return Err(ConnectionError::ProtocolDesync {
                peer: self.peer.clone(),
                expected,
                received: byte,
            });
        }
        trace!("recv {} <- {}", expected, self.peer);
        Ok(())
    }

    /// Reads a 4-byte length, then exactly that many bytes
    pub fn receive_payload(&mut self) -> Result<Vec<u8>, ConnectionError> {
        let length = i32::from_le_bytes(self.read_array::<4>("receive payload length")?);
        if length < 0 {
            return Err(ConnectionError::MalformedPayload {
                peer: self.peer.clone(),
                source: EventError::MalformedPayload(SerdeErr::NegativeLength { length }),
            });
        }
        let length = length as u32;
        if length > self.max_payload_len {
            return Err(ConnectionError::PayloadTooLarge {
                peer: self.peer.clone(),
                length,
                limit: self.max_payload_len,
            });
        }

        let mut payload = vec![0u8; length as usize];
        self.stream
            .read_exact(&mut payload)
            .map_err(|error| ConnectionError::broken(&self.peer, "receive payload", &error))?;
        Ok(payload)
    }

    /// Reads the payload that follows an already-consumed INPUT_EVENTS opcode
    pub fn receive_event_list_body(&mut self) -> Result<EventList, ConnectionError> {
        let payload = self.receive_payload()?;
        let list = decode_list(&payload).map_err(|source| ConnectionError::MalformedPayload {
            peer: self.peer.clone(),
            source,
        })?;
        trace!("recv {} event(s) <- {}", list.len(), self.peer);
        Ok(list)
    }

    pub fn receive_event_list(&mut self) -> Result<EventList, ConnectionError> {
        self.receive_opcode(Opcode::InputEvents)?;
        self.receive_event_list_body()
    }

    pub fn receive_swap_request(&mut self) -> Result<(), ConnectionError> {
        self.receive_opcode(Opcode::SwapRequest)
    }

    pub fn receive_swap_now(&mut self) -> Result<(), ConnectionError> {
        self.receive_opcode(Opcode::SwapNow)
    }

    fn read_array<const N: usize>(&mut self, operation: &'static str) -> Result<[u8; N], ConnectionError> {
        let mut buffer = [0u8; N];
        self.stream
            .read_exact(&mut buffer)
            .map_err(|error| ConnectionError::broken(&self.peer, operation, &error))?;
        Ok(buffer)
    }
}

fn checked_length(length: usize, max_payload_len: u32) -> Option<i32> {
    let limit = max_payload_len.min(MAX_WIRE_PAYLOAD_LEN);
    u32::try_from(length)
        .ok()
        .filter(|length| *length <= limit)
        .and_then(|length| i32::try_from(length).ok())
}
