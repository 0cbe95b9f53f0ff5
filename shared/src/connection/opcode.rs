// The one-byte message headers of the cluster protocol

use std::fmt;

#[derive(Copy, Debug, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // A length-prefixed, encoded event list follows
    InputEvents = 1,
    // A node has finished rendering and asks to swap
    SwapRequest = 2,
    // The server releases every node to swap
    SwapNow = 3,
}

impl Opcode {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Opcode::InputEvents),
            2 => Some(Opcode::SwapRequest),
            3 => Some(Opcode::SwapNow),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::InputEvents => "INPUT_EVENTS",
            Opcode::SwapRequest => "SWAP_BUFFERS_REQUEST",
            Opcode::SwapNow => "SWAP_BUFFERS_NOW",
        };
        write!(f, "{}({})", name, self.to_byte())
    }
}
