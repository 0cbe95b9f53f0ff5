mod client_connection;
mod reader;

pub(crate) use client_connection::ClientConnection;
pub(crate) use reader::{read_messages, Inbound, InboundMessage};

/// Position of a client in accept order, starting at 0
pub type ClientIndex = usize;
