pub mod error;
pub mod framed_connection;
pub mod opcode;
