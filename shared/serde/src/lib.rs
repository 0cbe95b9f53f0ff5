//! # Framesync Serde
//! Byte-level serialization primitives for the framesync wire protocol.
//!
//! Every multi-byte integer is written little-endian regardless of the
//! host's native byte order, so any two nodes of a cluster agree on the
//! encoding.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod array;
mod byte_reader;
mod byte_writer;
mod error;
mod number;
mod serde;
mod string;

pub use byte_reader::ByteReader;
pub use byte_writer::{ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use number::{de_length, ser_length, LENGTH_PREFIX_BYTES};
pub use serde::{ConstByteLength, Serde};
