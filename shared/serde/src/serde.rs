use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr};

/// A type that can be written to and read back from the wire
pub trait Serde: Sized + Clone + PartialEq {
    /// Writes the value into the given writer
    fn ser(&self, writer: &mut dyn ByteWrite);

    /// Reads a value out of the given reader
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;

    /// Returns the number of bytes `ser` will produce for this value
    fn byte_length(&self) -> u32;
}

/// Implemented by values whose encoded length never varies
pub trait ConstByteLength {
    fn const_byte_length() -> u32;
}
