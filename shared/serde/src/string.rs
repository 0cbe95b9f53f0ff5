use crate::{
    byte_reader::ByteReader,
    byte_writer::ByteWrite,
    error::SerdeErr,
    number::{de_length, ser_length, LENGTH_PREFIX_BYTES},
    serde::Serde,
};

// Strings are a 4-byte byte count followed by UTF-8 bytes

impl Serde for String {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        ser_length(self.len(), writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = de_length(reader)?;
        let bytes = reader.read_bytes(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SerdeErr::InvalidUtf8 { length })
    }

    fn byte_length(&self) -> u32 {
        LENGTH_PREFIX_BYTES + self.len() as u32
    }
}
