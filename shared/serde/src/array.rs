use crate::{
    byte_reader::ByteReader,
    byte_writer::ByteWrite,
    error::SerdeErr,
    number::{de_length, ser_length, LENGTH_PREFIX_BYTES},
    serde::Serde,
};

// Arrays are a 4-byte element count followed by each element

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        ser_length(self.len(), writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = de_length(reader)?;
        // every element occupies at least one byte, so a count larger than
        // what is left can only come from a corrupt prefix
        if length > reader.remaining() {
            return Err(SerdeErr::UnexpectedEnd {
                needed: length,
                remaining: reader.remaining(),
            });
        }
        let mut output = Vec::with_capacity(length);
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }

    fn byte_length(&self) -> u32 {
        let mut output = LENGTH_PREFIX_BYTES;
        for item in self {
            output += item.byte_length();
        }
        output
    }
}
