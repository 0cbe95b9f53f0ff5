use crate::{
    byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde,
    ConstByteLength,
};

/// Size of every count / length prefix on the wire
pub const LENGTH_PREFIX_BYTES: u32 = 4;

// Lengths travel as signed 32-bit integers

pub fn ser_length(length: usize, writer: &mut dyn ByteWrite) {
    // a field this long makes its payload exceed i32::MAX, which framing
    // refuses to send, so the saturated prefix never reaches a peer
    let length = i32::try_from(length).unwrap_or(i32::MAX);
    length.ser(writer);
}

pub fn de_length(reader: &mut ByteReader) -> Result<usize, SerdeErr> {
    let length = i32::de(reader)?;
    if length < 0 {
        return Err(SerdeErr::NegativeLength { length });
    }
    Ok(length as usize)
}

// u8

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }

    fn byte_length(&self) -> u32 {
        <Self as ConstByteLength>::const_byte_length()
    }
}

impl ConstByteLength for u8 {
    fn const_byte_length() -> u32 {
        1
    }
}

// i32

impl Serde for i32 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_le_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(i32::from_le_bytes(reader.read_array::<4>()?))
    }

    fn byte_length(&self) -> u32 {
        <Self as ConstByteLength>::const_byte_length()
    }
}

impl ConstByteLength for i32 {
    fn const_byte_length() -> u32 {
        4
    }
}

// f32, sent as its IEEE-754 bit pattern

impl Serde for f32 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_bits().to_le_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(f32::from_bits(u32::from_le_bytes(reader.read_array::<4>()?)))
    }

    fn byte_length(&self) -> u32 {
        <Self as ConstByteLength>::const_byte_length()
    }
}

impl ConstByteLength for f32 {
    fn const_byte_length() -> u32 {
        4
    }
}
