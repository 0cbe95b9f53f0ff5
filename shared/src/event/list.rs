use framesync_serde::{de_length, ser_length, ByteReader, ByteWriter, SerdeErr};

use super::{error::EventError, event_record::EventRecord};

/// The events of one frame, in submission order
pub type EventList = Vec<EventRecord>;

/// Encodes a list as a 4-byte count followed by each record
pub fn encode_list(list: &[EventRecord]) -> Vec<u8> {
    let capacity = 4 + list.iter().map(|e| e.byte_length() as usize).sum::<usize>();
    let mut writer = ByteWriter::with_capacity(capacity);
    ser_length(list.len(), &mut writer);
    for record in list {
        record.encode_binary(&mut writer);
    }
    writer.to_bytes()
}

/// Decodes a payload produced by `encode_list`. The payload must be
/// consumed exactly.
pub fn decode_list(bytes: &[u8]) -> Result<EventList, EventError> {
    let mut reader = ByteReader::new(bytes);
    let count = de_length(&mut reader)?;
    // the smallest record is a name prefix plus eight bucket counts
    const MIN_RECORD_BYTES: usize = 36;
    let remaining = reader.remaining();
    if count.saturating_mul(MIN_RECORD_BYTES) > remaining {
        return Err(SerdeErr::UnexpectedEnd {
            needed: count.saturating_mul(MIN_RECORD_BYTES),
            remaining,
        }
        .into());
    }

    let mut list = Vec::with_capacity(count);
    for _ in 0..count {
        list.push(EventRecord::decode_binary(&mut reader)?);
    }

    if !reader.is_empty() {
        return Err(EventError::TrailingBytes {
            count: reader.remaining(),
        });
    }
    Ok(list)
}
