use std::collections::BTreeMap;

use framesync_serde::{de_length, ser_length, ByteReader, ByteWrite, Serde, SerdeErr, LENGTH_PREFIX_BYTES};

use super::{
    error::EventError,
    field::{EventFields, FieldKind, FieldType, FieldValue},
};

/// One discrete input occurrence: a name plus eight typed field buckets.
///
/// Records are built once by their producer, then treated as plain data:
/// they are copied into the frame list, encoded for the network and dropped
/// once the frame has been dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    name: String,
    fields: EventFields,
}

impl EventRecord {
    /// Create an event with no fields
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            fields: EventFields::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of this event under a different name, used when
    /// dispatching to aliases
    pub fn renamed<S: Into<String>>(&self, name: S) -> Self {
        Self {
            name: name.into(),
            fields: self.fields.clone(),
        }
    }

    // Typed access

    /// Adds a field to the bucket that matches `T`
    pub fn add_field<T: FieldType, S: Into<String>>(
        &mut self,
        name: S,
        value: T,
    ) -> Result<(), EventError> {
        let name = name.into();
        let bucket = T::bucket_mut(&mut self.fields);
        if bucket.contains_key(&name) {
            return Err(EventError::DuplicateField {
                event: self.name.clone(),
                kind: T::KIND,
                name,
            });
        }
        bucket.insert(name, value);
        Ok(())
    }

    /// Builder form of `add_field`
    pub fn with_field<T: FieldType, S: Into<String>>(
        mut self,
        name: S,
        value: T,
    ) -> Result<Self, EventError> {
        self.add_field(name, value)?;
        Ok(self)
    }

    pub fn get_field<T: FieldType>(&self, name: &str) -> Result<&T, EventError> {
        T::bucket(&self.fields)
            .get(name)
            .ok_or_else(|| EventError::FieldNotFound {
                event: self.name.clone(),
                kind: T::KIND,
                name: name.to_string(),
            })
    }

    pub fn has_field<T: FieldType>(&self, name: &str) -> bool {
        T::bucket(&self.fields).contains_key(name)
    }

    /// Every field of one bucket, sorted by name
    pub fn fields<'a, T: FieldType + 'a>(&'a self) -> impl Iterator<Item = (&'a str, &'a T)> {
        T::bucket(&self.fields)
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    // Producers build fresh records, so they insert without a collision check
    pub(super) fn put_field<T: FieldType>(&mut self, name: &str, value: T) {
        T::bucket_mut(&mut self.fields).insert(name.to_string(), value);
    }

    // Dynamic access

    /// Adds a field to the bucket named by the value's own kind
    pub fn add_value<S: Into<String>>(&mut self, name: S, value: FieldValue) -> Result<(), EventError> {
        match value {
            FieldValue::Byte(v) => self.add_field(name, v),
            FieldValue::ByteArray(v) => self.add_field(name, v),
            FieldValue::Int(v) => self.add_field(name, v),
            FieldValue::IntArray(v) => self.add_field(name, v),
            FieldValue::Float(v) => self.add_field(name, v),
            FieldValue::FloatArray(v) => self.add_field(name, v),
            FieldValue::String(v) => self.add_field(name, v),
            FieldValue::StringArray(v) => self.add_field(name, v),
        }
    }

    pub fn get_value(&self, kind: FieldKind, name: &str) -> Result<FieldValue, EventError> {
        match kind {
            FieldKind::Byte => self.get_field::<u8>(name).map(|v| FieldValue::Byte(*v)),
            FieldKind::ByteArray => self
                .get_field::<Vec<u8>>(name)
                .map(|v| FieldValue::ByteArray(v.clone())),
            FieldKind::Int => self.get_field::<i32>(name).map(|v| FieldValue::Int(*v)),
            FieldKind::IntArray => self
                .get_field::<Vec<i32>>(name)
                .map(|v| FieldValue::IntArray(v.clone())),
            FieldKind::Float => self.get_field::<f32>(name).map(|v| FieldValue::Float(*v)),
            FieldKind::FloatArray => self
                .get_field::<Vec<f32>>(name)
                .map(|v| FieldValue::FloatArray(v.clone())),
            FieldKind::String => self
                .get_field::<String>(name)
                .map(|v| FieldValue::String(v.clone())),
            FieldKind::StringArray => self
                .get_field::<Vec<String>>(name)
                .map(|v| FieldValue::StringArray(v.clone())),
        }
    }

    /// Number of fields across all buckets
    pub fn field_count(&self) -> usize {
        let f = &self.fields;
        f.bytes.len()
            + f.byte_arrays.len()
            + f.ints.len()
            + f.int_arrays.len()
            + f.floats.len()
            + f.float_arrays.len()
            + f.strings.len()
            + f.string_arrays.len()
    }

    // Binary form

    /// Writes the name, then each bucket in wire order as a count followed by
    /// `(name, value)` entries
    pub fn encode_binary(&self, writer: &mut dyn ByteWrite) {
        self.name.ser(writer);
        ser_bucket::<u8>(&self.fields, writer);
        ser_bucket::<Vec<u8>>(&self.fields, writer);
        ser_bucket::<i32>(&self.fields, writer);
        ser_bucket::<Vec<i32>>(&self.fields, writer);
        ser_bucket::<f32>(&self.fields, writer);
        ser_bucket::<Vec<f32>>(&self.fields, writer);
        ser_bucket::<String>(&self.fields, writer);
        ser_bucket::<Vec<String>>(&self.fields, writer);
    }

    pub fn decode_binary(reader: &mut ByteReader) -> Result<Self, EventError> {
        let name = String::de(reader)?;
        let mut record = EventRecord::new(name);
        de_bucket::<u8>(&mut record, reader)?;
        de_bucket::<Vec<u8>>(&mut record, reader)?;
        de_bucket::<i32>(&mut record, reader)?;
        de_bucket::<Vec<i32>>(&mut record, reader)?;
        de_bucket::<f32>(&mut record, reader)?;
        de_bucket::<Vec<f32>>(&mut record, reader)?;
        de_bucket::<String>(&mut record, reader)?;
        de_bucket::<Vec<String>>(&mut record, reader)?;
        Ok(record)
    }

    pub fn byte_length(&self) -> u32 {
        self.name.byte_length()
            + bucket_byte_length::<u8>(&self.fields)
            + bucket_byte_length::<Vec<u8>>(&self.fields)
            + bucket_byte_length::<i32>(&self.fields)
            + bucket_byte_length::<Vec<i32>>(&self.fields)
            + bucket_byte_length::<f32>(&self.fields)
            + bucket_byte_length::<Vec<f32>>(&self.fields)
            + bucket_byte_length::<String>(&self.fields)
            + bucket_byte_length::<Vec<String>>(&self.fields)
    }

    pub(crate) fn raw_fields(&self) -> &EventFields {
        &self.fields
    }
}

fn ser_bucket<T: FieldType>(fields: &EventFields, writer: &mut dyn ByteWrite) {
    let bucket: &BTreeMap<String, T> = T::bucket(fields);
    ser_length(bucket.len(), writer);
    for (name, value) in bucket {
        name.ser(writer);
        value.ser(writer);
    }
}

fn de_bucket<T: FieldType>(record: &mut EventRecord, reader: &mut ByteReader) -> Result<(), EventError> {
    let count = de_length(reader)?;
    // each entry carries at least a 4-byte name prefix
    let remaining = reader.remaining();
    if count.saturating_mul(LENGTH_PREFIX_BYTES as usize) > remaining {
        return Err(SerdeErr::UnexpectedEnd {
            needed: count.saturating_mul(LENGTH_PREFIX_BYTES as usize),
            remaining,
        }
        .into());
    }
    for _ in 0..count {
        let name = String::de(reader)?;
        let value = T::de(reader)?;
        record.add_field(name, value)?;
    }
    Ok(())
}

fn bucket_byte_length<T: FieldType>(fields: &EventFields) -> u32 {
    let mut output = LENGTH_PREFIX_BYTES;
    for (name, value) in T::bucket(fields) {
        output += name.byte_length() + value.byte_length();
    }
    output
}
