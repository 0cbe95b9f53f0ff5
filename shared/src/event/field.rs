use std::{collections::BTreeMap, fmt};

use framesync_serde::Serde;

/// The typed buckets of an EventRecord, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    Byte,
    ByteArray,
    Int,
    IntArray,
    Float,
    FloatArray,
    String,
    StringArray,
}

impl FieldKind {
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Byte => "byte",
            FieldKind::ByteArray => "byte[]",
            FieldKind::Int => "int",
            FieldKind::IntArray => "int[]",
            FieldKind::Float => "float",
            FieldKind::FloatArray => "float[]",
            FieldKind::String => "string",
            FieldKind::StringArray => "string[]",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single field value, tagged with the bucket it belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Byte(u8),
    ByteArray(Vec<u8>),
    Int(i32),
    IntArray(Vec<i32>),
    Float(f32),
    FloatArray(Vec<f32>),
    String(String),
    StringArray(Vec<String>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Byte(_) => FieldKind::Byte,
            FieldValue::ByteArray(_) => FieldKind::ByteArray,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::IntArray(_) => FieldKind::IntArray,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::FloatArray(_) => FieldKind::FloatArray,
            FieldValue::String(_) => FieldKind::String,
            FieldValue::StringArray(_) => FieldKind::StringArray,
        }
    }
}

/// Eight independent name -> value maps. A name may appear in several
/// buckets at once; lookups always name the bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFields {
    pub(crate) bytes: BTreeMap<String, u8>,
    pub(crate) byte_arrays: BTreeMap<String, Vec<u8>>,
    pub(crate) ints: BTreeMap<String, i32>,
    pub(crate) int_arrays: BTreeMap<String, Vec<i32>>,
    pub(crate) floats: BTreeMap<String, f32>,
    pub(crate) float_arrays: BTreeMap<String, Vec<f32>>,
    pub(crate) strings: BTreeMap<String, String>,
    pub(crate) string_arrays: BTreeMap<String, Vec<String>>,
}

/// Rust types that map onto exactly one bucket
pub trait FieldType: Serde + fmt::Debug + Sized {
    const KIND: FieldKind;

    fn bucket(fields: &EventFields) -> &BTreeMap<String, Self>;

    fn bucket_mut(fields: &mut EventFields) -> &mut BTreeMap<String, Self>;
}

macro_rules! impl_field_type {
    ($type:ty, $kind:ident, $bucket:ident) => {
        impl FieldType for $type {
            const KIND: FieldKind = FieldKind::$kind;

            fn bucket(fields: &EventFields) -> &BTreeMap<String, Self> {
                &fields.$bucket
            }

            fn bucket_mut(fields: &mut EventFields) -> &mut BTreeMap<String, Self> {
                &mut fields.$bucket
            }
        }
    };
}

impl_field_type!(u8, Byte, bytes);
impl_field_type!(Vec<u8>, ByteArray, byte_arrays);
impl_field_type!(i32, Int, ints);
impl_field_type!(Vec<i32>, IntArray, int_arrays);
impl_field_type!(f32, Float, floats);
impl_field_type!(Vec<f32>, FloatArray, float_arrays);
impl_field_type!(String, String, strings);
impl_field_type!(Vec<String>, StringArray, string_arrays);
