use std::fmt;

use super::{event_record::EventRecord, field::FieldKind};

// Human-readable form for logs: Name{kind:field=value, ...}. Not parsed back.

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.raw_fields();
        write!(f, "{}{{", self.name())?;

        let mut first = true;

        for (name, value) in &fields.bytes {
            write_entry(f, &mut first, FieldKind::Byte, name, value)?;
        }
        for (name, value) in &fields.byte_arrays {
            write_entry(f, &mut first, FieldKind::ByteArray, name, value)?;
        }
        for (name, value) in &fields.ints {
            write_entry(f, &mut first, FieldKind::Int, name, value)?;
        }
        for (name, value) in &fields.int_arrays {
            write_entry(f, &mut first, FieldKind::IntArray, name, value)?;
        }
        for (name, value) in &fields.floats {
            write_entry(f, &mut first, FieldKind::Float, name, value)?;
        }
        for (name, value) in &fields.float_arrays {
            write_entry(f, &mut first, FieldKind::FloatArray, name, value)?;
        }
        for (name, value) in &fields.strings {
            write_entry(f, &mut first, FieldKind::String, name, value)?;
        }
        for (name, value) in &fields.string_arrays {
            write_entry(f, &mut first, FieldKind::StringArray, name, value)?;
        }

        f.write_str("}")
    }
}

fn write_entry(
    f: &mut fmt::Formatter<'_>,
    first: &mut bool,
    kind: FieldKind,
    name: &str,
    value: &dyn fmt::Debug,
) -> fmt::Result {
    if !*first {
        f.write_str(", ")?;
    }
    *first = false;
    write!(f, "{}:{}={:?}", kind, name, value)
}
