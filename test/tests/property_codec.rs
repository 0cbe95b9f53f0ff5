/// PROPERTY-BASED TESTS: Event codec invariants
///
/// Uses proptest to verify codec properties hold across random records.
///
/// Key invariants:
/// 1. Decoding an encoded list yields an equal list
/// 2. The reported byte length matches the encoded size
/// 3. No strict prefix of an encoded list decodes
/// 4. A duplicate insert never changes the stored value

use proptest::prelude::*;
use std::collections::BTreeMap;

use framesync_shared::{decode_list, encode_list, EventRecord, FieldKind, FieldValue};

fn field_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,11}"
}

// finite floats only, NaN never compares equal to itself
fn finite_f32() -> impl Strategy<Value = f32> {
    -1.0e9f32..1.0e9f32
}

fn bucket<T: std::fmt::Debug>(
    values: impl Strategy<Value = T>,
) -> impl Strategy<Value = BTreeMap<String, T>> {
    prop::collection::btree_map(field_name(), values, 0..4)
}

fn event_record() -> impl Strategy<Value = EventRecord> {
    (
        "[A-Za-z0-9_ ]{0,20}",
        bucket(any::<u8>()),
        bucket(prop::collection::vec(any::<u8>(), 0..8)),
        bucket(any::<i32>()),
        bucket(prop::collection::vec(any::<i32>(), 0..8)),
        bucket(finite_f32()),
        bucket(prop::collection::vec(finite_f32(), 0..16)),
        bucket(".{0,12}"),
        bucket(prop::collection::vec(".{0,6}", 0..4)),
    )
        .prop_map(
            |(name, bytes, byte_arrays, ints, int_arrays, floats, float_arrays, strings, string_arrays)| {
                let mut record = EventRecord::new(name);
                for (key, value) in bytes {
                    record.add_field(key, value).unwrap();
                }
                for (key, value) in byte_arrays {
                    record.add_field(key, value).unwrap();
                }
                for (key, value) in ints {
                    record.add_field(key, value).unwrap();
                }
                for (key, value) in int_arrays {
                    record.add_field(key, value).unwrap();
                }
                for (key, value) in floats {
                    record.add_field(key, value).unwrap();
                }
                for (key, value) in float_arrays {
                    record.add_field(key, value).unwrap();
                }
                for (key, value) in strings {
                    record.add_field(key, value).unwrap();
                }
                for (key, value) in string_arrays {
                    record.add_field(key, value).unwrap();
                }
                record
            },
        )
}

proptest! {
    /// Any list of records survives the wire unchanged
    #[test]
    fn prop_list_round_trips(list in prop::collection::vec(event_record(), 0..6)) {
        let bytes = encode_list(&list);
        let decoded = decode_list(&bytes);
        prop_assert!(decoded.is_ok(), "decode failed: {:?}", decoded);
        prop_assert_eq!(decoded.unwrap(), list);
    }

    /// byte_length agrees with the encoder
    #[test]
    fn prop_byte_length_matches_encoding(list in prop::collection::vec(event_record(), 0..6)) {
        let expected: usize = 4 + list.iter().map(|e| e.byte_length() as usize).sum::<usize>();
        prop_assert_eq!(encode_list(&list).len(), expected);
    }

    /// Truncated payloads are always rejected
    #[test]
    fn prop_truncation_is_rejected(
        list in prop::collection::vec(event_record(), 1..4),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = encode_list(&list);
        let cut = cut.index(bytes.len());
        prop_assert!(decode_list(&bytes[..cut]).is_err());
    }

    /// Adding a name twice to one bucket fails and keeps the first value
    #[test]
    fn prop_duplicate_insert_keeps_first(
        name in field_name(),
        first in any::<i32>(),
        second in any::<i32>(),
    ) {
        let mut record = EventRecord::new("Prop");
        record.add_field(name.clone(), first).unwrap();
        prop_assert!(record.add_field(name.clone(), second).is_err());
        prop_assert!(record.add_value(name.clone(), FieldValue::Int(second)).is_err());
        prop_assert_eq!(record.get_value(FieldKind::Int, &name).unwrap(), FieldValue::Int(first));
    }
}
