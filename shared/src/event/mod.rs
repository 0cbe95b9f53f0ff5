mod category;
mod error;
mod event_record;
mod field;
mod list;
mod text;

pub use category::{
    EventCategory, ANALOG_VALUE_FIELD, EVENT_TYPE_FIELD, NORMALIZED_POSITION_FIELD, POSITION_FIELD,
    TRANSFORM_FIELD,
};
pub use error::EventError;
pub use event_record::EventRecord;
pub use field::{EventFields, FieldKind, FieldType, FieldValue};
pub use list::{decode_list, encode_list, EventList};
