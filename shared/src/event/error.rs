use thiserror::Error;

use framesync_serde::SerdeErr;

use super::field::FieldKind;

/// Errors raised while building, querying or decoding an EventRecord
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A field with this name already exists in the bucket
    #[error("Duplicate {kind} field '{name}' on event '{event}'")]
    DuplicateField {
        event: String,
        kind: FieldKind,
        name: String,
    },

    /// No field with this name exists in the bucket
    #[error("No {kind} field '{name}' on event '{event}'")]
    FieldNotFound {
        event: String,
        kind: FieldKind,
        name: String,
    },

    /// The bytes did not describe a valid event or event list
    #[error("{0}")]
    MalformedPayload(#[from] SerdeErr),

    /// An event list payload carried bytes past its last event
    #[error("Malformed payload: {count} trailing byte(s) after the last event")]
    TrailingBytes { count: usize },
}
