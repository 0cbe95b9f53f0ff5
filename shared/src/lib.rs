//! # Framesync Shared
//! Event records, the wire protocol, and the frame dispatcher shared between
//! framesync-server & framesync-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(target_arch = "wasm32")]
    {
        compile_error!("framesync requires blocking TCP sockets, which the wasm32 target does not provide.");
    }
}

pub use framesync_serde::{
    ByteReader, ByteWrite, ByteWriter, ConstByteLength, Serde, SerdeErr,
};

mod config;
mod connection;
mod dispatch;
mod event;
mod math;
mod sync;
mod types;

pub use config::{
    NodeConfig, DEFAULT_CONNECT_RETRY_DELAY, DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_PORT,
};
pub use connection::{
    error::ConnectionError,
    framed_connection::{FramedConnection, DEFAULT_MAX_PAYLOAD_LEN, MAX_WIRE_PAYLOAD_LEN},
    opcode::Opcode,
};
pub use dispatch::{
    DispatchError, Dispatcher, EventAliases, EventGenerator, EventQueue, FrameState, ListenerId,
};
pub use event::{
    decode_list, encode_list, EventCategory, EventError, EventFields, EventList, EventRecord,
    FieldKind, FieldType, FieldValue, ANALOG_VALUE_FIELD, EVENT_TYPE_FIELD,
    NORMALIZED_POSITION_FIELD, POSITION_FIELD, TRANSFORM_FIELD,
};
pub use math::{Pose, Quat, Vec2, Vec3};
pub use sync::{NetworkSynchronizer, Standalone};
pub use types::{NodeRole, ParseNodeRoleError};
