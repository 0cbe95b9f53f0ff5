//! # Framesync Server
//! The server role of a framesync cluster: accepts a fixed number of
//! clients, merges every node's input events into one list per frame, and
//! releases the swap barrier once all nodes have rendered.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use framesync_shared::{
        ConnectionError, Dispatcher, EventList, EventRecord, NetworkSynchronizer, NodeConfig,
        NodeRole,
    };
}

mod connection;
mod error;
mod server;

pub use connection::ClientIndex;
pub use error::FramesyncServerError;
pub use server::{Server, ServerConfig};
