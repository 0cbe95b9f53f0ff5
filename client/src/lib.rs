//! # Framesync Client
//! The client role of a framesync cluster: connects to the server, submits
//! this node's input events each frame, installs the merged list, and waits
//! on the swap barrier.

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

mod client;
mod client_config;
mod error;

pub use client::Client;
pub use client_config::ClientConfig;
pub use error::FramesyncClientError;
