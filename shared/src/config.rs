use std::time::Duration;

use crate::{connection::framed_connection::DEFAULT_MAX_PAYLOAD_LEN, types::NodeRole};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 3490;
pub const DEFAULT_CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Startup settings for one node of the cluster
#[derive(Clone, Debug)]
pub struct NodeConfig {
    /// Which part this process plays
    pub role: NodeRole,
    /// Address clients connect to. Servers bind on all interfaces.
    pub server_address: String,
    pub server_port: u16,
    /// Number of clients a server waits for before the first frame
    pub expected_clients: usize,
    /// Pause between failed connection attempts made by a client
    pub connect_retry_delay: Duration,
    /// Largest INPUT_EVENTS payload accepted from a peer
    pub max_payload_len: u32,
    /// `(alias, raw event name)` pairs
    pub aliases: Vec<(String, String)>,
    /// Log every dispatched event
    pub debug_log_events: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            role: NodeRole::Standalone,
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            expected_clients: 1,
            connect_retry_delay: DEFAULT_CONNECT_RETRY_DELAY,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            aliases: Vec::new(),
            debug_log_events: false,
        }
    }
}
