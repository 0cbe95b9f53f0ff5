use std::default::Default;

use framesync_shared::{NodeConfig, DEFAULT_MAX_PAYLOAD_LEN, DEFAULT_SERVER_PORT};

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Interface to listen on
    pub bind_address: String,
    /// Port to listen on. `0` picks a free port, see `Server::local_addr`.
    pub port: u16,
    /// Number of clients that must connect before the first frame
    pub expected_clients: usize,
    /// Disable Nagle's algorithm on every client stream
    pub no_delay: bool,
    /// Largest event list accepted from a single client. The merged list is
    /// held to the same limit before it is broadcast, so it should match the
    /// clients' own `max_payload_len`.
    pub max_payload_len: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_SERVER_PORT,
            expected_clients: 1,
            no_delay: true,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }
}

impl From<&NodeConfig> for ServerConfig {
    fn from(config: &NodeConfig) -> Self {
        Self {
            port: config.server_port,
            expected_clients: config.expected_clients,
            max_payload_len: config.max_payload_len,
            ..Self::default()
        }
    }
}
