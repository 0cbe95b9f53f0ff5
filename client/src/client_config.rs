use std::{default::Default, time::Duration};

use framesync_shared::{
    NodeConfig, DEFAULT_CONNECT_RETRY_DELAY, DEFAULT_MAX_PAYLOAD_LEN, DEFAULT_SERVER_ADDRESS,
    DEFAULT_SERVER_PORT,
};

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Host name or IP address of the server
    pub server_address: String,
    pub server_port: u16,
    /// How long to wait between failed connection attempts
    pub connect_retry_delay: Duration,
    /// Give up after this many attempts. `None` retries until the server
    /// appears.
    pub max_connect_attempts: Option<u32>,
    /// Disable Nagle's algorithm, so the one-byte swap messages are not held
    /// back by the kernel
    pub no_delay: bool,
    /// Largest merged event list accepted from the server
    pub max_payload_len: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            connect_retry_delay: DEFAULT_CONNECT_RETRY_DELAY,
            max_connect_attempts: None,
            no_delay: true,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }
}

impl From<&NodeConfig> for ClientConfig {
    fn from(config: &NodeConfig) -> Self {
        Self {
            server_address: config.server_address.clone(),
            server_port: config.server_port,
            connect_retry_delay: config.connect_retry_delay,
            max_payload_len: config.max_payload_len,
            ..Self::default()
        }
    }
}
