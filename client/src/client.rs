use std::{
    net::{SocketAddr, TcpStream, ToSocketAddrs},
    thread,
};

use log::{debug, info, warn};

use framesync_shared::{
    ConnectionError, EventList, FramedConnection, NetworkSynchronizer, NodeRole,
};

use crate::{ClientConfig, FramesyncClientError};

/// One client node, connected to the server over a single TCP stream
pub struct Client {
    connection: FramedConnection<TcpStream>,
    server_address: SocketAddr,
    frame: u64,
}

impl Client {
    /// Connects to the server, retrying at a fixed interval until it accepts.
    /// Blocks for as long as the server is absent unless
    /// `max_connect_attempts` is set.
    pub fn connect(config: ClientConfig) -> Result<Self, FramesyncClientError> {
        let address = format!("{}:{}", config.server_address, config.server_port);
        let candidates: Vec<SocketAddr> = address
            .to_socket_addrs()
            .map_err(|error| FramesyncClientError::InvalidAddress {
                address: address.clone(),
                message: error.to_string(),
            })?
            .collect();
        if candidates.is_empty() {
            return Err(FramesyncClientError::InvalidAddress {
                address,
                message: "no addresses found".to_string(),
            });
        }

        let mut attempts: u32 = 0;
        let stream = loop {
            attempts += 1;
            match TcpStream::connect(&candidates[..]) {
                Ok(stream) => break stream,
                Err(error) => {
                    if config
                        .max_connect_attempts
                        .is_some_and(|max| attempts >= max)
                    {
                        return Err(FramesyncClientError::ConnectFailed {
                            address,
                            attempts,
                            message: error.to_string(),
                        });
                    }
                    if attempts == 1 {
                        info!("Waiting for server at {}", address);
                    }
                    warn!(
                        "Connection attempt {} to {} failed: {}, retrying in {:?}",
                        attempts, address, error, config.connect_retry_delay
                    );
                    thread::sleep(config.connect_retry_delay);
                }
            }
        };

        if config.no_delay {
            if let Err(error) = stream.set_nodelay(true) {
                warn!("Could not disable Nagle's algorithm: {}", error);
            }
        }

        let server_address = stream.peer_addr().unwrap_or(candidates[0]);
        info!(
            "Connected to server at {} after {} attempt(s)",
            server_address, attempts
        );

        let connection = FramedConnection::new(stream, format!("server ({})", server_address))
            .with_max_payload_len(config.max_payload_len);

        Ok(Self {
            connection,
            server_address,
            frame: 0,
        })
    }

    pub fn server_address(&self) -> SocketAddr {
        self.server_address
    }

    /// Frames completed through the event barrier
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl NetworkSynchronizer for Client {
    fn role(&self) -> NodeRole {
        NodeRole::NetClient
    }

    fn sync_events(&mut self, local: EventList) -> Result<EventList, ConnectionError> {
        self.connection.send_event_list(&local)?;
        let merged = self.connection.receive_event_list()?;
        self.frame += 1;
        debug!(
            "Frame {}: sent {} event(s), received {} merged",
            self.frame,
            local.len(),
            merged.len()
        );
        Ok(merged)
    }

    fn sync_swap(&mut self) -> Result<(), ConnectionError> {
        self.connection.send_swap_request()?;
        self.connection.receive_swap_now()
    }
}
