use std::{net::SocketAddr, time::Duration};

use framesync_client::{Client, ClientConfig};
use framesync_server::{Server, ServerConfig};

/// A server and its clients, all on loopback, connected and ready for the
/// first frame. Each node must be driven from its own thread since every
/// barrier call blocks.
pub struct TestCluster {
    pub server: Server,
    pub clients: Vec<Client>,
}

impl TestCluster {
    /// Binds a server on an ephemeral port and connects `client_count`
    /// clients to it
    pub fn new(client_count: usize) -> Self {
        let mut server = Server::bind(loopback_server_config(client_count)).expect("bind server");
        let address = server.local_addr();

        // connects complete against the listen backlog before accept runs
        let clients = (0..client_count)
            .map(|_| Client::connect(client_config(address)).expect("connect client"))
            .collect();
        server.accept_clients().expect("accept clients");

        Self { server, clients }
    }
}

pub fn loopback_server_config(expected_clients: usize) -> ServerConfig {
    ServerConfig {
        bind_address: "127.0.0.1".to_string(),
        port: 0,
        expected_clients,
        ..ServerConfig::default()
    }
}

pub fn client_config(server: SocketAddr) -> ClientConfig {
    ClientConfig {
        server_address: server.ip().to_string(),
        server_port: server.port(),
        connect_retry_delay: Duration::from_millis(20),
        ..ClientConfig::default()
    }
}
