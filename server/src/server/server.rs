use std::{
    io,
    net::{SocketAddr, TcpListener},
    thread,
};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};

use framesync_shared::{
    ConnectionError, EventList, FramedConnection, NetworkSynchronizer, NodeRole, Opcode,
};

use crate::{
    connection::{read_messages, ClientConnection, ClientIndex, Inbound, InboundMessage},
    FramesyncServerError, ServerConfig,
};

/// The hub of a cluster. Every client holds one TCP stream to it; each
/// stream is drained by its own reader thread so that no client is ever
/// waited on out of turn.
pub struct Server {
    config: ServerConfig,
    listener: TcpListener,
    local_addr: SocketAddr,
    clients: Vec<ClientConnection>,
    inbound_sender: Sender<InboundMessage>,
    inbound: Receiver<InboundMessage>,
    frame: u64,
}

impl Server {
    /// Opens the listening socket without accepting anyone yet
    pub fn bind(config: ServerConfig) -> Result<Self, FramesyncServerError> {
        let address = format!("{}:{}", config.bind_address, config.port);
        let bind_error = |error: io::Error| FramesyncServerError::Bind {
            address: address.clone(),
            message: error.to_string(),
        };
        let listener = TcpListener::bind(address.as_str()).map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;
        info!("Listening on {}", local_addr);

        let (inbound_sender, inbound) = crossbeam_channel::unbounded();
        Ok(Self {
            config,
            listener,
            local_addr,
            clients: Vec::new(),
            inbound_sender,
            inbound,
            frame: 0,
        })
    }

    /// Binds and blocks until every expected client has connected
    pub fn listen(config: ServerConfig) -> Result<Self, FramesyncServerError> {
        let mut server = Self::bind(config)?;
        server.accept_clients()?;
        Ok(server)
    }

    /// The address actually bound, useful when the configured port was `0`
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn expected_clients(&self) -> usize {
        self.config.expected_clients
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn client_address(&self, index: ClientIndex) -> Option<SocketAddr> {
        self.clients.get(index).map(ClientConnection::address)
    }

    /// Frames completed through the event barrier
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Blocks until `expected_clients` clients are connected. Connections
    /// beyond that stay in the listen backlog and are never served.
    pub fn accept_clients(&mut self) -> Result<(), FramesyncServerError> {
        let expected = self.config.expected_clients;
        if self.clients.len() < expected {
            info!(
                "Waiting for {} client(s) on {}",
                expected - self.clients.len(),
                self.local_addr
            );
        }

        while self.clients.len() < expected {
            let index = self.clients.len();
            let accept_error = |error: io::Error| FramesyncServerError::Accept {
                index,
                message: error.to_string(),
            };

            let (stream, address) = self.listener.accept().map_err(accept_error)?;
            if self.config.no_delay {
                if let Err(error) = stream.set_nodelay(true) {
                    warn!("Could not disable Nagle's algorithm for {}: {}", address, error);
                }
            }
            let reader_stream = stream.try_clone().map_err(accept_error)?;

            let peer = format!("client {} ({})", index, address);
            let writer = FramedConnection::new(stream, peer.clone())
                .with_max_payload_len(self.config.max_payload_len);
            let reader_connection = FramedConnection::new(reader_stream, peer)
                .with_max_payload_len(self.config.max_payload_len);
            let sender = self.inbound_sender.clone();
            thread::Builder::new()
                .name(format!("framesync-client-{}", index))
                .spawn(move || read_messages(index, reader_connection, sender))
                .map_err(accept_error)?;

            self.clients
                .push(ClientConnection::new(address, writer));
            info!(
                "Client {} connected from {} ({}/{})",
                index,
                address,
                self.clients.len(),
                expected
            );
        }

        info!("All {} client(s) connected", expected);
        Ok(())
    }

    fn next_message(&self) -> Result<(ClientIndex, Inbound), ConnectionError> {
        // the server keeps a sender of its own, so this only fails if the
        // channel is torn down underneath it
        let (index, message) = self
            .inbound
            .recv()
            .map_err(|_| ConnectionError::ConnectionBroken {
                peer: "clients".to_string(),
                operation: "receive",
                kind: io::ErrorKind::BrokenPipe,
                message: "inbound channel closed".to_string(),
            })?;
        let message = message.map_err(|error| {
            error!("Client {}: {}", index, error);
            error
        })?;
        Ok((index, message))
    }

    fn peer(&self, index: ClientIndex) -> String {
        self.clients
            .get(index)
            .map(|client| client.peer().to_string())
            .unwrap_or_else(|| format!("client {}", index))
    }
}

impl NetworkSynchronizer for Server {
    fn role(&self) -> NodeRole {
        NodeRole::NetServer
    }

    /// Collects one INPUT_EVENTS message from every client, in whatever
    /// order they arrive, and broadcasts the server's own events followed by
    /// each client's events in arrival order.
    fn sync_events(&mut self, local: EventList) -> Result<EventList, ConnectionError> {
        let count = self.clients.len();
        let mut received: Vec<Option<EventList>> = (0..count).map(|_| None).collect();
        let mut arrival: Vec<ClientIndex> = Vec::with_capacity(count);

        while arrival.len() < count {
            let (index, message) = self.next_message()?;
            match message {
                Inbound::InputEvents(list) if received[index].is_none() => {
                    debug!("Client {} sent {} event(s)", index, list.len());
                    received[index] = Some(list);
                    arrival.push(index);
                }
                Inbound::InputEvents(_) => {
                    return Err(ConnectionError::OutOfTurn {
                        peer: self.peer(index),
                        received: Opcode::InputEvents,
                    });
                }
                other => {
                    return Err(ConnectionError::ProtocolDesync {
                        peer: self.peer(index),
                        expected: Opcode::InputEvents,
                        received: other.opcode().to_byte(),
                    });
                }
            }
        }

        let mut merged = local;
        for index in arrival {
            if let Some(list) = received[index].take() {
                merged.extend(list);
            }
        }

        for client in self.clients.iter_mut() {
            client.send_event_list(&merged)?;
        }

        self.frame += 1;
        debug!(
            "Frame {}: broadcast {} merged event(s) to {} client(s)",
            self.frame,
            merged.len(),
            count
        );
        Ok(merged)
    }

    /// Waits for a SWAP_REQUEST from every client, then releases them all.
    /// No SWAP_NOW leaves before the last request has arrived.
    fn sync_swap(&mut self) -> Result<(), ConnectionError> {
        let count = self.clients.len();
        let mut requested = vec![false; count];
        let mut pending = count;

        while pending > 0 {
            let (index, message) = self.next_message()?;
            match message {
                Inbound::SwapRequest if !requested[index] => {
                    requested[index] = true;
                    pending -= 1;
                }
                Inbound::SwapRequest => {
                    return Err(ConnectionError::OutOfTurn {
                        peer: self.peer(index),
                        received: Opcode::SwapRequest,
                    });
                }
                Inbound::InputEvents(_) if requested[index] => {
                    return Err(ConnectionError::OutOfTurn {
                        peer: self.peer(index),
                        received: Opcode::InputEvents,
                    });
                }
                other => {
                    return Err(ConnectionError::ProtocolDesync {
                        peer: self.peer(index),
                        expected: Opcode::SwapRequest,
                        received: other.opcode().to_byte(),
                    });
                }
            }
        }

        for client in self.clients.iter_mut() {
            client.send_swap_now()?;
        }
        Ok(())
    }
}
