use std::net::{Shutdown, SocketAddr, TcpStream};

use framesync_shared::{ConnectionError, EventRecord, FramedConnection};

/// The sending half of one accepted client. Its receiving half lives on a
/// reader thread.
pub(crate) struct ClientConnection {
    address: SocketAddr,
    writer: FramedConnection<TcpStream>,
}

impl ClientConnection {
    pub fn new(address: SocketAddr, writer: FramedConnection<TcpStream>) -> Self {
        Self { address, writer }
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn peer(&self) -> &str {
        self.writer.peer()
    }

    pub fn send_event_list(&mut self, list: &[EventRecord]) -> Result<(), ConnectionError> {
        self.writer.send_event_list(list)
    }

    pub fn send_swap_now(&mut self) -> Result<(), ConnectionError> {
        self.writer.send_swap_now()
    }
}

impl Drop for ClientConnection {
    fn drop(&mut self) {
        // wakes the reader thread blocked on this stream
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }
}
