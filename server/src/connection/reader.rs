use std::net::TcpStream;

use crossbeam_channel::Sender;
use log::{debug, trace};

use framesync_shared::{ConnectionError, EventList, FramedConnection, Opcode};

use super::ClientIndex;

/// One complete message received from a client
#[derive(Debug)]
pub(crate) enum Inbound {
    InputEvents(EventList),
    SwapRequest,
    SwapNow,
}

impl Inbound {
    pub fn opcode(&self) -> Opcode {
        match self {
            Inbound::InputEvents(_) => Opcode::InputEvents,
            Inbound::SwapRequest => Opcode::SwapRequest,
            Inbound::SwapNow => Opcode::SwapNow,
        }
    }
}

pub(crate) type InboundMessage = (ClientIndex, Result<Inbound, ConnectionError>);

/// Reads whole messages from one client until the stream fails, forwarding
/// each to the server. The failure itself is forwarded last.
pub(crate) fn read_messages(
    index: ClientIndex,
    mut connection: FramedConnection<TcpStream>,
    sender: Sender<InboundMessage>,
) {
    loop {
        let message = read_message(&mut connection);
        let failed = message.is_err();
        if sender.send((index, message)).is_err() {
            trace!("Server gone, reader for {} exiting", connection.peer());
            return;
        }
        if failed {
            debug!("Reader for {} stopped", connection.peer());
            return;
        }
    }
}

fn read_message(connection: &mut FramedConnection<TcpStream>) -> Result<Inbound, ConnectionError> {
    match connection.read_opcode()? {
        Opcode::InputEvents => connection
            .receive_event_list_body()
            .map(Inbound::InputEvents),
        Opcode::SwapRequest => Ok(Inbound::SwapRequest),
        Opcode::SwapNow => Ok(Inbound::SwapNow),
    }
}
