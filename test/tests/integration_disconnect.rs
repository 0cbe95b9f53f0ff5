/// Integration tests for connection loss and protocol violations
///
/// A cluster cannot continue with a silent or confused node, so every
/// such failure must surface from the barrier call as a ConnectionError.

use std::{io::ErrorKind, net::TcpStream, thread};

use framesync_server::Server;
use framesync_shared::{
    encode_list, ConnectionError, EventList, EventRecord, FramedConnection, NetworkSynchronizer,
    Opcode,
};
use framesync_test::{loopback_server_config, node_events, TestCluster};

fn init_logger() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// A server with one hand-driven client speaking raw frames
fn server_with_raw_client() -> (Server, FramedConnection<TcpStream>) {
    let mut server = Server::bind(loopback_server_config(1)).expect("bind");
    let stream = TcpStream::connect(server.local_addr()).expect("connect");
    server.accept_clients().expect("accept");
    (server, FramedConnection::new(stream, "raw client"))
}

#[test]
fn client_sees_server_vanish() {
    init_logger();
    let TestCluster { server, mut clients } = TestCluster::new(1);
    drop(server);

    let error = clients[0]
        .sync_events(node_events("orphan", 1))
        .expect_err("server is gone");
    assert!(error.is_broken(), "unexpected error {:?}", error);
}

#[test]
fn server_sees_client_vanish() {
    init_logger();
    let TestCluster {
        mut server,
        clients,
    } = TestCluster::new(2);
    let mut clients = clients.into_iter();
    let mut survivor = clients.next().expect("client 0");
    drop(clients);

    let handle = thread::spawn(move || survivor.sync_events(EventList::new()));

    let error = server
        .sync_events(EventList::new())
        .expect_err("client 1 is gone");
    match &error {
        ConnectionError::ConnectionBroken { peer, kind, .. } => {
            assert!(peer.starts_with("client 1"), "peer was {}", peer);
            assert!(matches!(
                kind,
                ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset
            ));
        }
        other => panic!("expected ConnectionBroken, got {:?}", other),
    }

    // the survivor is cut loose once the server goes down
    drop(server);
    assert!(handle.join().expect("survivor thread").is_err());
}

#[test]
fn swap_request_during_event_phase_is_a_desync() {
    init_logger();
    let (mut server, mut raw) = server_with_raw_client();
    raw.send_swap_request().expect("send");

    assert_eq!(
        server.sync_events(EventList::new()),
        Err(ConnectionError::ProtocolDesync {
            peer: format!("client 0 ({})", server.client_address(0).expect("address")),
            expected: Opcode::InputEvents,
            received: Opcode::SwapRequest.to_byte(),
        })
    );
}

#[test]
fn event_list_during_swap_phase_is_a_desync() {
    init_logger();
    let (mut server, mut raw) = server_with_raw_client();
    raw.send_event_list(&[EventRecord::button_down("Btn1_Down")])
        .expect("send");
    raw.send_event_list(&[]).expect("send");

    let merged = server.sync_events(EventList::new()).expect("first list");
    assert_eq!(merged.len(), 1);
    assert_eq!(raw.receive_event_list().expect("merged list"), merged);

    assert!(matches!(
        server.sync_swap(),
        Err(ConnectionError::ProtocolDesync {
            expected: Opcode::SwapRequest,
            received: 1,
            ..
        })
    ));
}

#[test]
fn second_event_list_before_the_frame_completes_is_out_of_turn() {
    init_logger();
    let mut server = Server::bind(loopback_server_config(2)).expect("bind");
    let hasty = TcpStream::connect(server.local_addr()).expect("connect");
    let _idle = TcpStream::connect(server.local_addr()).expect("connect");
    server.accept_clients().expect("accept");

    let mut hasty = FramedConnection::new(hasty, "hasty");
    hasty.send_event_list(&[]).expect("send");
    hasty.send_event_list(&[]).expect("send");

    assert!(matches!(
        server.sync_events(EventList::new()),
        Err(ConnectionError::OutOfTurn {
            received: Opcode::InputEvents,
            ..
        })
    ));
}

#[test]
fn swap_now_from_a_client_is_a_desync() {
    init_logger();
    let (mut server, mut raw) = server_with_raw_client();
    raw.send_event_list(&[]).expect("send");
    server.sync_events(EventList::new()).expect("sync_events");
    raw.send_swap_now().expect("send");

    let error = server.sync_swap().expect_err("desync");
    assert!(error.is_desync());
}

#[test]
fn garbage_byte_is_an_unknown_opcode() {
    init_logger();
    let (mut server, raw) = server_with_raw_client();
    let mut stream = raw.into_inner();
    std::io::Write::write_all(&mut stream, &[0xEE]).expect("write");

    assert!(matches!(
        server.sync_events(EventList::new()),
        Err(ConnectionError::UnknownOpcode { value: 0xEE, .. })
    ));
}

#[test]
fn merged_list_over_the_limit_is_refused_before_broadcast() {
    init_logger();
    let one_client = node_events("left", 1);
    let limit = encode_list(&one_client).len() as u32 + 8;

    let config = framesync_server::ServerConfig {
        max_payload_len: limit,
        ..loopback_server_config(2)
    };
    let mut server = Server::bind(config).expect("bind");
    let left = TcpStream::connect(server.local_addr()).expect("connect");
    let right = TcpStream::connect(server.local_addr()).expect("connect");
    server.accept_clients().expect("accept");

    let mut left = FramedConnection::new(left, "left");
    let mut right = FramedConnection::new(right, "right");
    left.send_event_list(&one_client).expect("send");
    right.send_event_list(&node_events("right", 1)).expect("send");

    let error = server
        .sync_events(EventList::new())
        .expect_err("merged list is too large");
    assert!(matches!(
        error,
        ConnectionError::OversizedPayload { limit: l, .. } if l == limit
    ));

    // nothing of the merged list reached either client
    drop(server);
    assert!(left.read_opcode().expect_err("closed").is_broken());
    assert!(right.read_opcode().expect_err("closed").is_broken());
}
