/// Integration tests for the full frame pipeline over a loopback cluster
///
/// Each node runs its own Dispatcher; every listener on every node must
/// observe the same events in the same order.

use std::{cell::RefCell, rc::Rc, thread};

use framesync_client::Client;
use framesync_shared::{Dispatcher, EventList, EventRecord, FrameState, NodeConfig};
use framesync_test::TestCluster;

const FRAMES: usize = 4;

/// Runs `FRAMES` frames, generating one button press per frame under
/// `node`, and returns every name the catch-all listener saw
fn run_node(mut dispatcher: Dispatcher, node: String) -> Vec<String> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    dispatcher.add_event_listener(move |event: &EventRecord| {
        log.borrow_mut().push(event.name().to_string())
    });

    let mut frame = 0;
    dispatcher.add_event_generator(move |events: &mut EventList| {
        events.push(EventRecord::button_down(format!("{}{}_Down", node, frame)));
        frame += 1;
    });

    for _ in 0..FRAMES {
        dispatcher.pre_update().expect("pre_update");
        assert_eq!(dispatcher.state(), FrameState::AwaitingPostRender);
        dispatcher.post_render().expect("post_render");
    }

    let names = seen.borrow().clone();
    names
}

#[test]
fn every_node_dispatches_identical_sequences() {
    env_logger::builder().is_test(true).try_init().ok();
    let TestCluster { server, clients } = TestCluster::new(2);

    let handles: Vec<_> = clients
        .into_iter()
        .enumerate()
        .map(|(index, client): (usize, Client)| {
            thread::spawn(move || run_node(Dispatcher::new(client), format!("client{}_", index)))
        })
        .collect();

    let server_seen = run_node(Dispatcher::new(server), "server_".to_string());
    for handle in handles {
        assert_eq!(handle.join().expect("client thread"), server_seen);
    }

    assert_eq!(server_seen.len(), FRAMES * 3);
    for frame in 0..FRAMES {
        assert_eq!(server_seen[frame * 3], format!("server_{}_Down", frame));
    }
}

#[test]
fn aliases_apply_on_every_node() {
    env_logger::builder().is_test(true).try_init().ok();
    let TestCluster {
        server,
        mut clients,
    } = TestCluster::new(1);
    let client = clients.remove(0);

    let config = NodeConfig {
        aliases: vec![("Paint_Down".to_string(), "Kbdp_Down".to_string())],
        ..NodeConfig::default()
    };

    let client_config = config.clone();
    let handle = thread::spawn(move || {
        let mut dispatcher = Dispatcher::with_config(client, &client_config);
        let painted = Rc::new(RefCell::new(0));
        let count = painted.clone();
        dispatcher.add_button_down_listener("Paint_Down", move || *count.borrow_mut() += 1);
        dispatcher.pre_update().expect("pre_update");
        dispatcher.post_render().expect("post_render");
        let total = *painted.borrow();
        total
    });

    let mut dispatcher = Dispatcher::with_config(server, &config);
    let painted = Rc::new(RefCell::new(0));
    let count = painted.clone();
    dispatcher.add_button_down_listener("Paint_Down", move || *count.borrow_mut() += 1);
    dispatcher.queue_event(EventRecord::button_down("Kbdp_Down"));
    dispatcher.pre_update().expect("pre_update");
    dispatcher.post_render().expect("post_render");

    assert_eq!(*painted.borrow(), 1);
    assert_eq!(handle.join().expect("client thread"), 1);
}
