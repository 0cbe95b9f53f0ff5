/// Integration tests for the event barrier
///
/// Every node of a loopback cluster must see the same merged list each
/// frame: the server's own events first, then each client's events as one
/// contiguous, order-preserving block.

use std::thread;

use framesync_shared::{EventList, EventRecord, NetworkSynchronizer};
use framesync_test::{node_events, TestCluster, TestEventBuilder};

fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

fn names(list: &[EventRecord]) -> Vec<String> {
    list.iter().map(|event| event.name().to_string()).collect()
}

/// Checks that `block` occurs in `merged` as one contiguous run
fn contains_block(merged: &[String], block: &[String]) -> bool {
    if block.is_empty() {
        return true;
    }
    merged.windows(block.len()).any(|window| window == block)
}

#[test]
fn all_nodes_receive_the_same_merged_list() {
    init_logger();
    const FRAMES: usize = 5;
    let TestCluster {
        mut server,
        clients,
    } = TestCluster::new(3);

    let handles: Vec<_> = clients
        .into_iter()
        .enumerate()
        .map(|(index, mut client)| {
            thread::spawn(move || {
                let mut frames = Vec::new();
                for frame in 0..FRAMES {
                    let local = node_events(&format!("c{}f{}", index, frame), index + 1);
                    frames.push(client.sync_events(local).expect("client sync_events"));
                    client.sync_swap().expect("client sync_swap");
                }
                frames
            })
        })
        .collect();

    let mut server_frames: Vec<EventList> = Vec::new();
    for frame in 0..FRAMES {
        let local = node_events(&format!("sf{}", frame), 2);
        server_frames.push(server.sync_events(local).expect("server sync_events"));
        server.sync_swap().expect("server sync_swap");
    }

    let client_frames: Vec<Vec<EventList>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("client thread"))
        .collect();

    for frame in 0..FRAMES {
        let merged = names(&server_frames[frame]);
        assert_eq!(merged.len(), 2 + 1 + 2 + 3);

        // server events lead
        assert_eq!(
            &merged[..2],
            &names(&node_events(&format!("sf{}", frame), 2))[..]
        );

        for (index, frames) in client_frames.iter().enumerate() {
            assert_eq!(names(&frames[frame]), merged, "client {} frame {}", index, frame);

            let block = names(&node_events(&format!("c{}f{}", index, frame), index + 1));
            assert!(
                contains_block(&merged[2..], &block),
                "client {} events split in frame {}: {:?}",
                index,
                frame,
                merged
            );
        }
    }
}

#[test]
fn empty_frames_still_synchronize() {
    init_logger();
    let TestCluster {
        mut server,
        mut clients,
    } = TestCluster::new(1);
    let mut client = clients.remove(0);

    let handle = thread::spawn(move || {
        let merged = client.sync_events(EventList::new()).expect("sync_events");
        client.sync_swap().expect("sync_swap");
        merged
    });

    let merged = server.sync_events(EventList::new()).expect("sync_events");
    server.sync_swap().expect("sync_swap");

    assert!(merged.is_empty());
    assert!(handle.join().expect("client thread").is_empty());
}

#[test]
fn typed_payloads_survive_the_network() {
    init_logger();
    let TestCluster {
        mut server,
        mut clients,
    } = TestCluster::new(1);
    let mut client = clients.remove(0);

    let mut pose = framesync_shared::Pose::default();
    pose.position.y = 1.75;
    let sent = TestEventBuilder::new("wand")
        .tracker(pose)
        .analog(0.5)
        .cursor(960.0, 540.0)
        .button_up()
        .build();
    let expected = sent.clone();

    let handle = thread::spawn(move || {
        let merged = client.sync_events(sent).expect("sync_events");
        client.sync_swap().expect("sync_swap");
        merged
    });

    let merged = server.sync_events(EventList::new()).expect("sync_events");
    server.sync_swap().expect("sync_swap");

    assert_eq!(merged, expected);
    assert_eq!(handle.join().expect("client thread"), expected);
    assert_eq!(merged[0].tracker_pose().expect("pose").position.y, 1.75);
}

#[test]
fn two_clients_see_a_permutation_then_empty() {
    init_logger();
    let TestCluster {
        mut server,
        clients,
    } = TestCluster::new(2);

    let handles: Vec<_> = clients
        .into_iter()
        .enumerate()
        .map(|(index, mut client)| {
            thread::spawn(move || {
                let first = client
                    .sync_events(vec![EventRecord::button_down(format!("e{}", index + 1))])
                    .expect("first frame");
                client.sync_swap().expect("sync_swap");
                let second = client.sync_events(EventList::new()).expect("second frame");
                client.sync_swap().expect("sync_swap");
                (first, second)
            })
        })
        .collect();

    for _ in 0..2 {
        server.sync_events(EventList::new()).expect("sync_events");
        server.sync_swap().expect("sync_swap");
    }

    for handle in handles {
        let (first, second) = handle.join().expect("client thread");
        let mut first = names(&first);
        first.sort();
        assert_eq!(first, vec!["e1".to_string(), "e2".to_string()]);
        assert!(second.is_empty());
    }
}
