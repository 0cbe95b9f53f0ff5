/// Integration tests for the swap barrier
///
/// No node may be released to swap before every node has asked to.

use std::{
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

use framesync_shared::{EventList, NetworkSynchronizer};
use framesync_test::TestCluster;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Request,
    Release,
}

type Timeline = Arc<Mutex<Vec<(usize, usize, Mark, Instant)>>>;

#[test]
fn no_node_swaps_before_the_slowest_requests() {
    env_logger::builder().is_test(true).try_init().ok();
    const FRAMES: usize = 3;
    const CLIENTS: usize = 3;
    let TestCluster {
        mut server,
        clients,
    } = TestCluster::new(CLIENTS);
    let timeline: Timeline = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = clients
        .into_iter()
        .enumerate()
        .map(|(index, mut client)| {
            let timeline = timeline.clone();
            thread::spawn(move || {
                for frame in 0..FRAMES {
                    client.sync_events(EventList::new()).expect("sync_events");
                    // a different node renders slowest each frame
                    if (index + frame) % CLIENTS == 0 {
                        thread::sleep(Duration::from_millis(60));
                    }
                    timeline
                        .lock()
                        .unwrap()
                        .push((index, frame, Mark::Request, Instant::now()));
                    client.sync_swap().expect("sync_swap");
                    timeline
                        .lock()
                        .unwrap()
                        .push((index, frame, Mark::Release, Instant::now()));
                }
            })
        })
        .collect();

    for _ in 0..FRAMES {
        server.sync_events(EventList::new()).expect("sync_events");
        server.sync_swap().expect("sync_swap");
    }
    for handle in handles {
        handle.join().expect("client thread");
    }

    let timeline = timeline.lock().unwrap();
    for frame in 0..FRAMES {
        let last_request = timeline
            .iter()
            .filter(|(_, f, mark, _)| *f == frame && *mark == Mark::Request)
            .map(|(_, _, _, at)| *at)
            .max()
            .expect("requests recorded");
        let releases: Vec<Instant> = timeline
            .iter()
            .filter(|(_, f, mark, _)| *f == frame && *mark == Mark::Release)
            .map(|(_, _, _, at)| *at)
            .collect();

        assert_eq!(releases.len(), CLIENTS);
        for release in releases {
            assert!(release >= last_request, "frame {} released early", frame);
        }
    }
}

#[test]
fn server_waits_for_a_slow_client() {
    env_logger::builder().is_test(true).try_init().ok();
    let TestCluster {
        mut server,
        mut clients,
    } = TestCluster::new(1);
    let mut client = clients.remove(0);

    let handle = thread::spawn(move || {
        client.sync_events(EventList::new()).expect("sync_events");
        thread::sleep(Duration::from_millis(100));
        client.sync_swap().expect("sync_swap");
    });

    server.sync_events(EventList::new()).expect("sync_events");
    let started = Instant::now();
    server.sync_swap().expect("sync_swap");
    assert!(started.elapsed() >= Duration::from_millis(80));

    handle.join().expect("client thread");
}
