use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use swarm_sim_configuration::Tracker as TrackerConfig;
use swarm_sim_primitives::{FileDescriptor, PeerId, SeedList, SwarmMetadata};
use swarm_sim_protocol::{FileInfo, Shutdown, TrackerRequest, TrackerSender};
use swarm_sim_test_helpers::sample;
use swarm_tracker_core::container::TrackerCoreContainer;
use swarm_tracker_core::coordinator::{Tracker, TrackerReport};
use swarm_tracker_core::error::TrackerError;
use swarm_tracker_core::setup::inbox;
use swarm_tracker_core::shutdown::ShutdownReceiver;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

struct RunningTracker {
    sender: TrackerSender,
    run: JoinHandle<Result<TrackerReport, TrackerError>>,
    shutdown_receivers: BTreeMap<PeerId, ShutdownReceiver>,
}

fn start_tracker(population: &[PeerId]) -> RunningTracker {
    let container = Arc::new(TrackerCoreContainer::initialize());
    let (tracker, shutdown_receivers) = Tracker::new(&container, population);
    let (sender, inbox) = inbox(&TrackerConfig::default());

    RunningTracker {
        sender,
        run: tokio::spawn(tracker.run(inbox)),
        shutdown_receivers,
    }
}

/// A peer stand-in driving the tracker protocol by hand.
struct FakePeer {
    id: PeerId,
    tracker: TrackerSender,
}

impl FakePeer {
    fn new(id: PeerId, tracker: &TrackerSender) -> Self {
        Self {
            id,
            tracker: tracker.clone(),
        }
    }

    async fn report_owned_files(&self, files: Vec<FileDescriptor>) {
        let (ack, ack_rx) = oneshot::channel();
        self.tracker
            .send(TrackerRequest::InitReport { peer: self.id, files, ack })
            .await
            .unwrap();
        ack_rx.await.unwrap();
    }

    async fn want_file(&self, filename: &str) -> FileInfo {
        let (reply, reply_rx) = oneshot::channel();
        self.tracker
            .send(TrackerRequest::WantFile {
                peer: self.id,
                filename: filename.to_string(),
                reply,
            })
            .await
            .unwrap();
        reply_rx.await.unwrap()
    }

    async fn refresh_swarm(&self, filename: &str) -> SeedList {
        let (reply, reply_rx) = oneshot::channel();
        self.tracker
            .send(TrackerRequest::SwarmRefresh {
                peer: self.id,
                filename: filename.to_string(),
                reply,
            })
            .await
            .unwrap();
        reply_rx.await.unwrap()
    }

    async fn file_complete(&self, filename: &str) {
        self.tracker
            .send(TrackerRequest::FileComplete {
                peer: self.id,
                filename: filename.to_string(),
            })
            .await
            .unwrap();
    }

    async fn all_done(&self) {
        self.tracker.send(TrackerRequest::AllDone { peer: self.id }).await.unwrap();
    }
}

#[tokio::test]
async fn a_peer_downloading_a_file_should_become_one_of_its_seeds_after_completing_it() {
    let peer_a = sample::peer(1);
    let peer_b = sample::peer(2);
    let f1 = sample::file("f1", 2);

    let tracker = start_tracker(&[peer_a, peer_b]);
    let a = FakePeer::new(peer_a, &tracker.sender);
    let b = FakePeer::new(peer_b, &tracker.sender);

    a.report_owned_files(vec![f1.clone()]).await;
    b.report_owned_files(vec![]).await;

    assert_eq!(
        b.want_file("f1").await,
        FileInfo::Known {
            segments: f1.segments.clone(),
            seeds: SeedList::from(vec![peer_a]),
        }
    );

    b.file_complete("f1").await;

    assert_eq!(b.refresh_swarm("f1").await.as_slice(), &[peer_a, peer_b]);

    a.all_done().await;
    b.all_done().await;

    let report = timeout(TEST_TIMEOUT, tracker.run).await.unwrap().unwrap().unwrap();

    assert_eq!(report.files["f1"], SwarmMetadata { segments: 2, seeds: 2 });
    assert_eq!(report.metrics.seeds_added, 1);
}

#[tokio::test]
async fn a_peer_asking_for_a_file_nobody_reported_should_get_zero_segments() {
    let peer_c = sample::peer(1);

    let tracker = start_tracker(&[peer_c]);
    let c = FakePeer::new(peer_c, &tracker.sender);

    c.report_owned_files(vec![sample::file("f1", 1)]).await;

    let file_info = c.want_file("ghost").await;

    assert_eq!(file_info, FileInfo::Unknown);
    assert_eq!(file_info.segment_count(), 0);

    c.all_done().await;

    let report = timeout(TEST_TIMEOUT, tracker.run).await.unwrap().unwrap().unwrap();

    assert_eq!(report.metrics.unknown_files_replied, 1);
    assert!(!report.files.contains_key("ghost"));
}

#[tokio::test]
async fn the_tracker_should_shut_every_peer_down_exactly_once_after_all_of_them_are_done() {
    let population: Vec<PeerId> = (1..=5).map(sample::peer).collect();

    let tracker = start_tracker(&population);
    let peers: Vec<FakePeer> = population.iter().map(|id| FakePeer::new(*id, &tracker.sender)).collect();

    for peer in &peers {
        peer.report_owned_files(vec![]).await;
    }

    for peer in &peers {
        peer.all_done().await;
        // Repeated notifications don't count twice.
        peer.all_done().await;
    }

    let report = timeout(TEST_TIMEOUT, tracker.run).await.unwrap().unwrap().unwrap();

    assert_eq!(report.shutdowns_delivered, 5);
    assert_eq!(report.metrics.all_dones_handled, 5);

    for (_peer, receiver) in tracker.shutdown_receivers {
        assert_eq!(timeout(TEST_TIMEOUT, receiver).await.unwrap().unwrap(), Shutdown);
    }
}

#[tokio::test]
async fn the_tracker_should_not_shut_the_swarm_down_while_a_peer_is_still_downloading() {
    let population = [sample::peer(1), sample::peer(2)];

    let mut tracker = start_tracker(&population);
    let first = FakePeer::new(population[0], &tracker.sender);
    let second = FakePeer::new(population[1], &tracker.sender);

    first.report_owned_files(vec![]).await;
    second.report_owned_files(vec![]).await;

    first.all_done().await;

    // A round trip guarantees the `AllDone` above has been handled.
    let _ = second.want_file("f1").await;

    for receiver in tracker.shutdown_receivers.values_mut() {
        assert!(receiver.try_recv().is_err());
    }
    assert!(!tracker.run.is_finished());

    second.all_done().await;

    let report = timeout(TEST_TIMEOUT, tracker.run).await.unwrap().unwrap().unwrap();

    assert_eq!(report.shutdowns_delivered, 2);
}
