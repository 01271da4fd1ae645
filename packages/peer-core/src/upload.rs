//! The upload responder.
//!
//! Every peer answers segment requests from the other peers for its whole
//! lifetime, including after its own downloads are over: other peers may
//! still need the files it holds. The responder waits on both its upload
//! inbox and the shutdown signal, and stops as soon as the signal arrives.
//!
//! A request is answered with [`SegmentResponse::Available`] only if the
//! peer holds the file, the index is in range and that segment has been
//! acquired. Partial files only serve the segments already acquired.
use serde::Serialize;
use swarm_sim_primitives::PeerId;
use swarm_sim_protocol::{SegmentRequest, SegmentResponse, ShutdownReceiver, UploadInbox};

use crate::state::{PeerState, SharedPeerState};

/// Counters of the segment requests answered by a peer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadStats {
    pub served: u64,
    pub refused: u64,
}

/// Whether the peer holds the requested segment.
#[must_use]
pub fn answer(state: &PeerState, filename: &str, index: usize) -> SegmentResponse {
    SegmentResponse::from(state.has_segment(filename, index))
}

pub struct UploadResponder {
    peer: PeerId,
    state: SharedPeerState,
    inbox: UploadInbox,
    shutdown: ShutdownReceiver,
    stats: UploadStats,
}

impl UploadResponder {
    #[must_use]
    pub fn new(state: &SharedPeerState, inbox: UploadInbox, shutdown: ShutdownReceiver) -> Self {
        let peer = state.read().id();

        Self {
            peer,
            state: state.clone(),
            inbox,
            shutdown,
            stats: UploadStats::default(),
        }
    }

    /// Answers segment requests until the shutdown signal arrives.
    ///
    /// If the tracker goes away without sending the signal the responder
    /// stops too.
    pub async fn run(mut self) -> UploadStats {
        tracing::debug!(peer = %self.peer, "upload responder started");

        loop {
            tokio::select! {
                biased;

                signal = &mut self.shutdown => {
                    match signal {
                        Ok(_) => tracing::debug!(peer = %self.peer, "shutdown received, upload responder stopped"),
                        Err(_) => tracing::warn!(peer = %self.peer, "tracker gone without a shutdown, upload responder stopped"),
                    }
                    break;
                }

                request = self.inbox.recv() => {
                    if let Some(request) = request {
                        self.handle(request);
                    } else {
                        // Nobody can reach this peer anymore. It still waits
                        // for the signal to stop.
                        let _ = (&mut self.shutdown).await;
                        break;
                    }
                }
            }
        }

        self.stats
    }

    fn handle(&mut self, request: SegmentRequest) {
        let response = answer(&self.state.read(), &request.filename, request.index);

        if response.is_available() {
            self.stats.served += 1;
        } else {
            self.stats.refused += 1;
        }

        tracing::debug!(
            peer = %self.peer,
            from = %request.from,
            file = %request.filename,
            segment = request.index,
            ?response,
            "segment request answered"
        );

        if request.reply.send(response).is_err() {
            tracing::debug!(peer = %self.peer, from = %request.from, "requester is gone, answer dropped");
        }
    }
}

#[cfg(test)]
mod tests {

    mod answering_a_segment_request {
        use rstest::rstest;
        use swarm_sim_protocol::SegmentResponse;
        use swarm_sim_test_helpers::sample;

        use crate::input::PeerInput;
        use crate::state::PeerState;
        use crate::upload::answer;

        fn peer_owning_file1_and_downloading_file2() -> PeerState {
            let mut state = PeerState::from_input(
                sample::peer(1),
                PeerInput {
                    owned: vec![sample::file("file1", 2)],
                    wanted: vec!["file2".to_string()],
                },
            );
            state.begin_download("file2", sample::file("file2", 3).segments);
            state.mark_acquired("file2", 0);
            state
        }

        #[rstest]
        #[case::owned_file("file1", 1, SegmentResponse::Available)]
        #[case::acquired_segment_of_a_partial_file("file2", 0, SegmentResponse::Available)]
        #[case::missing_segment_of_a_partial_file("file2", 1, SegmentResponse::Unavailable)]
        #[case::index_out_of_range("file1", 2, SegmentResponse::Unavailable)]
        #[case::unknown_file("ghost", 0, SegmentResponse::Unavailable)]
        fn it_should_only_claim_the_segments_the_peer_holds(
            #[case] filename: &str,
            #[case] index: usize,
            #[case] expected: SegmentResponse,
        ) {
            let state = peer_owning_file1_and_downloading_file2();

            assert_eq!(answer(&state, filename, index), expected);
        }
    }

    mod the_upload_responder {
        use std::time::Duration;

        use swarm_sim_protocol::{SegmentRequest, SegmentResponse, Shutdown};
        use swarm_sim_test_helpers::sample;
        use tokio::sync::{mpsc, oneshot};
        use tokio::time::timeout;

        use crate::input::PeerInput;
        use crate::state::PeerState;
        use crate::upload::{UploadResponder, UploadStats};

        const TEST_TIMEOUT: Duration = Duration::from_secs(5);

        async fn request(upload: &mpsc::Sender<SegmentRequest>, filename: &str, index: usize) -> SegmentResponse {
            let (reply, reply_rx) = oneshot::channel();
            upload
                .send(SegmentRequest {
                    from: sample::peer(2),
                    filename: filename.to_string(),
                    index,
                    reply,
                })
                .await
                .unwrap();
            reply_rx.await.unwrap()
        }

        #[tokio::test]
        async fn it_should_answer_requests_until_the_shutdown_signal_arrives() {
            let state = PeerState::from_input(
                sample::peer(1),
                PeerInput {
                    owned: vec![sample::file("file1", 1)],
                    wanted: vec![],
                },
            )
            .into_shared();
            let (upload, inbox) = mpsc::channel(4);
            let (shutdown, shutdown_rx) = oneshot::channel();

            let responder = tokio::spawn(UploadResponder::new(&state, inbox, shutdown_rx).run());

            assert_eq!(request(&upload, "file1", 0).await, SegmentResponse::Available);
            assert_eq!(request(&upload, "file1", 1).await, SegmentResponse::Unavailable);

            shutdown.send(Shutdown).unwrap();

            let stats = timeout(TEST_TIMEOUT, responder).await.unwrap().unwrap();
            assert_eq!(stats, UploadStats { served: 1, refused: 1 });
        }

        #[tokio::test]
        async fn it_should_keep_serving_after_the_download_driver_has_finished() {
            let state = PeerState::from_input(
                sample::peer(1),
                PeerInput {
                    owned: vec![sample::file("file1", 1)],
                    wanted: vec![],
                },
            )
            .into_shared();
            state.write().mark_download_finished();
            let (upload, inbox) = mpsc::channel(4);
            let (shutdown, shutdown_rx) = oneshot::channel();

            let responder = tokio::spawn(UploadResponder::new(&state, inbox, shutdown_rx).run());

            assert_eq!(request(&upload, "file1", 0).await, SegmentResponse::Available);

            shutdown.send(Shutdown).unwrap();
            timeout(TEST_TIMEOUT, responder).await.unwrap().unwrap();
        }

        #[tokio::test]
        async fn it_should_see_the_segments_acquired_while_it_is_running() {
            let state = PeerState::from_input(sample::peer(1), PeerInput::default()).into_shared();
            state.write().begin_download("file2", sample::file("file2", 2).segments);
            let (upload, inbox) = mpsc::channel(4);
            let (shutdown, shutdown_rx) = oneshot::channel();

            let responder = tokio::spawn(UploadResponder::new(&state, inbox, shutdown_rx).run());

            assert_eq!(request(&upload, "file2", 0).await, SegmentResponse::Unavailable);

            state.write().mark_acquired("file2", 0);

            assert_eq!(request(&upload, "file2", 0).await, SegmentResponse::Available);

            shutdown.send(Shutdown).unwrap();
            timeout(TEST_TIMEOUT, responder).await.unwrap().unwrap();
        }

        #[tokio::test]
        async fn it_should_wait_for_the_shutdown_signal_when_its_inbox_is_closed() {
            let state = PeerState::from_input(sample::peer(1), PeerInput::default()).into_shared();
            let (upload, inbox) = mpsc::channel(1);
            let (shutdown, shutdown_rx) = oneshot::channel();

            let responder = tokio::spawn(UploadResponder::new(&state, inbox, shutdown_rx).run());

            drop(upload);
            tokio::task::yield_now().await;
            assert!(!responder.is_finished());

            shutdown.send(Shutdown).unwrap();
            timeout(TEST_TIMEOUT, responder).await.unwrap().unwrap();
        }

        #[tokio::test]
        async fn it_should_stop_when_the_tracker_is_gone() {
            let state = PeerState::from_input(sample::peer(1), PeerInput::default()).into_shared();
            let (_upload, inbox) = mpsc::channel(1);
            let (shutdown, shutdown_rx) = oneshot::channel::<Shutdown>();

            let responder = tokio::spawn(UploadResponder::new(&state, inbox, shutdown_rx).run());

            drop(shutdown);

            timeout(TEST_TIMEOUT, responder).await.unwrap().unwrap();
        }
    }
}
