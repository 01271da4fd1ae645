//! The peer runtime.
//!
//! A peer runs its two activities concurrently over the same state: the
//! download driver in its own task and the upload responder in the peer
//! task. The peer finishes when both are done, that is, after the driver
//! has processed every wanted file and the tracker has sent the shutdown
//! signal.
use std::sync::Arc;

use serde::Serialize;
use swarm_sim_configuration::Peer as PeerConfig;
use swarm_sim_primitives::PeerId;
use swarm_sim_protocol::{ShutdownReceiver, TrackerSender, UploadInbox};

use crate::download::{AbandonedFile, DownloadDriver};
use crate::error::PeerError;
use crate::input::PeerInput;
use crate::network::PeerNetwork;
use crate::state::PeerState;
use crate::storage::Storage;
use crate::tracker_client::TrackerClient;
use crate::upload::{UploadResponder, UploadStats};

/// The channels connecting a peer to the rest of the swarm.
pub struct PeerChannels {
    /// The tracker inbox.
    pub tracker: TrackerSender,

    /// The upload inboxes of every peer.
    pub network: Arc<PeerNetwork>,

    /// This peer's upload inbox.
    pub upload_inbox: UploadInbox,

    /// This peer's shutdown signal.
    pub shutdown: ShutdownReceiver,
}

/// What a peer did during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerReport {
    pub peer: PeerId,
    pub completed: Vec<String>,
    pub abandoned: Vec<AbandonedFile>,
    pub uploads: UploadStats,
}

pub struct Peer {
    id: PeerId,
    driver: DownloadDriver,
    responder: UploadResponder,
}

impl Peer {
    #[must_use]
    pub fn new(
        id: PeerId,
        input: PeerInput,
        config: &PeerConfig,
        channels: PeerChannels,
        storage: &Arc<Box<dyn Storage>>,
    ) -> Self {
        let state = PeerState::from_input(id, input).into_shared();

        let driver = DownloadDriver::new(
            &state,
            TrackerClient::new(id, channels.tracker),
            &channels.network,
            storage,
            config.swarm_refresh_interval,
        );

        let responder = UploadResponder::new(&state, channels.upload_inbox, channels.shutdown);

        Self { id, driver, responder }
    }

    #[must_use]
    pub fn id(&self) -> PeerId {
        self.id
    }

    /// Runs the peer until the swarm shuts down.
    ///
    /// # Errors
    ///
    /// Will return an error if the download driver lost the tracker or its
    /// task failed.
    pub async fn run(self) -> Result<PeerReport, PeerError> {
        tracing::info!(peer = %self.id, "peer started");

        let driver = tokio::spawn(self.driver.run());

        let uploads = self.responder.run().await;

        let download = driver.await??;

        tracing::info!(
            peer = %self.id,
            completed = download.completed.len(),
            abandoned = download.abandoned.len(),
            served = uploads.served,
            refused = uploads.refused,
            "peer stopped"
        );

        Ok(PeerReport {
            peer: self.id,
            completed: download.completed,
            abandoned: download.abandoned,
            uploads,
        })
    }
}
