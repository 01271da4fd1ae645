//! The swarm run.
//!
//! It builds the swarm from the configuration and runs it to completion:
//!
//! 1. Initialize the storage shared by every peer.
//! 2. Load the input of every peer. A peer whose input can't be loaded is
//!    excluded from the population and the run goes on without it.
//! 3. Create the tracker inbox and one upload inbox per peer.
//! 4. Start the tracker and the peers.
//! 5. Wait for the tracker to terminate and for every peer to observe the
//!    shutdown signal.
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use swarm_peer_core::error::PeerError;
use swarm_peer_core::input::{self, PeerInput};
use swarm_peer_core::network::PeerNetwork;
use swarm_peer_core::peer::{Peer, PeerChannels, PeerReport};
use swarm_peer_core::setup::upload_inbox;
use swarm_peer_core::storage;
use swarm_peer_core::storage::setup::initialize_storage;
use swarm_sim_configuration::Configuration;
use swarm_sim_primitives::PeerId;
use swarm_tracker_core::container::TrackerCoreContainer;
use swarm_tracker_core::coordinator::{Tracker, TrackerReport};
use swarm_tracker_core::error::TrackerError;
use swarm_tracker_core::setup::inbox;
use tokio::task::JoinError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unable to initialize the storage: {source}")]
    Storage {
        #[from]
        source: storage::error::Error,
    },

    #[error("The tracker failed: {source}")]
    Tracker {
        #[from]
        source: TrackerError,
    },

    #[error("The tracker task failed: {source}")]
    TrackerTask { source: JoinError },

    #[error("Peer {peer} failed: {source}")]
    Peer { peer: PeerId, source: PeerError },

    #[error("The task of peer {peer} failed: {source}")]
    PeerTask { peer: PeerId, source: JoinError },
}

/// A peer left out of the swarm because its input couldn't be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedPeer {
    pub peer: PeerId,
    pub reason: String,
}

/// The result of a swarm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwarmReport {
    pub excluded: Vec<ExcludedPeer>,
    pub tracker: TrackerReport,

    /// The peers of the population, in id order.
    pub peers: Vec<PeerReport>,
}

impl SwarmReport {
    #[must_use]
    pub fn peer(&self, peer: PeerId) -> Option<&PeerReport> {
        self.peers.iter().find(|report| report.peer == peer)
    }
}

/// Runs the whole swarm until every peer has stopped.
///
/// # Errors
///
/// Will return an error if the storage can't be initialized, if the tracker
/// fails or if any peer fails.
pub async fn run(config: &Configuration) -> Result<SwarmReport, Error> {
    let storage = initialize_storage(&config.storage)?;

    let (population, excluded) = load_inputs(config);

    let container = Arc::new(TrackerCoreContainer::initialize());
    let (tracker_sender, tracker_inbox) = inbox(&config.tracker);
    let ids: Vec<PeerId> = population.keys().copied().collect();
    let (tracker, mut shutdown_receivers) = Tracker::new(&container, &ids);

    let mut network = PeerNetwork::default();
    let mut upload_inboxes = BTreeMap::new();

    for id in &ids {
        let (sender, inbox) = upload_inbox(&config.peer);
        network.insert(*id, sender);
        upload_inboxes.insert(*id, inbox);
    }

    let network = Arc::new(network);

    let tracker_task = tokio::spawn(tracker.run(tracker_inbox));

    let mut peer_tasks = Vec::with_capacity(population.len());

    for (id, input) in population {
        let (Some(upload_inbox), Some(shutdown)) = (upload_inboxes.remove(&id), shutdown_receivers.remove(&id)) else {
            continue;
        };

        let peer = Peer::new(
            id,
            input,
            &config.peer,
            PeerChannels {
                tracker: tracker_sender.clone(),
                network: network.clone(),
                upload_inbox,
                shutdown,
            },
            &storage,
        );

        peer_tasks.push((id, tokio::spawn(peer.run())));
    }

    drop(tracker_sender);
    // Only the peers keep the upload senders alive from here on.
    drop(network);

    let tracker_report = tracker_task.await.map_err(|source| Error::TrackerTask { source })??;

    let ids: Vec<PeerId> = peer_tasks.iter().map(|(id, _)| *id).collect();
    let results = futures::future::join_all(peer_tasks.into_iter().map(|(_, task)| task)).await;

    let mut peers = Vec::with_capacity(results.len());

    for (peer, result) in ids.into_iter().zip(results) {
        let report = result
            .map_err(|source| Error::PeerTask { peer, source })?
            .map_err(|source| Error::Peer { peer, source })?;

        peers.push(report);
    }

    Ok(SwarmReport {
        excluded,
        tracker: tracker_report,
        peers,
    })
}

/// Loads the input of the peers `1..=peers`.
fn load_inputs(config: &Configuration) -> (BTreeMap<PeerId, PeerInput>, Vec<ExcludedPeer>) {
    let mut population = BTreeMap::new();
    let mut excluded = vec![];

    for peer in (1..=config.swarm.peers).map(PeerId::new) {
        match input::load(&config.swarm.input_dir, peer, &config.peer.limits) {
            Ok(input) => {
                tracing::debug!(%peer, owned = input.owned.len(), wanted = input.wanted.len(), "peer input loaded");
                population.insert(peer, input);
            }
            Err(err) => {
                tracing::error!(%peer, "peer excluded from the swarm: {err}");
                excluded.push(ExcludedPeer {
                    peer,
                    reason: err.to_string(),
                });
            }
        }
    }

    (population, excluded)
}

/// Logs the outcome of the run.
pub fn log_summary(report: &SwarmReport) {
    for excluded in &report.excluded {
        tracing::warn!(peer = %excluded.peer, reason = %excluded.reason, "peer did not join the swarm");
    }

    for (filename, metadata) in &report.tracker.files {
        tracing::info!(file = %filename, segments = metadata.segments, seeds = metadata.seeds, "swarm");
    }

    for peer in &report.peers {
        for file in &peer.abandoned {
            tracing::info!(peer = %peer.peer, file = %file.filename, reason = %file.reason, "file abandoned");
        }

        tracing::info!(
            peer = %peer.peer,
            completed = ?peer.completed,
            served = peer.uploads.served,
            refused = peer.uploads.refused,
            "peer summary"
        );
    }

    tracing::info!(
        peers = report.peers.len(),
        excluded = report.excluded.len(),
        shutdowns = report.tracker.shutdowns_delivered,
        "swarm run finished"
    );
}
