//! The download driver.
//!
//! The driver runs the download side of a peer, from joining the swarm to
//! telling the tracker it is done:
//!
//! 1. Report the owned files to the tracker and wait for the acknowledgement.
//! 2. For each wanted file, in order:
//!    - Ask the tracker for the file. An unknown file is abandoned.
//!    - Acquire the segments one by one from the seeds.
//!    - Persist the complete file and announce it to the tracker.
//! 3. Tell the tracker all the wanted files have been processed.
//!
//! Each file goes through these states:
//!
//! ```text
//! REQUESTED -> (segment loop) -> COMPLETE
//!                             -> ABANDONED
//! ```
//!
//! # Seed rotation
//!
//! With `K` seeds, segment `i` is requested from the seeds at positions
//! `i mod K`, `(i + 1) mod K`, ... until one of them answers it has the
//! segment. Starting at a different seed for every segment spreads the load.
//! If all `K` seeds refuse (or are unreachable) the file is abandoned and
//! the driver moves on to the next wanted file.
//!
//! # Swarm refresh
//!
//! Every time the number of acquired segments reaches a multiple of the
//! configured interval, the driver asks the tracker for the current seeds.
//! Peers that complete the file meanwhile become candidates for the next
//! segments. Segments already past their rotation are not retried.
use std::sync::Arc;

use serde::Serialize;
use swarm_sim_primitives::{FileDescriptor, PeerId, SeedList, SegmentHash};
use swarm_sim_protocol::{FileInfo, SegmentResponse};

use crate::network::PeerNetwork;
use crate::state::SharedPeerState;
use crate::storage::Storage;
use crate::tracker_client::{TrackerClient, TrackerClientError};

/// Why a wanted file was not completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum AbandonReason {
    /// No peer reported the file.
    #[display("unknown file")]
    UnknownFile,

    /// Every seed refused the segment.
    #[display("segment {index} unavailable")]
    SegmentUnavailable { index: usize },

    /// The complete file could not be persisted.
    #[display("persist failed")]
    PersistFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Completed,
    Abandoned(AbandonReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbandonedFile {
    pub filename: String,
    pub reason: AbandonReason,
}

/// The outcome of every wanted file, in download order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadReport {
    pub completed: Vec<String>,
    pub abandoned: Vec<AbandonedFile>,
}

/// The seed positions to try for a segment, in order.
///
/// It yields every position in `0..seed_count` exactly once, starting at
/// `index mod seed_count`.
pub fn rotation(index: usize, seed_count: usize) -> impl Iterator<Item = usize> {
    (0..seed_count).map(move |offset| (index + offset) % seed_count)
}

pub struct DownloadDriver {
    peer: PeerId,
    state: SharedPeerState,
    tracker: TrackerClient,
    network: Arc<PeerNetwork>,
    storage: Arc<Box<dyn Storage>>,
    swarm_refresh_interval: usize,
}

impl DownloadDriver {
    #[must_use]
    pub fn new(
        state: &SharedPeerState,
        tracker: TrackerClient,
        network: &Arc<PeerNetwork>,
        storage: &Arc<Box<dyn Storage>>,
        swarm_refresh_interval: usize,
    ) -> Self {
        let peer = state.read().id();

        Self {
            peer,
            state: state.clone(),
            tracker,
            network: network.clone(),
            storage: storage.clone(),
            swarm_refresh_interval,
        }
    }

    /// Joins the swarm and processes every wanted file.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker is gone. The remaining wanted
    /// files are not processed.
    pub async fn run(self) -> Result<DownloadReport, TrackerClientError> {
        let owned_files = self.state.read().complete_files();

        self.tracker.report_owned_files(owned_files).await?;

        tracing::debug!(peer = %self.peer, "joined the swarm");

        let wanted = self.state.read().wanted().to_vec();
        let mut report = DownloadReport::default();

        for filename in wanted {
            match self.download(&filename).await? {
                FileOutcome::Completed => {
                    tracing::info!(peer = %self.peer, file = %filename, "file completed");
                    report.completed.push(filename);
                }
                FileOutcome::Abandoned(reason) => {
                    tracing::info!(peer = %self.peer, file = %filename, %reason, "file abandoned");
                    report.abandoned.push(AbandonedFile { filename, reason });
                }
            }
        }

        self.tracker.all_done().await?;

        self.state.write().mark_download_finished();

        tracing::debug!(peer = %self.peer, "download finished");

        Ok(report)
    }

    async fn download(&self, filename: &str) -> Result<FileOutcome, TrackerClientError> {
        let (segments, mut seeds) = match self.tracker.want_file(filename).await? {
            FileInfo::Known { segments, seeds } if !segments.is_empty() => (segments, seeds),
            _ => return Ok(FileOutcome::Abandoned(AbandonReason::UnknownFile)),
        };

        tracing::debug!(peer = %self.peer, file = %filename, segments = segments.len(), seeds = seeds.len(), "download started");

        self.state.write().begin_download(filename, segments.clone());

        for index in 0..segments.len() {
            if !self.acquire_segment(filename, index, &seeds).await {
                return Ok(FileOutcome::Abandoned(AbandonReason::SegmentUnavailable { index }));
            }

            self.state.write().mark_acquired(filename, index);

            let acquired = index + 1;

            if self.swarm_refresh_interval > 0 && acquired % self.swarm_refresh_interval == 0 {
                seeds = self.tracker.refresh_swarm(filename).await?;

                tracing::debug!(peer = %self.peer, file = %filename, acquired, seeds = seeds.len(), "swarm refreshed");
            }
        }

        self.complete(filename, segments).await
    }

    /// Tries the seeds in rotation until one of them has the segment.
    async fn acquire_segment(&self, filename: &str, index: usize, seeds: &SeedList) -> bool {
        for position in rotation(index, seeds.len()) {
            let Some(seed) = seeds.get(position) else {
                continue;
            };

            match self.network.request_segment(self.peer, seed, filename, index).await {
                Ok(SegmentResponse::Available) => {
                    tracing::trace!(peer = %self.peer, %seed, file = %filename, segment = index, "segment acquired");
                    return true;
                }
                Ok(SegmentResponse::Unavailable) => {
                    tracing::trace!(peer = %self.peer, %seed, file = %filename, segment = index, "segment refused");
                }
                Err(err) => {
                    tracing::debug!(peer = %self.peer, %seed, file = %filename, segment = index, %err, "seed unreachable");
                }
            }
        }

        false
    }

    /// Persists the file and announces it. A file that can't be persisted
    /// is not announced.
    async fn complete(&self, filename: &str, segments: Vec<SegmentHash>) -> Result<FileOutcome, TrackerClientError> {
        let file = FileDescriptor::new(filename.to_owned(), segments);

        if let Err(err) = self.storage.save_file(self.peer, &file) {
            tracing::error!(peer = %self.peer, file = %filename, %err, "unable to persist the completed file");
            return Ok(FileOutcome::Abandoned(AbandonReason::PersistFailed));
        }

        self.tracker.file_complete(filename).await?;

        Ok(FileOutcome::Completed)
    }
}
