//! Announce handler.
//!
//! Peers talk to the tracker about a single file in two moments:
//!
//! 1. Before downloading it, to learn its segment hashes and who can serve
//!    it (`WantFile`).
//! 2. After downloading and saving it, to announce they can serve it too
//!    (`FileComplete`).
//!
//! The first request is answered with a [`FileInfo`]:
//!
//! ```rust,no_run
//! use swarm_sim_primitives::{SeedList, SegmentHash};
//!
//! pub enum FileInfo {
//!     Unknown,
//!     Known { segments: Vec<SegmentHash>, seeds: SeedList },
//! }
//! ```
//!
//! An unknown file is a normal outcome: the peer skips it and moves on to
//! its next wanted file.
//!
//! The completion announcement has no reply. The peer is appended to the
//! file seeds so later downloaders can fetch segments from it. Completion
//! announcements for files the tracker has never seen are ignored, since
//! only files reported at bootstrap can be downloaded.
use std::sync::Arc;

use swarm_sim_primitives::PeerId;
use swarm_sim_protocol::FileInfo;

use crate::swarm::repository::in_memory::InMemorySwarmRepository;

/// Handles `WantFile` and `FileComplete` requests.
pub struct AnnounceHandler {
    /// The in-memory swarm registry.
    in_memory_swarm_repository: Arc<InMemorySwarmRepository>,
}

/// The outcome of a completion announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The peer was appended to the file seeds.
    NewSeed,

    /// The peer was already a seed of the file. Nothing changed.
    AlreadySeed,

    /// The file is not in the registry. Nothing changed.
    UnknownFile,
}

impl AnnounceHandler {
    #[must_use]
    pub fn new(in_memory_swarm_repository: &Arc<InMemorySwarmRepository>) -> Self {
        Self {
            in_memory_swarm_repository: in_memory_swarm_repository.clone(),
        }
    }

    /// Returns the canonical segments and the current seeds of the file.
    #[must_use]
    pub fn want_file(&self, filename: &str) -> FileInfo {
        self.in_memory_swarm_repository.get_file_info(filename)
    }

    /// Adds the peer to the seeds of a file it has just completed.
    pub fn announce_completion(&self, peer: PeerId, filename: &str) -> Completion {
        match self.in_memory_swarm_repository.add_seed(filename, peer) {
            Some(true) => Completion::NewSeed,
            Some(false) => Completion::AlreadySeed,
            None => {
                tracing::warn!(%peer, %filename, "completion announced for a file nobody reported, ignoring");
                Completion::UnknownFile
            }
        }
    }
}
