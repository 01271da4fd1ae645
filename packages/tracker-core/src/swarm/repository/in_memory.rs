use std::collections::BTreeMap;
use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use parking_lot::Mutex;
use swarm_sim_primitives::{PeerId, SeedList, SegmentHash, SwarmMetadata};
use swarm_sim_protocol::FileInfo;

use crate::swarm::entry::SwarmEntry;
use crate::swarm::EntryMutex;

/// The in-memory swarm registry.
///
/// Entries are indexed and ordered by file name. The registry is only
/// mutated by the tracker control loop, so the per-entry mutex is never
/// contended; it lets the handlers share the repository through an `Arc`.
#[derive(Debug, Default)]
pub struct InMemorySwarmRepository {
    swarms: SkipMap<String, EntryMutex>,
}

/// What happened when a peer reported owning a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// The file was not in the registry before.
    pub swarm_created: bool,

    /// The peer was not a seed of the file before.
    pub seed_added: bool,

    /// The reported segments are the same as the registered ones. When
    /// they differ the registered sequence is kept.
    pub segments_match: bool,
}

impl InMemorySwarmRepository {
    /// It creates the swarm for the file if it doesn't exist yet and adds
    /// the peer to its seeds.
    pub fn register(&self, filename: &str, segments: &[SegmentHash], seed: PeerId) -> Registration {
        let mut swarm_created = false;

        let entry = self.swarms.get_or_insert_with(filename.to_owned(), || {
            swarm_created = true;
            Arc::new(Mutex::new(SwarmEntry::new(filename, segments)))
        });

        let mut swarm = entry.value().lock();

        Registration {
            swarm_created,
            seed_added: swarm.add_seed(seed),
            segments_match: swarm.segments() == segments,
        }
    }

    /// It adds the peer to the seeds of an existing file.
    ///
    /// # Returns
    ///
    /// - `None` if the file is not in the registry.
    /// - `Some(true)` if the peer is a new seed.
    /// - `Some(false)` if the peer was already a seed.
    pub fn add_seed(&self, filename: &str, peer: PeerId) -> Option<bool> {
        self.swarms.get(filename).map(|entry| entry.value().lock().add_seed(peer))
    }

    #[must_use]
    pub fn get(&self, filename: &str) -> Option<SwarmEntry> {
        self.swarms.get(filename).map(|entry| entry.value().lock().clone())
    }

    /// It returns the segments and seeds of the file, or
    /// [`FileInfo::Unknown`] if the file is not in the registry.
    #[must_use]
    pub fn get_file_info(&self, filename: &str) -> FileInfo {
        match self.swarms.get(filename) {
            Some(entry) => entry.value().lock().file_info(),
            None => FileInfo::Unknown,
        }
    }

    /// It returns the current seeds of the file, or an empty list if the
    /// file is not in the registry.
    #[must_use]
    pub fn get_seeds(&self, filename: &str) -> SeedList {
        match self.swarms.get(filename) {
            Some(entry) => entry.value().lock().seeds().clone(),
            None => SeedList::default(),
        }
    }

    #[must_use]
    pub fn get_swarm_metadata(&self, filename: &str) -> SwarmMetadata {
        match self.swarms.get(filename) {
            Some(entry) => entry.value().lock().get_swarm_metadata(),
            None => SwarmMetadata::zeroed(),
        }
    }

    /// It returns the swarm metadata of every file, ordered by file name.
    #[must_use]
    pub fn get_all_swarm_metadata(&self) -> BTreeMap<String, SwarmMetadata> {
        self.swarms
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().lock().get_swarm_metadata()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.swarms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swarms.is_empty()
    }
}
