use swarm_sim_primitives::{PeerId, SeedList, SegmentHash, SwarmMetadata};
use swarm_sim_protocol::FileInfo;

/// All the data the tracker keeps for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwarmEntry {
    filename: String,
    segments: Vec<SegmentHash>,
    seeds: SeedList,
}

impl SwarmEntry {
    #[must_use]
    pub fn new(filename: &str, segments: &[SegmentHash]) -> Self {
        Self {
            filename: filename.to_owned(),
            segments: segments.to_vec(),
            seeds: SeedList::default(),
        }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn segments(&self) -> &[SegmentHash] {
        &self.segments
    }

    #[must_use]
    pub fn seeds(&self) -> &SeedList {
        &self.seeds
    }

    /// It adds the peer to the seeds. It returns `false` if the peer was
    /// already a seed.
    pub fn add_seed(&mut self, peer: PeerId) -> bool {
        self.seeds.insert(peer)
    }

    #[must_use]
    pub fn file_info(&self) -> FileInfo {
        FileInfo::Known {
            segments: self.segments.clone(),
            seeds: self.seeds.clone(),
        }
    }

    #[must_use]
    pub fn get_swarm_metadata(&self) -> SwarmMetadata {
        SwarmMetadata {
            segments: self.segments.len(),
            seeds: self.seeds.len(),
        }
    }
}
