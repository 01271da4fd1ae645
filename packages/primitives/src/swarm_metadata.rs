use serde::{Deserialize, Serialize};

/// Aggregate data about the swarm of a single file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmMetadata {
    /// The number of segments of the file.
    pub segments: usize,

    /// The number of peers able to serve the complete file.
    pub seeds: usize,
}

impl SwarmMetadata {
    /// The metadata returned for files the tracker has never seen.
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }
}
