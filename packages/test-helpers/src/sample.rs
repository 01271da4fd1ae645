//! Sample data for testing.
use swarm_sim_primitives::{FileDescriptor, PeerId, SegmentHash, HASH_SIZE};

/// A deterministic fingerprint for segment `index` of `filename`.
///
/// # Panics
///
/// Will panic if the generated fingerprint is not valid, which only happens
/// for file names longer than the fingerprint.
#[must_use]
pub fn segment_hash(filename: &str, index: usize) -> SegmentHash {
    let prefix = format!("{filename}-{index}-");
    let hash = format!("{prefix:x<width$}", width = HASH_SIZE);

    hash.parse().expect("it should be a valid segment hash")
}

/// A file named `filename` with `segments` deterministic segments.
#[must_use]
pub fn file(filename: &str, segments: usize) -> FileDescriptor {
    FileDescriptor::new(
        filename.to_string(),
        (0..segments).map(|index| segment_hash(filename, index)).collect(),
    )
}

#[must_use]
pub fn peer(id: u32) -> PeerId {
    PeerId::new(id)
}
