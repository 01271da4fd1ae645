//! File descriptors.
use serde::{Deserialize, Serialize};

use crate::segment::SegmentHash;

/// A named file made of an ordered sequence of segments.
///
/// The name is the unique key of the file for a peer and for the tracker.
/// Two peers describing the same name are assumed to agree on the segment
/// sequence; the protocol does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Constructor)]
pub struct FileDescriptor {
    pub name: String,
    pub segments: Vec<SegmentHash>,
}

impl FileDescriptor {
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&SegmentHash> {
        self.segments.get(index)
    }
}
