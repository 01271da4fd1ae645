//! Peer state.
//!
//! Every peer keeps the files it holds, complete or partial, and the names
//! of the files it wants. The download driver is the only writer: it adds
//! a file when it starts downloading it and marks each segment as it is
//! acquired. The upload responder only reads the state to answer segment
//! requests.
//!
//! Both run concurrently, so the state is shared through a
//! [`SharedPeerState`] lock. A segment marked by the driver is visible to
//! the responder as soon as the write lock is released.
use std::sync::Arc;

use parking_lot::RwLock;
use swarm_sim_primitives::{FileDescriptor, PeerId, SegmentHash};

use crate::input::PeerInput;

pub type SharedPeerState = Arc<RwLock<PeerState>>;

/// A file held by the peer and the segments it has acquired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerFileState {
    descriptor: FileDescriptor,
    acquired: Vec<bool>,
}

impl PeerFileState {
    /// A file owned from the start. Every segment is acquired.
    #[must_use]
    pub fn complete(descriptor: FileDescriptor) -> Self {
        let acquired = vec![true; descriptor.segment_count()];
        Self { descriptor, acquired }
    }

    /// A file about to be downloaded. No segment is acquired.
    #[must_use]
    pub fn empty(descriptor: FileDescriptor) -> Self {
        let acquired = vec![false; descriptor.segment_count()];
        Self { descriptor, acquired }
    }

    #[must_use]
    pub fn descriptor(&self) -> &FileDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn has_segment(&self, index: usize) -> bool {
        self.acquired.get(index).copied().unwrap_or(false)
    }

    /// It returns `false` if the index is out of range.
    pub fn mark_acquired(&mut self, index: usize) -> bool {
        match self.acquired.get_mut(index) {
            Some(acquired) => {
                *acquired = true;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn acquired_count(&self) -> usize {
        self.acquired.iter().filter(|acquired| **acquired).count()
    }

    /// A file is complete when every segment has been acquired.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.acquired.iter().all(|acquired| *acquired)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerState {
    id: PeerId,
    files: Vec<PeerFileState>,
    wanted: Vec<String>,
    download_finished: bool,
}

impl PeerState {
    /// The initial state of a peer: the owned files are complete and the
    /// download has not started.
    #[must_use]
    pub fn from_input(id: PeerId, input: PeerInput) -> Self {
        Self {
            id,
            files: input.owned.into_iter().map(PeerFileState::complete).collect(),
            wanted: input.wanted,
            download_finished: false,
        }
    }

    #[must_use]
    pub fn into_shared(self) -> SharedPeerState {
        Arc::new(RwLock::new(self))
    }

    #[must_use]
    pub fn id(&self) -> PeerId {
        self.id
    }

    #[must_use]
    pub fn wanted(&self) -> &[String] {
        &self.wanted
    }

    #[must_use]
    pub fn file(&self, filename: &str) -> Option<&PeerFileState> {
        self.files.iter().find(|file| file.descriptor.name == filename)
    }

    fn file_mut(&mut self, filename: &str) -> Option<&mut PeerFileState> {
        self.files.iter_mut().find(|file| file.descriptor.name == filename)
    }

    /// The descriptors of the complete files, in the order they were added.
    #[must_use]
    pub fn complete_files(&self) -> Vec<FileDescriptor> {
        self.files
            .iter()
            .filter(|file| file.is_complete())
            .map(|file| file.descriptor.clone())
            .collect()
    }

    /// Starts tracking a wanted file with none of its segments acquired.
    ///
    /// It returns `false`, and leaves the state unchanged, if the peer
    /// already holds a file with that name.
    pub fn begin_download(&mut self, filename: &str, segments: Vec<SegmentHash>) -> bool {
        if self.file(filename).is_some() {
            return false;
        }

        self.files
            .push(PeerFileState::empty(FileDescriptor::new(filename.to_owned(), segments)));

        true
    }

    /// It returns `false` if the peer doesn't hold the file or the index is
    /// out of range.
    pub fn mark_acquired(&mut self, filename: &str, index: usize) -> bool {
        self.file_mut(filename).is_some_and(|file| file.mark_acquired(index))
    }

    /// Whether the peer holds the segment: the file is known, the index is in
    /// range and the segment has been acquired.
    #[must_use]
    pub fn has_segment(&self, filename: &str, index: usize) -> bool {
        self.file(filename).is_some_and(|file| file.has_segment(index))
    }

    /// The descriptor of the file if every one of its segments has been
    /// acquired.
    #[must_use]
    pub fn completed_descriptor(&self, filename: &str) -> Option<FileDescriptor> {
        self.file(filename)
            .filter(|file| file.is_complete())
            .map(|file| file.descriptor.clone())
    }

    pub fn mark_download_finished(&mut self) {
        self.download_finished = true;
    }

    #[must_use]
    pub fn is_download_finished(&self) -> bool {
        self.download_finished
    }
}
