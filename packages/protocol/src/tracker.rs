//! Peer to tracker messages.
use serde::{Deserialize, Serialize};
use swarm_sim_primitives::{FileDescriptor, PeerId, SeedList, SegmentHash};
use tokio::sync::oneshot;

/// The tag carried by every request sent to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display)]
pub enum RequestKind {
    #[display("init_report")]
    InitReport,
    #[display("want_file")]
    WantFile,
    #[display("swarm_refresh")]
    SwarmRefresh,
    #[display("file_complete")]
    FileComplete,
    #[display("all_done")]
    AllDone,
}

/// A request sent by a peer to the tracker.
#[derive(Debug)]
pub enum TrackerRequest {
    /// The full list of files owned by the peer when it joins the swarm.
    InitReport {
        peer: PeerId,
        files: Vec<FileDescriptor>,
        ack: oneshot::Sender<InitAck>,
    },

    /// The peer wants to download a file.
    WantFile {
        peer: PeerId,
        filename: String,
        reply: oneshot::Sender<FileInfo>,
    },

    /// The peer wants the current seed list of a file it is downloading.
    SwarmRefresh {
        peer: PeerId,
        filename: String,
        reply: oneshot::Sender<SeedList>,
    },

    /// The peer holds the complete file and can serve it.
    FileComplete { peer: PeerId, filename: String },

    /// The peer has processed all its wanted files.
    AllDone { peer: PeerId },
}

impl TrackerRequest {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            TrackerRequest::InitReport { .. } => RequestKind::InitReport,
            TrackerRequest::WantFile { .. } => RequestKind::WantFile,
            TrackerRequest::SwarmRefresh { .. } => RequestKind::SwarmRefresh,
            TrackerRequest::FileComplete { .. } => RequestKind::FileComplete,
            TrackerRequest::AllDone { .. } => RequestKind::AllDone,
        }
    }

    /// The peer that sent the request.
    #[must_use]
    pub fn peer(&self) -> PeerId {
        match self {
            TrackerRequest::InitReport { peer, .. }
            | TrackerRequest::WantFile { peer, .. }
            | TrackerRequest::SwarmRefresh { peer, .. }
            | TrackerRequest::FileComplete { peer, .. }
            | TrackerRequest::AllDone { peer } => *peer,
        }
    }
}

/// Acknowledgement of an `InitReport`. The peer may start downloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitAck;

/// Sent once by the tracker to every peer when the whole swarm is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shutdown;

/// The tracker's answer to a `WantFile` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileInfo {
    /// No peer ever reported the file.
    Unknown,

    /// The canonical segment sequence and the current seeds.
    Known { segments: Vec<SegmentHash>, seeds: SeedList },
}

impl FileInfo {
    /// The number of segments. It's zero for unknown files.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        match self {
            FileInfo::Unknown => 0,
            FileInfo::Known { segments, .. } => segments.len(),
        }
    }
}
