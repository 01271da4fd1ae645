//! Peer to peer messages.
use swarm_sim_primitives::PeerId;
use tokio::sync::oneshot;

/// A request for one segment of a file, sent to a seed.
#[derive(Debug)]
pub struct SegmentRequest {
    pub from: PeerId,
    pub filename: String,
    pub index: usize,
    pub reply: oneshot::Sender<SegmentResponse>,
}

/// Whether the contacted peer holds the requested segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentResponse {
    Available,
    Unavailable,
}

impl SegmentResponse {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, SegmentResponse::Available)
    }
}

impl From<bool> for SegmentResponse {
    fn from(available: bool) -> Self {
        if available {
            SegmentResponse::Available
        } else {
            SegmentResponse::Unavailable
        }
    }
}
