//! Peer to peer requests.
//!
//! The network maps every peer of the swarm to the sending half of its
//! upload inbox. Segment requests go straight to the seed; the tracker is
//! not involved.
use std::collections::BTreeMap;

use swarm_sim_primitives::PeerId;
use swarm_sim_protocol::{SegmentRequest, SegmentResponse, UploadSender};
use tokio::sync::oneshot;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Peer {peer} is not part of the swarm")]
    UnknownPeer { peer: PeerId },

    /// The upload inbox of the peer is closed or it dropped the reply.
    #[error("Peer {peer} is unreachable")]
    Unreachable { peer: PeerId },
}

#[derive(Debug, Clone, Default)]
pub struct PeerNetwork {
    peers: BTreeMap<PeerId, UploadSender>,
}

impl PeerNetwork {
    pub fn insert(&mut self, peer: PeerId, upload: UploadSender) {
        self.peers.insert(peer, upload);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Asks the seed whether it holds a segment and waits for the answer.
    ///
    /// # Errors
    ///
    /// Will return an error if the seed is not in the network or it's
    /// unreachable.
    pub async fn request_segment(
        &self,
        from: PeerId,
        seed: PeerId,
        filename: &str,
        index: usize,
    ) -> Result<SegmentResponse, NetworkError> {
        let upload = self.peers.get(&seed).ok_or(NetworkError::UnknownPeer { peer: seed })?;

        let (reply, reply_rx) = oneshot::channel();

        upload
            .send(SegmentRequest {
                from,
                filename: filename.to_owned(),
                index,
                reply,
            })
            .await
            .map_err(|_| NetworkError::Unreachable { peer: seed })?;

        reply_rx.await.map_err(|_| NetworkError::Unreachable { peer: seed })
    }
}
