//! Peer identifiers.
use serde::{Deserialize, Serialize};

/// The identifier of a peer in the swarm.
///
/// Identifiers are assigned by the process bootstrap and are unique for a
/// run. The tracker processes bootstrap reports in increasing identifier
/// order, so the ordering of this type is meaningful.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct PeerId(pub u32);

impl PeerId {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}
