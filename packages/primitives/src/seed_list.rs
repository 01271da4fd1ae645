//! The ordered set of seeds of a file.
use serde::{Deserialize, Serialize};

use crate::peer::PeerId;

/// Peers able to serve every segment of a file.
///
/// It behaves like a set (a peer is never listed twice) but it keeps the
/// insertion order. Peers rotate over the seeds by position, so a stable
/// order makes the rotation deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedList(Vec<PeerId>);

impl SeedList {
    /// Adds the peer at the end of the list.
    ///
    /// # Returns
    ///
    /// - `true` if the peer was not a seed yet.
    /// - `false` if the peer was already listed. The list is unchanged.
    pub fn insert(&mut self, peer: PeerId) -> bool {
        if self.contains(&peer) {
            return false;
        }
        self.0.push(peer);
        true
    }

    #[must_use]
    pub fn contains(&self, peer: &PeerId) -> bool {
        self.0.contains(peer)
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<PeerId> {
        self.0.get(position).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeerId> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PeerId] {
        &self.0
    }
}

impl FromIterator<PeerId> for SeedList {
    fn from_iter<T: IntoIterator<Item = PeerId>>(iter: T) -> Self {
        let mut seeds = SeedList::default();
        for peer in iter {
            let _: bool = seeds.insert(peer);
        }
        seeds
    }
}

impl From<Vec<PeerId>> for SeedList {
    fn from(peers: Vec<PeerId>) -> Self {
        peers.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {

    mod the_seed_list {
        use crate::peer::PeerId;
        use crate::seed_list::SeedList;

        #[test]
        fn it_should_keep_the_insertion_order() {
            let mut seeds = SeedList::default();

            seeds.insert(PeerId(3));
            seeds.insert(PeerId(1));
            seeds.insert(PeerId(2));

            assert_eq!(seeds.as_slice(), &[PeerId(3), PeerId(1), PeerId(2)]);
        }

        #[test]
        fn it_should_not_list_the_same_peer_twice() {
            let mut seeds = SeedList::default();

            assert!(seeds.insert(PeerId(1)));
            assert!(!seeds.insert(PeerId(1)));

            assert_eq!(seeds.len(), 1);
        }

        #[test]
        fn it_should_drop_duplicates_when_built_from_a_list_of_peers() {
            let seeds = SeedList::from(vec![PeerId(2), PeerId(1), PeerId(2)]);

            assert_eq!(seeds.as_slice(), &[PeerId(2), PeerId(1)]);
        }
    }
}
