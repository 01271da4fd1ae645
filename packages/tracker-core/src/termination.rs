//! Global termination detection.
//!
//! The run ends when every peer of the population has announced it has
//! processed all its wanted files.
use std::collections::BTreeSet;

use swarm_sim_primitives::PeerId;

/// The peers that have announced they are done, out of the whole population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminationSet {
    population: BTreeSet<PeerId>,
    done: BTreeSet<PeerId>,
}

/// The outcome of an `AllDone` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Marked,
    AlreadyDone,
    NotAMember,
}

impl TerminationSet {
    #[must_use]
    pub fn new(population: impl IntoIterator<Item = PeerId>) -> Self {
        Self {
            population: population.into_iter().collect(),
            done: BTreeSet::new(),
        }
    }

    /// Marks the peer as done. Peers outside the population are ignored.
    pub fn mark_done(&mut self, peer: PeerId) -> Mark {
        if !self.is_member(peer) {
            return Mark::NotAMember;
        }

        if self.done.insert(peer) {
            Mark::Marked
        } else {
            Mark::AlreadyDone
        }
    }

    /// It's `true` when every peer of the population is done, including
    /// when the population is empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.done.len() == self.population.len()
    }

    #[must_use]
    pub fn is_member(&self, peer: PeerId) -> bool {
        self.population.contains(&peer)
    }

    /// The peers that have not announced they are done yet.
    #[must_use]
    pub fn remaining(&self) -> Vec<PeerId> {
        self.population.difference(&self.done).copied().collect()
    }

    #[must_use]
    pub fn population(&self) -> &BTreeSet<PeerId> {
        &self.population
    }
}
