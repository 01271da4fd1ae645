//! The shutdown broadcast.
//!
//! The tracker holds one [`oneshot`] sender per peer. Broadcasting consumes
//! the broadcast, so the signal reaches every peer at most once.
use std::collections::BTreeMap;

use swarm_sim_primitives::PeerId;
pub use swarm_sim_protocol::ShutdownReceiver;
use swarm_sim_protocol::{Shutdown, ShutdownSender};
use tokio::sync::oneshot;

#[derive(Debug, Default)]
pub struct ShutdownBroadcast {
    senders: BTreeMap<PeerId, ShutdownSender>,
}

impl ShutdownBroadcast {
    /// Creates one shutdown channel per peer.
    ///
    /// It returns the broadcast and the receivers to hand to the peers.
    #[must_use]
    pub fn new(population: impl IntoIterator<Item = PeerId>) -> (Self, BTreeMap<PeerId, ShutdownReceiver>) {
        let mut senders = BTreeMap::new();
        let mut receivers = BTreeMap::new();

        for peer in population {
            let (sender, receiver) = oneshot::channel();
            senders.insert(peer, sender);
            receivers.insert(peer, receiver);
        }

        (Self { senders }, receivers)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Sends the shutdown signal to every peer.
    ///
    /// It returns the number of peers that received it. A peer whose
    /// receiver is gone is logged and skipped.
    pub fn broadcast(self) -> usize {
        let mut delivered = 0;

        for (peer, sender) in self.senders {
            if sender.send(Shutdown).is_ok() {
                delivered += 1;
            } else {
                tracing::warn!(%peer, "peer is gone, shutdown signal not delivered");
            }
        }

        tracing::info!(delivered, "shutdown broadcast sent");

        delivered
    }
}

#[cfg(test)]
mod tests {

    mod the_shutdown_broadcast {
        use swarm_sim_protocol::Shutdown;
        use swarm_sim_test_helpers::sample;

        use crate::shutdown::ShutdownBroadcast;

        #[test]
        fn it_should_deliver_the_signal_to_every_peer() {
            let (broadcast, mut receivers) = ShutdownBroadcast::new([sample::peer(1), sample::peer(2)]);

            assert_eq!(broadcast.broadcast(), 2);

            for receiver in receivers.values_mut() {
                assert_eq!(receiver.try_recv().unwrap(), Shutdown);
            }
        }

        #[test]
        fn it_should_skip_peers_that_dropped_their_receiver() {
            let (broadcast, mut receivers) = ShutdownBroadcast::new([sample::peer(1), sample::peer(2)]);

            drop(receivers.remove(&sample::peer(1)));

            assert_eq!(broadcast.broadcast(), 1);
        }

        #[test]
        fn it_should_create_one_channel_per_peer() {
            let (broadcast, receivers) = ShutdownBroadcast::new([sample::peer(1), sample::peer(2), sample::peer(3)]);

            assert_eq!(broadcast.len(), 3);
            assert_eq!(receivers.len(), 3);
        }
    }
}
