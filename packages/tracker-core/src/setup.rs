//! Tracker inbox setup.
use swarm_sim_configuration::Tracker;
use swarm_sim_protocol::{TrackerInbox, TrackerSender};
use tokio::sync::mpsc;

/// Creates the tracker inbox with the configured capacity.
///
/// A zero capacity is raised to one.
#[must_use]
pub fn inbox(config: &Tracker) -> (TrackerSender, TrackerInbox) {
    mpsc::channel(config.inbox_capacity.max(1))
}

#[cfg(test)]
mod tests {
    use swarm_sim_configuration::Tracker;

    use crate::setup::inbox;

    #[test]
    fn it_should_create_the_inbox_with_the_configured_capacity() {
        let (sender, _inbox) = inbox(&Tracker { inbox_capacity: 8 });

        assert_eq!(sender.max_capacity(), 8);
    }

    #[test]
    fn it_should_not_create_an_inbox_without_capacity() {
        let (sender, _inbox) = inbox(&Tracker { inbox_capacity: 0 });

        assert_eq!(sender.max_capacity(), 1);
    }
}
