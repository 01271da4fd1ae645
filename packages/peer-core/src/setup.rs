//! Peer inbox setup.
use swarm_sim_configuration::Peer;
use swarm_sim_protocol::{UploadInbox, UploadSender};
use tokio::sync::mpsc;

/// Creates a peer upload inbox with the configured capacity.
///
/// A zero capacity is raised to one.
#[must_use]
pub fn upload_inbox(config: &Peer) -> (UploadSender, UploadInbox) {
    mpsc::channel(config.upload_inbox_capacity.max(1))
}
