//! Peer errors.
//!
//! Segments a seed refuses and files nobody reported are normal outcomes of
//! the protocol. They end up in the peer report, not here.
use crate::tracker_client::TrackerClientError;

#[derive(thiserror::Error, Debug)]
pub enum PeerError {
    /// The download driver lost the tracker.
    #[error("The download driver stopped: {source}")]
    Tracker {
        #[from]
        source: TrackerClientError,
    },

    /// The download driver task panicked or was cancelled.
    #[error("The download driver task failed: {source}")]
    DownloadTask {
        #[from]
        source: tokio::task::JoinError,
    },
}
