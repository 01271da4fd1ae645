//! Messages exchanged in the swarm.
//!
//! Every message is a typed value distinguished by its kind. Peers talk to
//! the tracker through a single tracker inbox and to each other through
//! per-peer upload inboxes:
//!
//! ```text
//! | Kind            | Direction      | Reply           |
//! |-----------------|----------------|-----------------|
//! | InitReport      | peer → tracker | InitAck         |
//! | WantFile        | peer → tracker | FileInfo        |
//! | SwarmRefresh    | peer → tracker | SeedList        |
//! | FileComplete    | peer → tracker | none            |
//! | AllDone         | peer → tracker | none            |
//! | SegmentRequest  | peer → peer    | SegmentResponse |
//! | Shutdown        | tracker → peer | none            |
//! ```
//!
//! Synchronous exchanges carry a [`oneshot`](tokio::sync::oneshot) sender
//! for the reply inside the request. A dropped reply sender means the other
//! side went away before answering.
//!
//! Negative outcomes ("no such file", "segment not available") are encoded as
//! data in the replies. They are normal protocol outcomes, not faults.
pub mod peer;
pub mod tracker;

pub use peer::{SegmentRequest, SegmentResponse};
pub use tracker::{FileInfo, InitAck, RequestKind, Shutdown, TrackerRequest};

use tokio::sync::{mpsc, oneshot};

/// The sending half of the tracker inbox.
pub type TrackerSender = mpsc::Sender<TrackerRequest>;

/// The receiving half of the tracker inbox.
pub type TrackerInbox = mpsc::Receiver<TrackerRequest>;

/// The sending half of a peer's upload inbox.
pub type UploadSender = mpsc::Sender<SegmentRequest>;

/// The receiving half of a peer's upload inbox.
pub type UploadInbox = mpsc::Receiver<SegmentRequest>;

/// The sending half of a peer's shutdown signal, held by the tracker.
pub type ShutdownSender = oneshot::Sender<Shutdown>;

/// The receiving half of a peer's shutdown signal.
pub type ShutdownReceiver = oneshot::Receiver<Shutdown>;
