//! The output sink for completed files.
//!
//! When a peer completes a wanted file it persists the ordered list of the
//! file segment hashes before announcing the completion to the tracker. A
//! file that can't be persisted is never announced.
//!
//! There are two drivers:
//!
//! - `filesystem`: writes the file `client<peer>_<filename>` into the output
//!   directory, one segment hash per line.
//! - `memory`: keeps the saved files in memory.
//!
//! A file saved by peer `2` as `client2_file1`:
//!
//! ```text
//! 8b4d3f0a2c6e9b1d5f7a3c8e0b2d4f6a
//! 1c3e5a7b9d0f2e4c6a8b0d1f3e5c7a9b
//! ```
pub mod driver;
pub mod error;
pub mod setup;

use mockall::automock;
use swarm_sim_primitives::{FileDescriptor, PeerId, SegmentHash};

use self::error::Error;

/// The name of the output file for a file completed by a peer.
#[must_use]
pub fn output_file_name(peer: PeerId, filename: &str) -> String {
    format!("client{peer}_{filename}")
}

/// The persistence trait for completed files.
#[automock]
pub trait Storage: Sync + Send {
    /// Persists the ordered segment hashes of a file completed by the peer.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the file can't be persisted.
    fn save_file(&self, peer: PeerId, file: &FileDescriptor) -> Result<(), Error>;

    /// Loads the segment hashes of a file saved by the peer.
    ///
    /// It returns `None` if the peer never saved the file.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the saved file can't be read back.
    fn load_file(&self, peer: PeerId, filename: &str) -> Result<Option<Vec<SegmentHash>>, Error>;
}
