//! Swarm data structures.
//!
//! This module defines the data the tracker stores for every file. In
//! `BitTorrent` terminology a "swarm" is the collection of peers sharing or
//! downloading a given file.
//!
//! The tracker keeps one [`SwarmEntry`](entry::SwarmEntry) per file name. We
//! can represent the data stored in memory with this JSON object:
//!
//! ```json
//! {
//!     "file1": {
//!         "segments": [
//!             "8b4d3f0a2c6e9b1d5f7a3c8e0b2d4f6a",
//!             "1c3e5a7b9d0f2e4c6a8b0d1f3e5c7a9b"
//!         ],
//!         "seeds": [1, 3]
//!     },
//!     "file2": {
//!         "segments": ["f0e1d2c3b4a5968778695a4b3c2d1e0f"],
//!         "seeds": [2]
//!     }
//! }
//! ```
//!
//! That JSON object does not exist, it's only a representation of the
//! tracker registry.
//!
//! - `segments` is the canonical segment sequence of the file. It is taken
//!   from the first peer that reports the file and it never changes.
//! - `seeds` lists the peers known to hold every segment of the file, in the
//!   order they became seeds. Seeds are never removed during a run.
//!
//! Entries are created when a peer reports owning the file during the
//! bootstrap phase and they are never destroyed.
pub mod entry;
pub mod repository;

use std::sync::Arc;

use parking_lot::Mutex;

/// A single swarm entry shared through the repository.
pub type EntryMutex = Arc<Mutex<entry::SwarmEntry>>;
