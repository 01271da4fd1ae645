//! Primitive types for the swarm simulator.
//!
//! This crate contains the basic data structures shared by the tracker and
//! the peers:
//!
//! - [`PeerId`](peer::PeerId): the identifier (rank) of a peer in the swarm.
//! - [`SegmentHash`](segment::SegmentHash): the fingerprint standing in for a
//!   segment's content.
//! - [`FileDescriptor`](file::FileDescriptor): a named, ordered sequence of
//!   segments.
//! - [`SeedList`](seed_list::SeedList): the ordered set of peers able to serve
//!   a complete file.
//! - [`SwarmMetadata`](swarm_metadata::SwarmMetadata): aggregate data about a
//!   file's swarm.
pub mod file;
pub mod peer;
pub mod seed_list;
pub mod segment;
pub mod swarm_metadata;

pub use file::FileDescriptor;
pub use peer::PeerId;
pub use seed_list::SeedList;
pub use segment::{SegmentHash, HASH_SIZE};
pub use swarm_metadata::SwarmMetadata;
