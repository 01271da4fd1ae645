//! Bootstrap handler.
//!
//! When a peer joins the swarm it reports every file it owns together with
//! the segment hashes of each file. The tracker uses these reports to build
//! the registry before any download starts.
//!
//! For each reported file:
//!
//! - If the file is not in the registry, a new swarm is created with the
//!   reported segment sequence and the peer as its only seed.
//! - If the file is already known, the peer is appended to the seeds. The
//!   segment sequence registered first stays canonical even when the new
//!   report disagrees with it.
//!
//! ```text
//! let registrations = bootstrap_handler.register_owned_files(peer, &files);
//! ```
use std::sync::Arc;

use swarm_sim_primitives::{FileDescriptor, PeerId};

use crate::swarm::repository::in_memory::{InMemorySwarmRepository, Registration};

/// Handles the `InitReport` requests sent by peers joining the swarm.
pub struct BootstrapHandler {
    /// The in-memory swarm registry.
    in_memory_swarm_repository: Arc<InMemorySwarmRepository>,
}

impl BootstrapHandler {
    #[must_use]
    pub fn new(in_memory_swarm_repository: &Arc<InMemorySwarmRepository>) -> Self {
        Self {
            in_memory_swarm_repository: in_memory_swarm_repository.clone(),
        }
    }

    /// Registers the peer as a seed of every file it owns.
    ///
    /// It returns one [`Registration`] per reported file, in report order.
    pub fn register_owned_files(&self, peer: PeerId, files: &[FileDescriptor]) -> Vec<Registration> {
        files
            .iter()
            .map(|file| {
                let registration = self.in_memory_swarm_repository.register(&file.name, &file.segments, peer);

                if !registration.segments_match {
                    tracing::warn!(
                        %peer,
                        filename = %file.name,
                        "reported segments differ from the registered ones, keeping the registered sequence"
                    );
                }

                tracing::debug!(%peer, filename = %file.name, ?registration, "owned file registered");

                registration
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {

    mod the_bootstrap_handler {
        use std::sync::Arc;

        use swarm_sim_primitives::SwarmMetadata;
        use swarm_sim_test_helpers::sample;

        use crate::bootstrap_handler::BootstrapHandler;
        use crate::swarm::repository::in_memory::InMemorySwarmRepository;

        fn initialize_bootstrap_handler() -> (BootstrapHandler, Arc<InMemorySwarmRepository>) {
            let repository = Arc::new(InMemorySwarmRepository::default());
            (BootstrapHandler::new(&repository), repository)
        }

        #[test]
        fn it_should_register_every_owned_file_of_the_peer() {
            let (handler, repository) = initialize_bootstrap_handler();

            let registrations =
                handler.register_owned_files(sample::peer(1), &[sample::file("file1", 2), sample::file("file2", 3)]);

            assert_eq!(registrations.len(), 2);
            assert_eq!(repository.len(), 2);
            assert_eq!(repository.get_swarm_metadata("file2"), SwarmMetadata { segments: 3, seeds: 1 });
        }

        #[test]
        fn it_should_add_peers_reporting_the_same_file_as_seeds_in_report_order() {
            let (handler, repository) = initialize_bootstrap_handler();
            let file = sample::file("file1", 2);

            handler.register_owned_files(sample::peer(2), &[file.clone()]);
            handler.register_owned_files(sample::peer(1), &[file.clone()]);

            assert_eq!(
                repository.get_seeds("file1").as_slice(),
                &[sample::peer(2), sample::peer(1)]
            );
        }

        #[test]
        fn it_should_accept_a_peer_that_owns_no_files() {
            let (handler, repository) = initialize_bootstrap_handler();

            let registrations = handler.register_owned_files(sample::peer(1), &[]);

            assert!(registrations.is_empty());
            assert!(repository.is_empty());
        }

        #[test]
        fn it_should_keep_the_first_segment_sequence_when_a_later_report_conflicts() {
            let (handler, repository) = initialize_bootstrap_handler();
            let original = sample::file("file1", 2);

            handler.register_owned_files(sample::peer(1), &[original.clone()]);
            let registrations = handler.register_owned_files(sample::peer(2), &[sample::file("file1", 5)]);

            assert!(!registrations[0].segments_match);
            assert_eq!(repository.get("file1").unwrap().segments(), original.segments.as_slice());
            assert_eq!(repository.get_seeds("file1").len(), 2);
        }
    }
}
