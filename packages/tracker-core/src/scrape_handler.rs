//! Scrape handler.
//!
//! Downloading peers periodically ask the tracker for the current seeds of
//! the file they are downloading (`SwarmRefresh`). The tracker answers with
//! the seed list as it is at that moment, including the peers that completed
//! the file after the download started.
//!
//! The handler also exposes the metadata of every swarm in bulk, which the
//! tracker uses to build its final report:
//!
//! ```json
//! {
//!     "files": {
//!         "file1": { "segments": 12, "seeds": 3 },
//!         "file2": { "segments": 40, "seeds": 1 }
//!     }
//! }
//! ```
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use swarm_sim_primitives::{SeedList, SwarmMetadata};

use crate::swarm::repository::in_memory::InMemorySwarmRepository;

/// Handles `SwarmRefresh` requests and bulk metadata queries.
pub struct ScrapeHandler {
    /// The in-memory swarm registry.
    in_memory_swarm_repository: Arc<InMemorySwarmRepository>,
}

/// The metadata of every swarm, ordered by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeData {
    pub files: BTreeMap<String, SwarmMetadata>,
}

impl ScrapeHandler {
    #[must_use]
    pub fn new(in_memory_swarm_repository: &Arc<InMemorySwarmRepository>) -> Self {
        Self {
            in_memory_swarm_repository: in_memory_swarm_repository.clone(),
        }
    }

    /// Returns the current seeds of the file.
    ///
    /// The list is empty if the file is not in the registry.
    #[must_use]
    pub fn refresh_swarm(&self, filename: &str) -> SeedList {
        self.in_memory_swarm_repository.get_seeds(filename)
    }

    #[must_use]
    pub fn scrape(&self) -> ScrapeData {
        ScrapeData {
            files: self.in_memory_swarm_repository.get_all_swarm_metadata(),
        }
    }
}

#[cfg(test)]
mod tests {

    mod the_scrape_handler {
        use std::sync::Arc;

        use swarm_sim_primitives::SwarmMetadata;
        use swarm_sim_test_helpers::sample;

        use crate::scrape_handler::ScrapeHandler;
        use crate::swarm::repository::in_memory::InMemorySwarmRepository;

        fn initialize_scrape_handler() -> (ScrapeHandler, Arc<InMemorySwarmRepository>) {
            let repository = Arc::new(InMemorySwarmRepository::default());
            (ScrapeHandler::new(&repository), repository)
        }

        #[test]
        fn it_should_return_the_current_seeds_of_a_file() {
            let (handler, repository) = initialize_scrape_handler();
            let file = sample::file("file1", 1);
            repository.register(&file.name, &file.segments, sample::peer(1));
            repository.add_seed("file1", sample::peer(3));

            assert_eq!(
                handler.refresh_swarm("file1").as_slice(),
                &[sample::peer(1), sample::peer(3)]
            );
        }

        #[test]
        fn it_should_return_an_empty_seed_list_for_an_unknown_file() {
            let (handler, _repository) = initialize_scrape_handler();

            assert!(handler.refresh_swarm("ghost").is_empty());
        }

        #[test]
        fn it_should_return_the_metadata_of_every_swarm() {
            let (handler, repository) = initialize_scrape_handler();
            let file = sample::file("file1", 4);
            repository.register(&file.name, &file.segments, sample::peer(1));

            let scrape_data = handler.scrape();

            assert_eq!(scrape_data.files.len(), 1);
            assert_eq!(scrape_data.files["file1"], SwarmMetadata { segments: 4, seeds: 1 });
        }

        #[test]
        fn it_should_return_no_files_when_the_registry_is_empty() {
            let (handler, _repository) = initialize_scrape_handler();

            assert!(handler.scrape().files.is_empty());
        }
    }
}
