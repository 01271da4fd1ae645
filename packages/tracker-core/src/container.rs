//! The tracker core services wired together.
use std::sync::Arc;

use crate::announce_handler::AnnounceHandler;
use crate::bootstrap_handler::BootstrapHandler;
use crate::scrape_handler::ScrapeHandler;
use crate::swarm::repository::in_memory::InMemorySwarmRepository;

/// The handlers share a single swarm registry.
pub struct TrackerCoreContainer {
    pub in_memory_swarm_repository: Arc<InMemorySwarmRepository>,
    pub bootstrap_handler: Arc<BootstrapHandler>,
    pub announce_handler: Arc<AnnounceHandler>,
    pub scrape_handler: Arc<ScrapeHandler>,
}

impl TrackerCoreContainer {
    #[must_use]
    pub fn initialize() -> Self {
        let in_memory_swarm_repository = Arc::new(InMemorySwarmRepository::default());
        let bootstrap_handler = Arc::new(BootstrapHandler::new(&in_memory_swarm_repository));
        let announce_handler = Arc::new(AnnounceHandler::new(&in_memory_swarm_repository));
        let scrape_handler = Arc::new(ScrapeHandler::new(&in_memory_swarm_repository));

        Self {
            in_memory_swarm_repository,
            bootstrap_handler,
            announce_handler,
            scrape_handler,
        }
    }
}
