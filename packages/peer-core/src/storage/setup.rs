//! This module provides functionality for setting up the storage.
use std::sync::Arc;

use swarm_sim_configuration::Storage as StorageConfig;

use super::driver;
use super::error::Error;
use super::Storage;

/// Initializes the storage driver selected in the configuration.
///
/// The storage is shared by every peer of the swarm.
///
/// # Errors
///
/// Will return an error if the driver can't be built.
pub fn initialize_storage(config: &StorageConfig) -> Result<Arc<Box<dyn Storage>>, Error> {
    let storage = driver::build(&config.driver, &config.output_dir)?;

    tracing::info!(driver = %config.driver, output_dir = %config.output_dir.display(), "storage initialized");

    Ok(Arc::new(storage))
}
