//! Application setup.
use swarm_sim_configuration::Configuration;

use super::config::initialize_configuration;
use super::logging;

/// Loads the configuration and initializes the logging.
///
/// # Panics
///
/// Will panic if the configuration can't be loaded.
#[must_use]
pub fn setup() -> Configuration {
    let configuration = initialize_configuration();

    logging::setup(&configuration.logging);

    tracing::info!("configuration:\n{}", configuration.to_toml().unwrap_or_default());

    configuration
}
