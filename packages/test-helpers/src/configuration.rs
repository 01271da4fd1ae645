//! Swarm simulator configuration factories for testing.
use std::env;
use std::path::PathBuf;

use swarm_sim_configuration::{Configuration, Driver, Threshold};

use crate::random;

/// This configuration is used for testing. It generates a random output
/// directory under the system temp dir so that parallel tests don't
/// interfere with each other, and it keeps completed files in memory.
///
/// > **NOTICE**: the output directory is not created.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off;

    config.storage.driver = Driver::Memory;
    config.storage.output_dir = ephemeral_output_dir();

    config
}

/// Ephemeral configuration with the `filesystem` storage driver.
#[must_use]
pub fn ephemeral_with_filesystem_storage() -> Configuration {
    let mut config = ephemeral();

    config.storage.driver = Driver::Filesystem;

    config
}

/// Ephemeral configuration with the given number of peers.
#[must_use]
pub fn ephemeral_with_peers(peers: u32) -> Configuration {
    let mut config = ephemeral();

    config.swarm.peers = peers;

    config
}

/// A random, not yet existing, directory under the system temp dir.
#[must_use]
pub fn ephemeral_output_dir() -> PathBuf {
    env::temp_dir().join(format!("swarm_sim_output_{}", random::string(16)))
}
