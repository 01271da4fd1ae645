//! Initialize configuration from file or env var.
use swarm_sim_configuration::{Configuration, Info};

/// Loads the configuration from the sources in the env vars.
///
/// # Panics
///
/// Will panic if it can't load the configuration from either
/// `./share/default/config/swarm-sim.toml` or the env vars.
#[must_use]
pub fn initialize_configuration() -> Configuration {
    let info = Info::from_env();

    Configuration::load(&info).expect("the swarm simulator configuration should be loaded")
}
