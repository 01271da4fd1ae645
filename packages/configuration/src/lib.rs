//! Configuration data structures for the swarm simulator.
//!
//! The configuration is loaded in layers, each one overriding the previous:
//!
//! 1. Default values.
//! 2. A TOML document, either passed inline in the `SWARM_SIM_CONFIG_TOML`
//!    env var or read from the file in `SWARM_SIM_CONFIG_TOML_PATH`.
//! 3. Individual env var overrides, for example
//!    `SWARM_SIM_CONFIG_OVERRIDE_PEER__SWARM_REFRESH_INTERVAL=5`.
//!
//! A complete configuration file looks like this:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [swarm]
//! peers = 3
//! input_dir = "./share/inputs"
//!
//! [tracker]
//! inbox_capacity = 64
//!
//! [peer]
//! swarm_refresh_interval = 10
//! upload_inbox_capacity = 32
//!
//! [peer.limits]
//! max_owned_files = 10
//! max_wanted_files = 10
//! max_segments = 100
//!
//! [storage]
//! driver = "filesystem"
//! output_dir = "./storage/output"
//! ```
pub mod logging;
pub mod peer;
pub mod storage;
pub mod swarm;
pub mod tracker;

use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::logging::{Logging, Threshold};
pub use crate::peer::{Limits, Peer};
pub use crate::storage::{Driver, Storage};
pub use crate::swarm::Swarm;
pub use crate::tracker::Tracker;

/// The whole `swarm-sim.toml` document, passed inline.
pub const ENV_VAR_CONFIG_TOML: &str = "SWARM_SIM_CONFIG_TOML";

/// The path of the `swarm-sim.toml` file.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "SWARM_SIM_CONFIG_TOML_PATH";

/// The default path of the `swarm-sim.toml` file.
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/swarm-sim.toml";

/// Prefix for env vars that override single configuration options.
pub const CONFIG_OVERRIDE_PREFIX: &str = "SWARM_SIM_CONFIG_OVERRIDE_";

/// Separator between nested keys in override env vars.
pub const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

/// Where to load the configuration from.
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Builds the info from the values of the env vars.
    #[must_use]
    pub fn new(config_toml: Option<String>, config_toml_path: Option<String>) -> Self {
        Self {
            config_toml,
            config_toml_path: config_toml_path.unwrap_or_else(|| DEFAULT_PATH_CONFIG.to_string()),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ENV_VAR_CONFIG_TOML).ok(),
            std::env::var(ENV_VAR_CONFIG_TOML_PATH).ok(),
        )
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to load the configuration from the file {path}: the file does not exist")]
    MissingConfigFile { path: PathBuf },

    #[error("Unable to load the configuration: {source}")]
    ConfigError { source: Box<figment::Error> },

    #[error("Unable to serialize the configuration: {source}")]
    SerializationError { source: toml::ser::Error },
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigError { source: Box::new(err) }
    }
}

/// The simulator configuration.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub logging: Logging,

    #[serde(default)]
    pub swarm: Swarm,

    #[serde(default)]
    pub tracker: Tracker,

    #[serde(default)]
    pub peer: Peer,

    #[serde(default)]
    pub storage: Storage,
}

impl Configuration {
    /// Loads the configuration from the given sources.
    ///
    /// # Errors
    ///
    /// Will return an error if the configuration file is missing or if the
    /// merged configuration has invalid values.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::string(config_toml))
        } else {
            let path = PathBuf::from(&info.config_toml_path);

            if !path.exists() {
                return Err(Error::MissingConfigFile { path });
            }

            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::file(path))
        };

        let figment = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR));

        Ok(figment.extract()?)
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Will return an error if the configuration can't be serialized.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|source| Error::SerializationError { source })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use figment::Jail;

    use crate::{Configuration, Driver, Error, Info, Threshold};

    fn default_config_toml() -> String {
        r#"[logging]
           threshold = "info"

           [swarm]
           peers = 3
           input_dir = "./share/inputs"

           [tracker]
           inbox_capacity = 64

           [peer]
           swarm_refresh_interval = 10
           upload_inbox_capacity = 32

           [peer.limits]

           [storage]
           driver = "filesystem"
           output_dir = "./storage/output"
        "#
        .to_string()
    }

    #[test]
    fn configuration_should_have_default_values() {
        let configuration = Configuration::default();

        assert_eq!(configuration.logging.threshold, Threshold::Info);
        assert_eq!(configuration.swarm.peers, 3);
        assert_eq!(configuration.peer.swarm_refresh_interval, 10);
        assert_eq!(configuration.storage.driver, Driver::Filesystem);
    }

    #[test]
    fn configuration_should_be_loaded_from_an_inline_toml_document() {
        Jail::expect_with(|_jail| {
            let info = Info::new(Some(default_config_toml()), None);

            let configuration = Configuration::load(&info).expect("Could not load configuration");

            assert_eq!(configuration, Configuration::default());

            Ok(())
        });
    }

    #[test]
    fn configuration_should_use_the_default_values_for_missing_options() {
        Jail::expect_with(|_jail| {
            let info = Info::new(Some("[swarm]\npeers = 7\n".to_string()), None);

            let configuration = Configuration::load(&info).expect("Could not load configuration");

            assert_eq!(configuration.swarm.peers, 7);
            assert_eq!(configuration.tracker, Configuration::default().tracker);

            Ok(())
        });
    }

    #[test]
    fn configuration_should_be_loaded_from_a_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("swarm-sim.toml", &default_config_toml())?;

            let info = Info::new(None, Some("swarm-sim.toml".to_string()));

            let configuration = Configuration::load(&info).expect("Could not load configuration");

            assert_eq!(configuration, Configuration::default());

            Ok(())
        });
    }

    #[test]
    fn configuration_should_fail_when_the_toml_file_does_not_exist() {
        Jail::expect_with(|_jail| {
            let info = Info::new(None, Some("missing.toml".to_string()));

            let result = Configuration::load(&info);

            assert!(matches!(result, Err(Error::MissingConfigFile { path }) if path == PathBuf::from("missing.toml")));

            Ok(())
        });
    }

    #[test]
    fn configuration_should_allow_overriding_options_with_env_vars() {
        Jail::expect_with(|jail| {
            jail.set_env("SWARM_SIM_CONFIG_OVERRIDE_PEER__SWARM_REFRESH_INTERVAL", "5");
            jail.set_env("SWARM_SIM_CONFIG_OVERRIDE_PEER__LIMITS__MAX_SEGMENTS", "100");
            jail.set_env("SWARM_SIM_CONFIG_OVERRIDE_STORAGE__DRIVER", "memory");

            let info = Info::new(Some(default_config_toml()), None);

            let configuration = Configuration::load(&info).expect("Could not load configuration");

            assert_eq!(configuration.peer.swarm_refresh_interval, 5);
            assert_eq!(configuration.peer.limits.max_segments, Some(100));
            assert_eq!(configuration.storage.driver, Driver::Memory);

            Ok(())
        });
    }

    #[test]
    fn configuration_should_be_encoded_back_to_toml() {
        let configuration = Configuration::default();

        let toml = configuration.to_toml().expect("Could not encode configuration");

        assert!(toml.contains("[swarm]"));
        assert!(toml.contains("swarm_refresh_interval = 10"));
    }
}
