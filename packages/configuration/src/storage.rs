use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where completed files are persisted.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Storage {
    #[serde(default)]
    pub driver: Driver,

    /// Directory for the `filesystem` driver.
    #[serde(default = "Storage::default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            driver: Driver::default(),
            output_dir: Self::default_output_dir(),
        }
    }
}

impl Storage {
    fn default_output_dir() -> PathBuf {
        PathBuf::from("./storage/output")
    }
}

/// The storage driver.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Default, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// One file per completed download in the output directory.
    #[default]
    #[display("filesystem")]
    Filesystem,

    /// Completed downloads are kept in memory.
    #[display("memory")]
    Memory,
}
