//! Storage errors.
use std::path::PathBuf;
use std::sync::Arc;

use swarm_sim_configuration::Driver;
use swarm_sim_primitives::segment::ParseSegmentHashError;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("Unable to create the {driver} output directory {path:?}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        driver: Driver,
        source: Arc<std::io::Error>,
    },

    #[error("Unable to write {path:?} with the {driver} driver: {source}")]
    WriteFailed {
        path: PathBuf,
        driver: Driver,
        source: Arc<std::io::Error>,
    },

    #[error("Unable to read {path:?} with the {driver} driver: {source}")]
    ReadFailed {
        path: PathBuf,
        driver: Driver,
        source: Arc<std::io::Error>,
    },

    #[error("Invalid segment hash at line {line} of {path:?}: {source}")]
    InvalidContent {
        path: PathBuf,
        line: usize,
        source: ParseSegmentHashError,
    },
}
