use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The swarm population and where each peer reads its input from.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Swarm {
    /// Number of peers. Peers get the identifiers `1..=peers`; the tracker
    /// is not counted.
    #[serde(default = "Swarm::default_peers")]
    pub peers: u32,

    /// Directory containing one `in<id>.txt` input file per peer.
    #[serde(default = "Swarm::default_input_dir")]
    pub input_dir: PathBuf,
}

impl Default for Swarm {
    fn default() -> Self {
        Self {
            peers: Self::default_peers(),
            input_dir: Self::default_input_dir(),
        }
    }
}

impl Swarm {
    fn default_peers() -> u32 {
        3
    }

    fn default_input_dir() -> PathBuf {
        PathBuf::from("./share/inputs")
    }
}
