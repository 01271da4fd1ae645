use serde::{Deserialize, Serialize};

/// Peer settings.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Peer {
    /// The download driver asks the tracker for a fresh seed list every time
    /// this many segments of a file have been acquired. `0` disables it.
    #[serde(default = "Peer::default_swarm_refresh_interval")]
    pub swarm_refresh_interval: usize,

    /// Capacity of each peer's upload inbox.
    #[serde(default = "Peer::default_upload_inbox_capacity")]
    pub upload_inbox_capacity: usize,

    #[serde(default)]
    pub limits: Limits,
}

impl Default for Peer {
    fn default() -> Self {
        Self {
            swarm_refresh_interval: Self::default_swarm_refresh_interval(),
            upload_inbox_capacity: Self::default_upload_inbox_capacity(),
            limits: Limits::default(),
        }
    }
}

impl Peer {
    fn default_swarm_refresh_interval() -> usize {
        10
    }

    fn default_upload_inbox_capacity() -> usize {
        32
    }
}

/// Optional limits on a peer's input. `None` means unlimited.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Limits {
    #[serde(default)]
    pub max_owned_files: Option<usize>,

    #[serde(default)]
    pub max_wanted_files: Option<usize>,

    /// Maximum number of segments per file.
    #[serde(default)]
    pub max_segments: Option<usize>,
}
