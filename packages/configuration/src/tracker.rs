use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Tracker {
    /// Capacity of the tracker inbox. Peers sending to a full inbox wait.
    #[serde(default = "Tracker::default_inbox_capacity")]
    pub inbox_capacity: usize,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            inbox_capacity: Self::default_inbox_capacity(),
        }
    }
}

impl Tracker {
    fn default_inbox_capacity() -> usize {
        64
    }
}
