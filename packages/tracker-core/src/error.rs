//! Tracker core errors.
//!
//! Protocol negatives like "unknown file" are answers, not errors. The only
//! fault the tracker can hit is losing its inbox: every sender is gone
//! before the run has terminated, so the missing notifications can never
//! arrive.
use std::panic::Location;

/// The phase the tracker was in when the error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phase {
    #[display("bootstrap")]
    Bootstrap,
    #[display("serving")]
    Serving,
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum TrackerError {
    /// All the senders of the tracker inbox were dropped before the run
    /// terminated.
    #[error("The tracker inbox was closed during the {phase} phase, pending peers: {pending:?}, {location}")]
    InboxClosed {
        phase: Phase,
        pending: Vec<u32>,
        location: &'static Location<'static>,
    },
}

impl TrackerError {
    #[track_caller]
    #[must_use]
    pub fn inbox_closed(phase: Phase, pending: Vec<u32>) -> Self {
        Self::InboxClosed {
            phase,
            pending,
            location: Location::caller(),
        }
    }
}
