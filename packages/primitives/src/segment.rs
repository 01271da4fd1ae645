//! Segment fingerprints.
//!
//! Segment content is never transferred in the simulation. Each segment is
//! represented only by a fixed-length fingerprint which peers persist once a
//! file is complete.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a segment fingerprint, in characters.
pub const HASH_SIZE: usize = 32;

/// The fingerprint of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SegmentHash(String);

/// Errors returned when a segment fingerprint can't be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSegmentHashError {
    #[error("invalid segment hash length: expected {HASH_SIZE} characters, got {length}")]
    InvalidLength { length: usize },

    #[error("invalid character {character:?} at position {position} in segment hash")]
    InvalidCharacter { character: char, position: usize },
}

impl SegmentHash {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SegmentHash {
    type Err = ParseSegmentHashError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some((position, character)) = value
            .chars()
            .enumerate()
            .find(|(_, character)| !character.is_ascii_graphic())
        {
            return Err(ParseSegmentHashError::InvalidCharacter { character, position });
        }

        if value.len() != HASH_SIZE {
            return Err(ParseSegmentHashError::InvalidLength { length: value.len() });
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for SegmentHash {
    type Error = ParseSegmentHashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SegmentHash> for String {
    fn from(hash: SegmentHash) -> Self {
        hash.0
    }
}

impl fmt::Display for SegmentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
