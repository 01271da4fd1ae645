//! Random data generators for testing.
use std::fmt::Write;

use rand::Rng;
use swarm_sim_primitives::{SegmentHash, HASH_SIZE};

/// Returns a random lowercase hex string of the given length.
#[must_use]
pub fn string(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length).fold(String::with_capacity(length), |mut output, _| {
        let nibble: u8 = rng.random_range(0..16);
        let _ = write!(output, "{nibble:x}");
        output
    })
}

/// Generates a random segment fingerprint.
///
/// # Panics
///
/// Will never panic: the generated string always has [`HASH_SIZE`] hex characters.
#[must_use]
pub fn segment_hash() -> SegmentHash {
    string(HASH_SIZE).parse().expect("it should be a valid segment hash")
}
