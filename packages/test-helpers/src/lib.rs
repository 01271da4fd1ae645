//! Testing helpers for the swarm simulator.
pub mod configuration;
pub mod random;
pub mod sample;
