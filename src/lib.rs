//! **Swarm Sim** is a BitTorrent-style swarm simulator.
//!
//! A tracker keeps the registry of the files in the swarm and which peers
//! can serve them. Peers own some files, want some others, and fetch the
//! segments they are missing directly from each other. No file content is
//! ever moved: a segment is just its hash and an "available" answer. The
//! point is the coordination protocol, not the data transfer.
//!
//! # Table of contents
//!
//! - [Running the simulation](#running-the-simulation)
//! - [Configuration](#configuration)
//! - [Components](#components)
//!
//! # Running the simulation
//!
//! ```text
//! git clone https://github.com/swarm-sim/swarm-sim.git \
//!   && cd swarm-sim \
//!   && cargo run
//! ```
//!
//! With the default configuration the simulator runs three peers reading
//! their input from `./share/inputs/in{1,2,3}.txt` and writes every
//! downloaded file to `./storage/output/client{peer}_{file}`.
//!
//! # Configuration
//!
//! The configuration is loaded from `./share/default/config/swarm-sim.toml`,
//! or from the path in the `SWARM_SIM_CONFIG_TOML_PATH` env var. The whole
//! TOML document can also be passed inline in `SWARM_SIM_CONFIG_TOML`:
//!
//! ```text
//! SWARM_SIM_CONFIG_TOML=$(cat ./share/default/config/swarm-sim.toml) cargo run
//! ```
//!
//! Single options are overridden with env vars like
//! `SWARM_SIM_CONFIG_OVERRIDE_SWARM__PEERS=5`.
//!
//! # Components
//!
//! - `swarm-tracker-core`: the tracker registry and its control loop.
//! - `swarm-peer-core`: the peer state, the upload responder and the
//!   download driver.
//! - [`app`]: wires the tracker and the peers together for a run.
//! - [`bootstrap`]: configuration and logging setup.
pub mod app;
pub mod bootstrap;
