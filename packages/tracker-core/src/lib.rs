//! The core `swarm-tracker-core` crate contains the swarm tracker logic,
//! independent of the transport that carries the requests.
//!
//! It contains the tracker services and the control loop that runs them.
//! Peers talk to the tracker by sending [`TrackerRequest`](swarm_sim_protocol::TrackerRequest)s
//! to its inbox.
//!
//! ```text
//!   Peers             |   Tracker core
//! ------------------------------------------------------
//!   Download driver   |-> inbox -> Coordinator -> Handlers -> Registry
//!   Upload responder  |<- shutdown broadcast
//! ```
//!
//! # Table of contents
//!
//! - [Introduction](#introduction)
//! - [Configuration](#configuration)
//! - [Bootstrap handler](#bootstrap-handler)
//! - [Announce handler](#announce-handler)
//! - [Scrape handler](#scrape-handler)
//! - [Swarm](#swarm)
//! - [Termination](#termination)
//! - [Statistics](#statistics)
//!
//! # Introduction
//!
//! The tracker keeps the registry of every file in the swarm: its canonical
//! segment hashes and the peers able to serve it (the seeds). It doesn't
//! store or move segments. Peers fetch segments directly from each other.
//!
//! It has three main responsibilities:
//!
//! - To build the registry from the files every peer owns when it joins.
//! - To tell downloading peers the segments and the seeds of a file.
//! - To detect when every peer is done and shut the swarm down.
//!
//! # Configuration
//!
//! The only tracker setting is the inbox capacity:
//!
//! ```toml
//! [tracker]
//! inbox_capacity = 64
//! ```
//!
//! Refer to the `swarm-sim-configuration` crate docs for the rest of the
//! settings.
//!
//! # Bootstrap handler
//!
//! It registers the files reported by each peer. Refer to the
//! [`bootstrap_handler`] module.
//!
//! # Announce handler
//!
//! It answers `WantFile` requests and records completed files. Refer to the
//! [`announce_handler`] module.
//!
//! # Scrape handler
//!
//! It answers `SwarmRefresh` requests and returns the metadata of every
//! swarm. Refer to the [`scrape_handler`] module.
//!
//! # Swarm
//!
//! The in-memory registry. Refer to the [`swarm`] module.
//!
//! # Termination
//!
//! The run terminates when every peer of the population has sent `AllDone`.
//! The [`coordinator`] then sends the shutdown signal to every peer exactly
//! once, through the [`shutdown`] broadcast. Refer to the [`termination`]
//! module.
//!
//! # Statistics
//!
//! The tracker counts the requests it handles. Refer to the [`statistics`]
//! module.
pub mod announce_handler;
pub mod bootstrap_handler;
pub mod container;
pub mod coordinator;
pub mod error;
pub mod scrape_handler;
pub mod setup;
pub mod shutdown;
pub mod statistics;
pub mod swarm;
pub mod termination;

pub mod test_helpers;
