//! The `swarm-peer-core` crate contains the peer side of the swarm.
//!
//! A peer owns some files and wants some others. It downloads the files it
//! wants segment by segment from other peers, and at the same time serves
//! the segments it holds to anyone who asks.
//!
//! ```text
//!   Peer                                  |   Swarm
//! ----------------------------------------------------------------
//!   Download driver -> Tracker client     |-> tracker inbox
//!   Download driver -> Peer network       |-> other peers' upload inboxes
//!   Upload responder <- upload inbox      |<- other peers' download drivers
//!   Upload responder <- shutdown          |<- tracker
//! ```
//!
//! # Table of contents
//!
//! - [Input](#input)
//! - [State](#state)
//! - [Download driver](#download-driver)
//! - [Upload responder](#upload-responder)
//! - [Storage](#storage)
//!
//! # Input
//!
//! Each peer reads its owned and wanted files from a text file named after
//! its id, `in{id}.txt`:
//!
//! ```text
//! 2
//! file1 2
//! 9b1ae3d2c6a0f5e4d8b7c3a1f0e9d8c7
//! 5c4b3a2f1e0d9c8b7a6f5e4d3c2b1a09
//! file2 1
//! 0f1e2d3c4b5a69788796a5b4c3d2e1f0
//! 1
//! file3
//! ```
//!
//! Refer to the [`input`] module.
//!
//! # State
//!
//! The files the peer holds and the segments acquired of each one. It's
//! written by the download driver and read by the upload responder. Refer
//! to the [`state`] module.
//!
//! # Download driver
//!
//! It reports the owned files to the tracker, downloads the wanted files
//! one at a time and tells the tracker when it's done. Refer to the
//! [`download`] module.
//!
//! # Upload responder
//!
//! It answers segment requests until the tracker sends the shutdown signal.
//! Refer to the [`upload`] module.
//!
//! # Storage
//!
//! Every downloaded file is persisted as `client{id}_{filename}`, one
//! segment hash per line. Refer to the [`storage`] module.
pub mod download;
pub mod error;
pub mod input;
pub mod network;
pub mod peer;
pub mod setup;
pub mod state;
pub mod storage;
pub mod test_helpers;
pub mod tracker_client;
pub mod upload;
