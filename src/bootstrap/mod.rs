//! Setup for the application.
//!
//! It loads the configuration and initializes the logging. Both happen once,
//! before the swarm is built.
pub mod app;
pub mod config;
pub mod logging;
