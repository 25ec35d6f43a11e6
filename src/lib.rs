//! Live iterated prisoner's dilemma server.
//!
//! This facade crate re-exports the dlm crates for convenient access.
//!
//! ## Crate Organization
//!
//! - [`core`] — Identifiers, type aliases, constants, logging setup
//! - [`records`] — Session tallies, standings, and archives
//! - [`gameroom`] — Session coordinator, lobby, and bot agents
//! - [`hosting`] — WebSocket and HTTP server

pub use dlm_core     as core;
pub use dlm_records  as records;
pub use dlm_gameroom as gameroom;
pub use dlm_hosting  as hosting;
