//! Async runtime for live iterated-dilemma sessions.
//!
//! This crate pairs participants into two-seat sessions, resolves rounds
//! under the payoff matrix, and drives simulated opponents, all through
//! per-connection message channels.
//!
//! ## Architecture
//!
//! - [`Coordinator`] — Owns live sessions, the lobby, and the registry
//! - [`Session`] — Per-game state machine: seats, pending choices, scores
//! - [`Lobby`] — Participants waiting out their wait window
//! - [`Registry`] — Outbound channel per connected participant
//! - [`Agent`] — Async task playing a bot seat through the coordinator
//!
//! ## Wire
//!
//! - [`Protocol`] — Decodes inbound JSON frames into [`Command`]s
//! - [`ServerMessage`] — Outbound JSON frames
//!
//! ## Submodules
//!
//! - [`players`] — Concrete bot strategies
mod actor;
mod choice;
mod coordinator;
mod lobby;
mod message;
mod payoff;
mod player;
mod protocol;
mod registry;
mod seat;
mod session;
mod timer;

pub mod players;

pub use actor::*;
pub use choice::*;
pub use coordinator::*;
pub use lobby::*;
pub use message::*;
pub use payoff::*;
pub use player::*;
pub use players::*;
pub use protocol::*;
pub use registry::*;
pub use seat::*;
pub use session::*;
pub use timer::*;
