//! Session archive.
//!
//! Finished sessions are appended here exactly once, after the coordinator
//! has torn them down. Nothing on the gameplay hot path reads from it; the
//! hosting layer queries it for player standings and the leaderboard.
//!
//! ## Core Types
//!
//! - [`Tally`] — Final record of one finished session
//! - [`Entrant`] — One seat's identity and final score within a tally
//! - [`Standing`] — A participant's cumulative archive entry
//! - [`Session`] — Marker type for session identity
//!
//! ## Storage
//!
//! - [`Archive`] — Append/query trait the coordinator talks to
//! - [`Memory`] — In-process archive (default)
//! - `Postgres` support via `Arc<tokio_postgres::Client>` (requires `database` feature)
mod archive;
mod memory;
#[cfg(feature = "database")]
mod postgres;
mod session;
mod standing;
mod tally;

pub use archive::*;
pub use memory::*;
#[cfg(feature = "database")]
pub use postgres::*;
pub use session::*;
pub use standing::*;
pub use tally::*;
