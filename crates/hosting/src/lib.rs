//! WebSocket and HTTP hosting for live sessions.
//!
//! ## Components
//!
//! - [`Server`] — actix-web server wiring routes onto a shared [`Coordinator`]
//! - [`bridge`] — Per-connection task between a WebSocket and the coordinator
//! - [`handlers`] — HTTP route handlers
//!
//! [`Coordinator`]: dlm_gameroom::Coordinator
mod bridge;
mod server;

pub mod handlers;

pub use bridge::*;
pub use server::*;

use dlm_records::Archive;
use std::sync::Arc;

/// Archive backing the deployment: PostgreSQL with `database`, otherwise in-process.
#[cfg(feature = "database")]
pub async fn archive() -> anyhow::Result<Arc<dyn Archive>> {
    Ok(Arc::new(dlm_records::db().await?))
}

/// Archive backing the deployment: PostgreSQL with `database`, otherwise in-process.
#[cfg(not(feature = "database"))]
pub async fn archive() -> anyhow::Result<Arc<dyn Archive>> {
    log::warn!("[archive] database feature disabled, standings kept in memory");
    Ok(Arc::new(dlm_records::Memory::default()))
}
