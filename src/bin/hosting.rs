//! hosting Server Binary
//!
//! Runs the HTTP server for live dilemma sessions.
//! Participants connect over WebSocket at `/ws/{player_id}`.

use dilemma::gameroom::Coordinator;
use dilemma::gameroom::Timing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dilemma::core::log();
    dilemma::core::kys();
    let archive = dilemma::hosting::archive().await?;
    let coordinator = Arc::new(Coordinator::new(archive, Timing::default()));
    dilemma::hosting::Server::run(coordinator).await?;
    Ok(())
}
