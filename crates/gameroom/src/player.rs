use super::*;

/// Strategy behind a simulated seat.
///
/// A bot has no privileged view of the session. Its choice goes through
/// the same submit path a connected participant uses.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Picks a move for the next submission.
    async fn decide(&mut self) -> Choice;
}
