use dlm_core::*;
use serde::Serialize;

/// A participant's cumulative results across finished sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub id: PlayerId,
    pub username: String,
    pub total_points: Points,
    pub games_played: u32,
}

impl Standing {
    pub fn new(id: PlayerId, username: String) -> Self {
        Self {
            id,
            username,
            total_points: 0,
            games_played: 0,
        }
    }
    /// Folds one finished session into the running totals.
    /// The latest display name wins.
    pub fn credit(&mut self, username: &str, points: Points) {
        self.username = username.to_string();
        self.total_points += points;
        self.games_played += 1;
    }
}
