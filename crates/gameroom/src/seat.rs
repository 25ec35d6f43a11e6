use dlm_core::*;
use rand::Rng;

/// One side of a session: who sits there and what they are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    player: PlayerId,
    name: String,
    bot: bool,
}

impl Seat {
    /// A participant with a live connection.
    pub fn human(player: PlayerId, name: String) -> Self {
        Self {
            player,
            name,
            bot: false,
        }
    }
    /// A simulated opponent with a fresh token and a generated name.
    pub fn bot() -> Self {
        Self {
            player: PlayerId::bot(),
            name: format!("Bot_{}", rand::rng().random_range(1000..=9999)),
            bot: true,
        }
    }
    pub fn player(&self) -> &PlayerId {
        &self.player
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_bot(&self) -> bool {
        self.bot
    }
}
