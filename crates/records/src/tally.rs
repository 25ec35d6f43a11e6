use super::*;
use dlm_core::*;

/// One seat of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrant {
    player: PlayerId,
    name: String,
    bot: bool,
    points: Points,
}

impl Entrant {
    pub fn new(player: PlayerId, name: String, bot: bool, points: Points) -> Self {
        Self {
            player,
            name,
            bot,
            points,
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
    pub fn points(&self) -> Points {
        self.points
    }
}

/// Final tally of a finished session, in seat order.
#[derive(Debug, Clone)]
pub struct Tally {
    id: ID<Session>,
    rounds: Round,
    entrants: [Entrant; N],
}

impl Tally {
    pub fn new(id: ID<Session>, rounds: Round, entrants: [Entrant; N]) -> Self {
        Self {
            id,
            rounds,
            entrants,
        }
    }
    /// Rounds that were played to completion.
    pub fn rounds(&self) -> Round {
        self.rounds
    }
    pub fn entrants(&self) -> &[Entrant; N] {
        &self.entrants
    }
    /// Seats that should be credited in standings.
    pub fn humans(&self) -> impl Iterator<Item = &Entrant> {
        self.entrants.iter().filter(|e| !e.is_bot())
    }
}

impl Unique for Tally {
    fn id(&self) -> ID<Self> {
        self.id.cast()
    }
}
