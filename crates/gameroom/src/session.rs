use super::*;
use dlm_core::*;
use dlm_records::Entrant;
use dlm_records::Tally;

/// One matched pair's iterated game.
///
/// Pure state machine: the coordinator wraps each session in its own
/// mutex, so every method here runs with exclusive access. Seat order is
/// fixed at creation and decides which side is A and which is B in the
/// payoff matrix.
#[derive(Debug)]
pub struct Session {
    id: ID<Self>,
    seats: [Seat; N],
    round: Round,
    total: Round,
    score: [Points; N],
    pending: [Option<Choice>; N],
    active: bool,
}

impl Session {
    pub fn new(seats: [Seat; N], total: Round) -> Self {
        Self {
            id: ID::default(),
            seats,
            round: 1,
            total,
            score: [0; N],
            pending: [None; N],
            active: true,
        }
    }
    pub fn seats(&self) -> &[Seat; N] {
        &self.seats
    }
    pub fn seat(&self, pos: Position) -> &Seat {
        &self.seats[pos]
    }
    pub fn position(&self, player: &PlayerId) -> Option<Position> {
        self.seats.iter().position(|s| s.player() == player)
    }
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn total(&self) -> Round {
        self.total
    }
    pub fn score(&self, pos: Position) -> Points {
        self.score[pos]
    }
    /// Choices recorded so far this round.
    pub fn pending(&self) -> usize {
        self.pending.iter().flatten().count()
    }
    /// Accepting choices: not closed and rounds remain.
    pub fn is_live(&self) -> bool {
        self.active && self.round <= self.total
    }
    pub fn is_over(&self) -> bool {
        self.round > self.total
    }
}

impl Session {
    /// Records a choice for this round, replacing any earlier one from the
    /// same seat. Resolves the round once both seats have chosen.
    pub fn choose(&mut self, pos: Position, choice: Choice) -> Option<Resolution> {
        self.pending[pos] = Some(choice);
        match self.pending {
            [Some(a), Some(b)] => Some(self.resolve([a, b])),
            _ => None,
        }
    }
    fn resolve(&mut self, choices: [Choice; N]) -> Resolution {
        let points = Payoff::score(choices[0], choices[1]);
        self.score[0] += points[0];
        self.score[1] += points[1];
        self.round += 1;
        self.pending = [None; N];
        Resolution {
            game: self.id,
            round: self.round,
            choices,
            points,
            totals: self.score,
            over: self.is_over(),
        }
    }
    /// Marks the session inactive and produces its final tally.
    pub fn close(&mut self) -> Tally {
        self.active = false;
        let entrant = |pos: Position| {
            Entrant::new(
                self.seats[pos].player().clone(),
                self.seats[pos].name().to_string(),
                self.seats[pos].is_bot(),
                self.score[pos],
            )
        };
        Tally::new(
            self.id.cast(),
            self.round.saturating_sub(1),
            [entrant(0), entrant(1)],
        )
    }
}

impl Session {
    /// `game_start` as seen from `pos`.
    pub fn start(&self, pos: Position) -> ServerMessage {
        ServerMessage::game_start(self.id, self.seat(1 - pos).name(), self.total)
    }
    /// `game_end` as seen from `pos`.
    pub fn summary(&self, pos: Position) -> ServerMessage {
        ServerMessage::game_end(self.id, self.score[pos], self.score[1 - pos])
    }
}

impl Unique for Session {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// Outcome of one resolved round, in seat order.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    game: ID<Session>,
    round: Round,
    choices: [Choice; N],
    points: [Points; N],
    totals: [Points; N],
    over: bool,
}

impl Resolution {
    /// Round counter after advancing.
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn points(&self) -> [Points; N] {
        self.points
    }
    pub fn totals(&self) -> [Points; N] {
        self.totals
    }
    /// True when this was the final round.
    pub fn is_over(&self) -> bool {
        self.over
    }
    /// `round_result` as seen from `pos`.
    pub fn report(&self, pos: Position) -> ServerMessage {
        let opp = 1 - pos;
        ServerMessage::RoundResult {
            game_id: self.game.to_string(),
            round_number: self.round,
            player_choice: self.choices[pos],
            opponent_choice: self.choices[opp],
            points: self.points[pos],
            total_points: self.totals[pos],
            opponent_points: self.totals[opp],
        }
    }
}
