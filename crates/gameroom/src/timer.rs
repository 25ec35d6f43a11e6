use dlm_core::*;
use rand::Rng;
use std::time::Duration;

/// Delays and ranges that drive matchmaking and bot cadence.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Lobby wait window before a bot is seated.
    pub wait: Duration,
    /// Bot think time bounds, sampled uniformly.
    pub think_min: Duration,
    pub think_max: Duration,
    /// Bot yield after each submission.
    pub pause: Duration,
    /// Session length bounds, sampled uniformly and inclusive.
    pub rounds_min: Round,
    pub rounds_max: Round,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            wait: WAIT_WINDOW,
            think_min: THINK_MIN,
            think_max: THINK_MAX,
            pause: THINK_PAUSE,
            rounds_min: ROUNDS_MIN,
            rounds_max: ROUNDS_MAX,
        }
    }
}

impl Timing {
    /// Fixes every session to exactly `n` rounds.
    pub fn with_rounds(self, n: Round) -> Self {
        Self {
            rounds_min: n,
            rounds_max: n,
            ..self
        }
    }
    /// Draws a session length.
    pub fn rounds(&self) -> Round {
        rand::rng().random_range(self.rounds_min..=self.rounds_max)
    }
    /// Draws a bot think time.
    pub fn think(&self) -> Duration {
        let lo = self.think_min.as_millis() as u64;
        let hi = self.think_max.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}
