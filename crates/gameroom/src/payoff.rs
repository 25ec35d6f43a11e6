use super::*;
use dlm_core::*;

/// Fixed payoff matrix of the iterated dilemma.
///
/// | A         | B         | A | B |
/// |-----------|-----------|---|---|
/// | cooperate | cooperate | 5 | 5 |
/// | defect    | defect    | 0 | 0 |
/// | cooperate | defect    | 2 | 8 |
/// | defect    | cooperate | 8 | 2 |
pub struct Payoff;

impl Payoff {
    /// Points for seats (A, B) given their simultaneous choices.
    pub fn score(a: Choice, b: Choice) -> [Points; N] {
        match (a, b) {
            (Choice::Cooperate, Choice::Cooperate) => [REWARD, REWARD],
            (Choice::Defect, Choice::Defect) => [PUNISHMENT, PUNISHMENT],
            (Choice::Cooperate, Choice::Defect) => [SUCKER, TEMPTATION],
            (Choice::Defect, Choice::Cooperate) => [TEMPTATION, SUCKER],
        }
    }
}
