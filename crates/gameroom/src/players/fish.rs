use crate::*;
use dlm_core::Arbitrary;

/// CPU player that cooperates or defects with equal probability.
pub struct Fish;

#[async_trait::async_trait]
impl Player for Fish {
    async fn decide(&mut self) -> Choice {
        Choice::random()
    }
}
