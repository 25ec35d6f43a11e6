use super::*;
use dlm_core::*;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Handle to a running bot task. Dropping it, or calling [`Agent::stop`],
/// ends the task at its next suspension point.
#[derive(Debug)]
pub struct Agent {
    stop: oneshot::Sender<()>,
}

impl Agent {
    /// Spawns a bot that plays `seat` through the coordinator's submit path.
    pub fn spawn(coordinator: Arc<Coordinator>, seat: PlayerId, player: Box<dyn Player>) -> Self {
        let (stop, halt) = oneshot::channel();
        let actor = Actor {
            seat,
            timing: *coordinator.timing(),
            coordinator,
            player,
            halt,
        };
        tokio::spawn(actor.run());
        Self { stop }
    }
    pub fn stop(self) {
        let _ = self.stop.send(());
    }
}

/// Bot loop: think, submit, yield, repeat until stopped or unseated.
struct Actor {
    seat: PlayerId,
    timing: Timing,
    coordinator: Arc<Coordinator>,
    player: Box<dyn Player>,
    halt: oneshot::Receiver<()>,
}

impl Actor {
    async fn run(mut self) {
        log::debug!("[agent {}] started", self.seat);
        loop {
            if !self.pause(self.timing.think()).await {
                break;
            }
            let choice = self.player.decide().await;
            log::trace!("[agent {}] submitting {}", self.seat, choice);
            if let Err(e) = self.coordinator.submit(&self.seat, choice.as_str()).await {
                log::debug!("[agent {}] {}, leaving", self.seat, e);
                break;
            }
            if !self.pause(self.timing.pause).await {
                break;
            }
        }
        log::debug!("[agent {}] stopped", self.seat);
    }
    /// Sleeps unless halted first. Returns false once halted.
    async fn pause(&mut self, duration: std::time::Duration) -> bool {
        tokio::select! {
            biased;
            _ = &mut self.halt => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }
}
