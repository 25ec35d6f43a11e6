use super::*;
use dlm_core::*;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process archive. Lost on restart, same as live sessions.
#[derive(Debug, Default)]
pub struct Memory {
    standings: RwLock<HashMap<PlayerId, Standing>>,
}

#[async_trait::async_trait]
impl Archive for Memory {
    async fn record(&self, tally: &Tally) -> anyhow::Result<()> {
        let mut standings = self.standings.write().await;
        for entrant in tally.humans() {
            standings
                .entry(entrant.player().clone())
                .or_insert_with(|| Standing::new(entrant.player().clone(), entrant.name().into()))
                .credit(entrant.name(), entrant.points());
        }
        log::debug!("[archive] recorded session {}", tally.id());
        Ok(())
    }
    async fn players(&self) -> anyhow::Result<Vec<Standing>> {
        let mut all = self
            .standings
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<_>>();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
    async fn player(&self, id: &PlayerId) -> anyhow::Result<Option<Standing>> {
        Ok(self.standings.read().await.get(id).cloned())
    }
    async fn leaderboard(&self, n: usize) -> anyhow::Result<Vec<Standing>> {
        let mut all = self.players().await?;
        all.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        all.truncate(n);
        Ok(all)
    }
}
