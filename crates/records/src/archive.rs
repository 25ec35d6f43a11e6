use super::*;
use dlm_core::*;

/// Append/query surface for finished sessions.
///
/// The coordinator calls [`Archive::record`] once per terminated session;
/// the hosting layer reads standings back out. Implementations own their
/// own synchronization.
#[async_trait::async_trait]
pub trait Archive: Send + Sync {
    /// Appends the final tally of a session and credits its human seats.
    async fn record(&self, tally: &Tally) -> anyhow::Result<()>;
    /// All known standings.
    async fn players(&self) -> anyhow::Result<Vec<Standing>>;
    /// One standing by participant id.
    async fn player(&self, id: &PlayerId) -> anyhow::Result<Option<Standing>>;
    /// Top `n` standings by cumulative points.
    async fn leaderboard(&self, n: usize) -> anyhow::Result<Vec<Standing>>;
}
