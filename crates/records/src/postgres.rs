use super::*;
use dlm_core::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Table for per-participant cumulative standings.
#[rustfmt::skip]
pub const PLAYERS:  &str = "players";
/// Table for finished session tallies.
#[rustfmt::skip]
pub const SESSIONS: &str = "sessions";

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Establishes a database connection and creates missing tables.
///
/// Connects to PostgreSQL using the `DB_URL` environment variable.
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
pub async fn db() -> anyhow::Result<Arc<Client>> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let ref url = std::env::var("DB_URL").map_err(|_| anyhow::anyhow!("DB_URL must be set"))?;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("[archive] connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    client.batch_execute(CREATES).await?;
    Ok(Arc::new(client))
}

const CREATES: &str = const_format::concatcp!(
    "CREATE TABLE IF NOT EXISTS ",
    PLAYERS,
    " (
        id            TEXT PRIMARY KEY,
        username      TEXT NOT NULL,
        total_points  INTEGER NOT NULL DEFAULT 0,
        games_played  INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE IF NOT EXISTS ",
    SESSIONS,
    " (
        id            UUID PRIMARY KEY,
        rounds        INTEGER NOT NULL,
        player_a      TEXT NOT NULL,
        player_b      TEXT NOT NULL,
        points_a      INTEGER NOT NULL,
        points_b      INTEGER NOT NULL,
        ended_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    );
    CREATE INDEX IF NOT EXISTS idx_players_points ON ",
    PLAYERS,
    " (total_points DESC);"
);

/// Appends a session row and credits its human seats in one statement,
/// so either both land or neither does.
const RECORD: &str = const_format::concatcp!(
    "WITH tally AS (
        INSERT INTO ",
    SESSIONS,
    " (id, rounds, player_a, player_b, points_a, points_b)
        VALUES ($1, $2, $3, $4, $5, $6)
    )
    INSERT INTO ",
    PLAYERS,
    " (id, username, total_points, games_played)
    SELECT id, username, points, 1
    FROM UNNEST($7::TEXT[], $8::TEXT[], $9::INTEGER[]) AS humans (id, username, points)
    ON CONFLICT (id) DO UPDATE SET
        username     = EXCLUDED.username,
        total_points = ",
    PLAYERS,
    ".total_points + EXCLUDED.total_points,
        games_played = ",
    PLAYERS,
    ".games_played + 1"
);

fn standing(row: &tokio_postgres::Row) -> Standing {
    Standing {
        id: PlayerId::from(row.get::<_, String>(0)),
        username: row.get::<_, String>(1),
        total_points: row.get::<_, i32>(2),
        games_played: row.get::<_, i32>(3) as u32,
    }
}

#[async_trait::async_trait]
impl Archive for Arc<Client> {
    async fn record(&self, tally: &Tally) -> anyhow::Result<()> {
        let [a, b] = tally.entrants();
        let ids = tally.humans().map(|e| e.player().as_str()).collect::<Vec<_>>();
        let names = tally.humans().map(|e| e.name()).collect::<Vec<_>>();
        let points = tally.humans().map(|e| e.points()).collect::<Vec<_>>();
        self.execute(
            RECORD,
            &[
                &tally.id().inner(),
                &(tally.rounds() as i32),
                &a.player().as_str(),
                &b.player().as_str(),
                &a.points(),
                &b.points(),
                &ids,
                &names,
                &points,
            ],
        )
        .await?;
        log::debug!("[archive] recorded session {}", tally.id());
        Ok(())
    }
    async fn players(&self) -> anyhow::Result<Vec<Standing>> {
        Ok(self
            .query(
                const_format::concatcp!(
                    "SELECT id, username, total_points, games_played FROM ",
                    PLAYERS,
                    " ORDER BY id"
                ),
                &[],
            )
            .await?
            .iter()
            .map(standing)
            .collect())
    }
    async fn player(&self, id: &PlayerId) -> anyhow::Result<Option<Standing>> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT id, username, total_points, games_played FROM ",
                    PLAYERS,
                    " WHERE id = $1"
                ),
                &[&id.as_str()],
            )
            .await?
            .as_ref()
            .map(standing))
    }
    async fn leaderboard(&self, n: usize) -> anyhow::Result<Vec<Standing>> {
        Ok(self
            .query(
                const_format::concatcp!(
                    "SELECT id, username, total_points, games_played FROM ",
                    PLAYERS,
                    " ORDER BY total_points DESC LIMIT $1"
                ),
                &[&(n as i64)],
            )
            .await?
            .iter()
            .map(standing)
            .collect())
    }
}
