//! Core type aliases, identifiers, and constants for the dilemma server.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the workspace.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Points awarded per round and accumulated per session.
pub type Points = i32;
/// Round counter within a session (1-based).
pub type Round = u32;
/// Seat index within a session (0 = first seated, 1 = second).
pub type Position = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for bots and tests.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

/// Opaque participant token.
/// Humans bring their own (embedded in the connection path);
/// simulated opponents are minted with a `bot_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Mints a fresh token for a simulated participant.
    pub fn bot() -> Self {
        Self(format!("{}{}", BOT_PREFIX, uuid::Uuid::new_v4()))
    }
    pub fn is_bot(&self) -> bool {
        self.0.starts_with(BOT_PREFIX)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of seats in a session.
pub const N: usize = 2;
/// Fewest rounds a session may be drawn to last.
pub const ROUNDS_MIN: Round = 5;
/// Most rounds a session may be drawn to last.
pub const ROUNDS_MAX: Round = 15;

/// Payoff when both cooperate.
pub const REWARD: Points = 5;
/// Payoff when both defect.
pub const PUNISHMENT: Points = 0;
/// Payoff to the lone defector.
pub const TEMPTATION: Points = 8;
/// Payoff to the lone cooperator.
pub const SUCKER: Points = 2;

// ============================================================================
// MATCHMAKING & BOT CADENCE
// ============================================================================
/// How long a waiting participant sits in the lobby before a bot is seated.
pub const WAIT_WINDOW: std::time::Duration = std::time::Duration::from_secs(5);
/// Shortest bot think time before submitting a choice.
pub const THINK_MIN: std::time::Duration = std::time::Duration::from_secs(1);
/// Longest bot think time before submitting a choice.
pub const THINK_MAX: std::time::Duration = std::time::Duration::from_secs(5);
/// Brief yield after each bot submission.
pub const THINK_PAUSE: std::time::Duration = std::time::Duration::from_millis(100);
/// Prefix marking simulated participant tokens.
pub const BOT_PREFIX: &str = "bot_";

// ============================================================================
// HOSTING
// ============================================================================
/// Number of standings returned by the leaderboard route.
pub const LEADERBOARD_SIZE: usize = 10;
/// actix-web worker threads.
pub const SERVER_WORKERS: usize = 4;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Live sessions are not persisted, so nothing is flushed on the way out.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, dropping all live sessions");
            std::process::exit(0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn bot_tokens_are_prefixed_and_unique() {
        let a = PlayerId::bot();
        let b = PlayerId::bot();
        assert!(a.is_bot());
        assert!(a.as_str().starts_with("bot_"));
        assert_ne!(a, b);
    }
    #[test]
    fn human_tokens_are_not_bots() {
        assert!(!PlayerId::from("k3j9x").is_bot());
    }
    #[test]
    fn player_id_serializes_as_plain_string() {
        let id = PlayerId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
    #[test]
    fn ids_cast_preserve_uuid() {
        struct A;
        struct B;
        let a = ID::<A>::default();
        let b: ID<B> = a.cast();
        assert_eq!(a.inner(), b.inner());
    }
}
