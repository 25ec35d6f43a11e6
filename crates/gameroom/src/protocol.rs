use super::*;
use serde::Deserialize;
use serde_json::Value;

/// Errors reported back to the participant that caused them.
/// Display renders the exact text sent in the `error` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    Malformed(String),
    UnknownType(String),
    MissingUsername,
    InvalidChoice(String),
    NoActiveGame,
    AlreadySeated,
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(_) => write!(f, "Invalid message"),
            Self::UnknownType(_) => write!(f, "Invalid message type"),
            Self::MissingUsername => write!(f, "Missing username"),
            Self::InvalidChoice(_) => write!(f, "Invalid choice"),
            Self::NoActiveGame => write!(f, "No active game found"),
            Self::AlreadySeated => write!(f, "Already in a game"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Inbound commands, decoded once at the connection boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join { username: String },
    Choose(Choice),
}

/// Loose view of an inbound frame so that unknown types and bad
/// choice tokens can be told apart from unparseable JSON. Fields stay
/// untyped so a wrong JSON type lands in the matching error.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type", default)]
    kind: Value,
    #[serde(default)]
    username: Value,
    #[serde(default)]
    choice: Value,
}

/// Parses client frames into commands.
pub struct Protocol;

impl Protocol {
    pub fn decode(s: &str) -> Result<Command, ProtocolError> {
        let envelope = serde_json::from_str::<Envelope>(s)
            .map_err(|e| ProtocolError::Malformed(e.to_string()))?;
        match envelope.kind.as_str() {
            Some("join_game") => envelope
                .username
                .as_str()
                .map(|username| Command::Join {
                    username: username.to_string(),
                })
                .ok_or(ProtocolError::MissingUsername),
            Some("make_choice") => match envelope.choice.as_str() {
                Some(token) => Choice::try_from(token).map(Command::Choose),
                None => Err(ProtocolError::InvalidChoice(envelope.choice.to_string())),
            },
            _ => Err(ProtocolError::UnknownType(envelope.kind.to_string())),
        }
    }
}
