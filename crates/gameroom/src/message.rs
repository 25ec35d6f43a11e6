use super::*;
use dlm_core::*;
use serde::Serialize;

/// Messages sent from server to client over WebSocket.
/// Every per-session message carries the session id and is written
/// from the recipient's own perspective.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Queued in the lobby.
    Waiting { message: String },
    /// Matched and seated.
    GameStart {
        game_id: String,
        opponent: String,
        total_rounds: Round,
    },
    /// A round resolved.
    RoundResult {
        game_id: String,
        round_number: Round,
        player_choice: Choice,
        opponent_choice: Choice,
        points: Points,
        total_points: Points,
        opponent_points: Points,
    },
    /// Final round reported, session torn down.
    GameEnd {
        game_id: String,
        final_score: FinalScore,
    },
    /// Something the recipient sent was rejected.
    Error { message: String },
}

/// Final score from the recipient's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FinalScore {
    pub player: Points,
    pub opponent: Points,
}

impl ServerMessage {
    pub fn waiting() -> Self {
        Self::Waiting {
            message: "Waiting for opponent...".to_string(),
        }
    }
    pub fn game_start(game: ID<Session>, opponent: &str, total_rounds: Round) -> Self {
        Self::GameStart {
            game_id: game.to_string(),
            opponent: opponent.to_string(),
            total_rounds,
        }
    }
    pub fn game_end(game: ID<Session>, player: Points, opponent: Points) -> Self {
        Self::GameEnd {
            game_id: game.to_string(),
            final_score: FinalScore { player, opponent },
        }
    }
    pub fn error(e: &ProtocolError) -> Self {
        Self::Error {
            message: e.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn waiting_wire_shape() {
        let json: serde_json::Value = serde_json::from_str(&ServerMessage::waiting().to_json()).unwrap();
        assert_eq!(json["type"], "waiting");
        assert_eq!(json["message"], "Waiting for opponent...");
    }
    #[test]
    fn round_result_wire_shape() {
        let msg = ServerMessage::RoundResult {
            game_id: "g".into(),
            round_number: 2,
            player_choice: Choice::Cooperate,
            opponent_choice: Choice::Defect,
            points: 2,
            total_points: 2,
            opponent_points: 8,
        };
        let json: serde_json::Value = serde_json::from_str(&msg.to_json()).unwrap();
        assert_eq!(json["type"], "round_result");
        assert_eq!(json["player_choice"], "cooperate");
        assert_eq!(json["opponent_choice"], "defect");
        assert_eq!(json["opponent_points"], 8);
    }
    #[test]
    fn game_end_wire_shape() {
        let game = ID::default();
        let json: serde_json::Value =
            serde_json::from_str(&ServerMessage::game_end(game, 12, 30).to_json()).unwrap();
        assert_eq!(json["type"], "game_end");
        assert_eq!(json["game_id"], game.to_string());
        assert_eq!(json["final_score"]["player"], 12);
        assert_eq!(json["final_score"]["opponent"], 30);
    }
    #[test]
    fn error_uses_display_text() {
        let json: serde_json::Value =
            serde_json::from_str(&ServerMessage::error(&ProtocolError::NoActiveGame).to_json()).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "No active game found");
    }
}
