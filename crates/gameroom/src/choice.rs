use super::*;
use dlm_core::Arbitrary;
use rand::Rng;
use serde::Serialize;

/// One of the two moves available each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Cooperate,
    Defect,
}

impl Choice {
    pub const ALL: [Self; 2] = [Self::Cooperate, Self::Defect];
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cooperate => "cooperate",
            Self::Defect => "defect",
        }
    }
}

impl TryFrom<&str> for Choice {
    type Error = ProtocolError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "cooperate" => Ok(Self::Cooperate),
            "defect" => Ok(Self::Defect),
            _ => Err(ProtocolError::InvalidChoice(s.to_string())),
        }
    }
}

impl Arbitrary for Choice {
    fn random() -> Self {
        match rand::rng().random_bool(0.5) {
            true => Self::Cooperate,
            false => Self::Defect,
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
