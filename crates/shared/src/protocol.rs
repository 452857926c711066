use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    domain::{GameId, LobbyId, PlayerId},
};

/// Outcome of a move or any other state change, delivered either as the
/// response to `POST /move` or over the push channel.
///
/// Everything except `error`, `message` and `ourTurn` is optional so that
/// partial updates leave the matching displays untouched. A missing
/// `ourTurn` reads as "not our turn".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerUpdate {
    #[serde(default)]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Board>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitescore: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blackscore: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ourmove: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theirmove: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "ourTurn", default)]
    pub our_turn: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub done: bool,
}

impl ServerUpdate {
    pub fn rejected(message: impl Into<String>, our_turn: bool) -> Self {
        Self {
            error: true,
            message: message.into(),
            our_turn,
            ..Self::default()
        }
    }
}

/// Body of `/resign` and `/startgame`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    #[serde(rename = "gameID")]
    pub game_id: GameId,
    #[serde(rename = "playerID")]
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub row: usize,
    pub column: usize,
    #[serde(rename = "gameID")]
    pub game_id: GameId,
    #[serde(rename = "playerID")]
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResignResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinGameRequest {
    pub lobby: LobbyId,
}

/// Neither flag set means the join was accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinGameResponse {
    #[serde(default, alias = "ownlobby")]
    pub owngame: bool,
    #[serde(default)]
    pub gone: bool,
}
