use shared::{
    domain::{GameId, PlayerId},
    protocol::{MoveRequest, SessionRequest},
};

/// Identifiers of the game being played plus the local guess at whose turn
/// it is. The server holds the authoritative turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub our_turn: bool,
}

impl Session {
    pub fn new(game_id: GameId, player_id: PlayerId) -> Self {
        Self {
            game_id,
            player_id,
            our_turn: true,
        }
    }

    pub fn request(&self) -> SessionRequest {
        SessionRequest {
            game_id: self.game_id,
            player_id: self.player_id.clone(),
        }
    }

    pub fn move_request(&self, row: usize, column: usize) -> MoveRequest {
        MoveRequest {
            row,
            column,
            game_id: self.game_id,
            player_id: self.player_id.clone(),
        }
    }
}
