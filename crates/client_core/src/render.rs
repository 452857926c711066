//! The drawing surface the controller pushes state into.

use shared::board::Board;

/// Text displays next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WhiteScore,
    BlackScore,
    OurMove,
    TheirMove,
    Opponent,
    Status,
}

pub trait Renderer: Send {
    fn draw_board(&mut self, board: &Board);
    fn set_text(&mut self, field: Field, text: &str);
    /// Blocking, user-facing error. Only the lobby-join flow uses this; game
    /// errors go to the status line.
    fn alert(&mut self, message: &str);
    fn navigate(&mut self, location: &str);
}

pub fn white_score_text(score: u32) -> String {
    format!("White Score: {score}")
}

pub fn black_score_text(score: u32) -> String {
    format!("Black Score: {score}")
}

pub fn our_move_text(description: &str) -> String {
    format!("Your Last Move: {description}")
}

pub fn their_move_text(description: &str) -> String {
    format!("Opponent's Last Move: {description}")
}

pub fn opponent_text(name: &str) -> String {
    format!("Opponent: {name}")
}
