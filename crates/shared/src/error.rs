use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid board json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board has no rows")]
    EmptyBoard,
    #[error("board is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown cell code {0}")]
    UnknownCell(u8),
}
