//! Board snapshots as the server ships them.
//!
//! The server stores boards as a JSON-encoded string of nested cell codes and
//! forwards that string verbatim inside updates, so a board on the wire is
//! usually a string holding an array. Bare arrays are accepted too.

use serde::{ser, Deserialize, Serialize, Serializer};

use crate::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    White,
    Black,
    Empty,
}

impl Cell {
    pub fn code(self) -> u8 {
        match self {
            Cell::White => 0,
            Cell::Black => 1,
            Cell::Empty => 2,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Cell::White),
            1 => Ok(Cell::Black),
            2 => Ok(Cell::Empty),
            other => Err(DecodeError::UnknownCell(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BoardWire")]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoardWire {
    Encoded(String),
    Grid(Vec<Vec<u8>>),
}

impl TryFrom<BoardWire> for Board {
    type Error = DecodeError;

    fn try_from(wire: BoardWire) -> Result<Self, Self::Error> {
        match wire {
            BoardWire::Encoded(raw) => Board::from_json(&raw),
            BoardWire::Grid(codes) => Board::from_codes(codes),
        }
    }
}

/// Boards go out the way the server sends them: as an encoded string.
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = self.to_json().map_err(ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl Board {
    /// Opening position: the four center squares alternate white/black.
    pub fn starting(size: usize) -> Self {
        let mut rows = vec![vec![Cell::Empty; size]; size];
        if size >= 2 {
            let mid = size / 2;
            rows[mid][mid] = Cell::White;
            rows[mid - 1][mid - 1] = Cell::White;
            rows[mid][mid - 1] = Cell::Black;
            rows[mid - 1][mid] = Cell::Black;
        }
        Self { rows }
    }

    pub fn from_json(raw: &str) -> Result<Self, DecodeError> {
        let codes: Vec<Vec<u8>> = serde_json::from_str(raw)?;
        Self::from_codes(codes)
    }

    pub fn from_codes(codes: Vec<Vec<u8>>) -> Result<Self, DecodeError> {
        let expected = codes.len();
        if expected == 0 {
            return Err(DecodeError::EmptyBoard);
        }
        let mut rows = Vec::with_capacity(expected);
        for (row, line) in codes.into_iter().enumerate() {
            if line.len() != expected {
                return Err(DecodeError::NotSquare {
                    row,
                    len: line.len(),
                    expected,
                });
            }
            let cells = line
                .into_iter()
                .map(Cell::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
        Ok(Self { rows })
    }

    pub fn codes(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    pub fn to_json(&self) -> Result<String, DecodeError> {
        Ok(serde_json::to_string(&self.codes())?)
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.rows.get(row)?.get(column).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|candidate| **candidate == cell)
            .count()
    }
}
