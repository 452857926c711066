use std::io::{self, Write};

use client_core::{Field, Renderer};
use shared::board::{Board, Cell};

/// Draws to stdout; alerts go to stderr.
pub struct TerminalRenderer<W: Write + Send = io::Stdout> {
    out: W,
}

impl TerminalRenderer {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn glyph(cell: Cell) -> char {
    match cell {
        Cell::White => 'O',
        Cell::Black => 'X',
        Cell::Empty => '.',
    }
}

pub fn board_lines(board: &Board) -> Vec<String> {
    let header: String = (1..=board.size()).map(|column| format!(" {column}")).collect();
    let mut lines = vec![format!("  {header}")];
    for (index, row) in board.rows().enumerate() {
        let cells: String = row.iter().map(|cell| format!(" {}", glyph(*cell))).collect();
        lines.push(format!("{:>2}{cells}", index + 1));
    }
    lines
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn draw_board(&mut self, board: &Board) {
        for line in board_lines(board) {
            let _ = writeln!(self.out, "{line}");
        }
    }

    fn set_text(&mut self, field: Field, text: &str) {
        let _ = match field {
            Field::Status => writeln!(self.out, ">> {text}"),
            _ => writeln!(self.out, "   {text}"),
        };
    }

    fn alert(&mut self, message: &str) {
        eprintln!("!! {message}");
    }

    fn navigate(&mut self, location: &str) {
        let _ = writeln!(self.out, "-> {location}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_numbered_grid() {
        assert_eq!(
            board_lines(&Board::starting(4)),
            vec![
                "   1 2 3 4",
                " 1 . . . .",
                " 2 . O X .",
                " 3 . X O .",
                " 4 . . . .",
            ]
        );
    }

    #[test]
    fn status_lines_are_marked() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.set_text(Field::Status, "Your Turn");
        renderer.set_text(Field::WhiteScore, "White Score: 2");
        let out = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert_eq!(out, ">> Your Turn\n   White Score: 2\n");
    }
}
