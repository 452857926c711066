use std::io::BufRead;

use client_core::SessionCommand;
use tokio::sync::mpsc;

pub const HELP: &str = "enter a move as `row column` (1-based), `resign`, or `quit`";

/// Parses one line of user input. Coordinates are shown 1-based on screen
/// and sent 0-based.
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "resign" => return Some(SessionCommand::Resign),
        "quit" | "exit" => return Some(SessionCommand::Shutdown),
        _ => {}
    }

    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let row = parts.next()?.parse::<usize>().ok()?.checked_sub(1)?;
    let column = parts.next()?.parse::<usize>().ok()?.checked_sub(1)?;
    if parts.next().is_some() {
        return None;
    }
    Some(SessionCommand::Move { row, column })
}

/// Blocking stdin loop, run on its own thread so a pending read never holds
/// up runtime shutdown. End of input or a read error quits the session.
pub fn forward_lines(input: impl BufRead, commands: &mpsc::Sender<SessionCommand>) {
    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        let Some(command) = parse_command(&line) else {
            println!("{HELP}");
            continue;
        };
        let shutdown = command == SessionCommand::Shutdown;
        if commands.blocking_send(command).is_err() || shutdown {
            return;
        }
    }
    let _ = commands.blocking_send(SessionCommand::Shutdown);
}
