//! Interactive command-line session for exploring positions: FEN strings
//! in, legal moves and board dumps out.

use std::io::{self, BufRead, Write};

use itertools::Itertools;
use tabia::chess::position::Position;

/// One interactive session. It owns the current position: there is no
/// state outside this value, so a caller can run any number of sessions
/// side by side.
struct Session {
    position: Position,
}

impl Session {
    fn new() -> Self {
        Self {
            position: Position::starting(),
        }
    }

    // Interprets one command line. Returns false when the session ends.
    fn handle(&mut self, line: &str, output: &mut impl Write) -> io::Result<bool> {
        if line == "quit" {
            return Ok(false);
        }
        if let Some(fen) = line.strip_prefix("position ") {
            match Position::try_from(fen) {
                Ok(position) => self.position = position,
                Err(error) => writeln!(output, "error: {error:#}")?,
            }
        } else if line == "moves" {
            let moves = self.position.generate_moves();
            writeln!(
                output,
                "{}",
                moves.iter().map(ToString::to_string).sorted().join(" ")
            )?;
        } else if let Some(notation) = line.strip_prefix("move ") {
            // Externally-sourced notation is trusted only after it shows up
            // in a fresh enumeration.
            let chosen = self
                .position
                .generate_moves()
                .into_iter()
                .find(|candidate| candidate.to_string() == notation);
            match chosen {
                Some(next_move) => {
                    if let Some(captured) = self.position.make_move(next_move) {
                        writeln!(output, "captured {captured}")?;
                    }
                },
                None => writeln!(output, "illegal move: {notation}")?,
            }
        } else if line == "d" {
            writeln!(output, "{:?}", self.position)?;
        } else if !line.is_empty() {
            writeln!(output, "unknown command: {line}")?;
        }
        Ok(true)
    }
}

fn main() -> io::Result<()> {
    println!("tabia {}", tabia::version());
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if !session.handle(line.trim(), &mut stdout)? {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::Session;

    fn run(commands: &[&str]) -> String {
        let mut session = Session::new();
        let mut output = Vec::new();
        for command in commands {
            assert!(session.handle(command, &mut output).unwrap());
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn lists_moves_of_the_starting_position() {
        let output = run(&["moves"]);
        assert!(output.contains("e2e4"));
        assert!(output.contains("g1f3"));
        assert_eq!(output.split_whitespace().count(), 20);
    }

    #[test]
    fn applies_only_validated_moves() {
        let output = run(&["move e2e5", "move e2e4", "d"]);
        assert!(output.contains("illegal move: e2e5"));
        assert!(output.contains(
            "FEN: rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        ));
    }

    #[test]
    fn reports_captures_and_parse_errors() {
        let output = run(&[
            "position rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "move e4d5",
            "position not-a-fen",
        ]);
        assert!(output.contains("captured p"));
        assert!(output.contains("error:"));
    }

    #[test]
    fn quit_ends_the_session() {
        let mut session = Session::new();
        let mut output = Vec::new();
        assert!(!session.handle("quit", &mut output).unwrap());
    }
}
