//! Fully-specified chess position: occupancy [`Board`], side to move,
//! castling rights, en passant target and the move counters. It has a 1:1
//! relationship with [Forsyth-Edwards Notation] (FEN), which is the only
//! way to construct a position other than the standard starting layout,
//! and [`Position::make_move`] is the only way to mutate one.
//!
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use std::fmt;
use std::num::NonZeroU16;

use anyhow::{bail, Context};

use crate::chess::attacks;
use crate::chess::bitboard::Board;
use crate::chess::core::{
    CastleRights, File, Move, MoveKind, Piece, PieceKind, Player, Rank, Square, BOARD_WIDTH,
};
use crate::chess::movegen::{self, AttackInfo, MoveList};

/// State of the chess game. [`Position::try_from`] provides a convenient
/// interface for creating one: it cleans up the input and parses either
/// full FEN or its trimmed (EPD-style) version without the move counters.
///
/// A position is an ordinary in-memory value: clones are independent, and
/// enumeration over a shared snapshot is safe. Concurrent enumeration and
/// mutation of the *same* instance is the caller's responsibility to
/// serialize.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    castling: CastleRights,
    side_to_move: Player,
    /// The number of half-moves since the last capture or pawn move, used
    /// for the fifty-move draw rule.
    halfmove_clock: u8,
    fullmove_counter: NonZeroU16,
    en_passant_square: Option<Square>,
}

impl Position {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use tabia::chess::position::Position;
    ///
    /// assert_eq!(
    ///     &Position::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self {
            board: Board::starting(),
            castling: CastleRights::all(),
            ..Self::empty()
        }
    }

    // Creates an empty board to be filled by the parser.
    fn empty() -> Self {
        Self {
            board: Board::empty(),
            castling: CastleRights::empty(),
            side_to_move: Player::White,
            halfmove_clock: 0,
            fullmove_counter: NonZeroU16::new(1).expect("1 is not zero"),
            en_passant_square: None,
        }
    }

    pub(super) fn board(&self) -> &Board {
        &self.board
    }

    pub(super) fn us(&self) -> Player {
        self.side_to_move
    }

    pub(super) fn they(&self) -> Player {
        self.us().opponent()
    }

    pub(super) fn castling(&self) -> CastleRights {
        self.castling
    }

    pub(super) fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// The piece standing on the given square, if any.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.board.at(square)
    }

    /// Whether the king of the side to move is under attack.
    #[must_use]
    pub fn is_check(&self) -> bool {
        AttackInfo::new(self).checkers.has_any()
    }

    /// Calculates the list of legal moves: the moves that do not leave our
    /// king in check, including castling, en passant captures and
    /// promotions. The position is not mutated.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        debug_assert!(self.board.is_consistent());
        movegen::generate(self)
    }

    /// Applies a move produced by [`Position::generate_moves`] for this
    /// exact position and returns the captured piece, if any.
    ///
    /// No legality re-validation happens here: the enumerator that
    /// produced the move is the source of truth. Callers holding
    /// externally-sourced move notation must membership-test it against a
    /// fresh enumeration first. Feeding a foreign move is a precondition
    /// violation caught by assertions, not a recoverable error.
    pub fn make_move(&mut self, next_move: Move) -> Option<Piece> {
        let us = self.us();
        let they = self.they();
        let (from, to) = (next_move.from(), next_move.to());

        let piece = self
            .board
            .remove(from)
            .expect("the move origin holds the moving piece");
        debug_assert_eq!(piece.owner, us, "moving an opponent's piece");
        let mut captured = self.board.remove(to);
        match next_move.kind() {
            MoveKind::Regular | MoveKind::Promotion => (),
            MoveKind::EnPassant => {
                // The captured pawn is next to the destination square, not
                // on it.
                let target = to
                    .shift(they.push_direction())
                    .expect("en passant destination has the captured pawn next to it");
                captured = self.board.remove(target);
                debug_assert_eq!(
                    captured,
                    Some(Piece {
                        owner: they,
                        kind: PieceKind::Pawn,
                    })
                );
            },
            MoveKind::Castle => {
                let rank = Rank::backrank(us);
                let (rook_from, rook_to) = if to.file() > from.file() {
                    (Square::new(File::H, rank), Square::new(File::F, rank))
                } else {
                    (Square::new(File::A, rank), Square::new(File::D, rank))
                };
                let rook = self
                    .board
                    .remove(rook_from)
                    .expect("castling relocates the rook from its corner");
                self.board.place(rook, rook_to);
            },
        }
        let placed = match next_move.promoted_to() {
            Some(promotion) => Piece {
                owner: us,
                kind: promotion.into(),
            },
            None => piece,
        };
        self.board.place(placed, to);

        // The en passant target lives for exactly one ply after a double
        // pawn push.
        const DOUBLE_PUSH_DISTANCE: i8 = 2 * BOARD_WIDTH as i8;
        self.en_passant_square = if piece.kind == PieceKind::Pawn
            && (to as i8 - from as i8).abs() == DOUBLE_PUSH_DISTANCE
        {
            Some(
                from.shift(us.push_direction())
                    .expect("double push passes over a board square"),
            )
        } else {
            None
        };

        if piece.kind == PieceKind::King {
            self.castling.remove(CastleRights::for_player(us));
        }
        self.castling
            .remove(CastleRights::lost_on(from) | CastleRights::lost_on(to));

        if piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Player::Black {
            self.fullmove_counter = self
                .fullmove_counter
                .checked_add(1)
                .expect("fullmove counter overflow");
        }
        self.side_to_move = they;

        debug_assert!(self.board.is_consistent());
        captured
    }

    /// Parses a position from Forsyth-Edwards Notation. The move counter
    /// fields are optional and default to "0 1": EPD-style trimmed strings
    /// are common in public position collections and are accepted too.
    ///
    /// FEN ::=
    ///       Piece Placement
    ///   ' ' Side to move
    ///   ' ' Castling ability
    ///   ' ' En passant target square
    ///   ' ' Halfmove clock
    ///   ' ' Fullmove counter
    ///
    /// This expects an exactly-formatted input. Use [`Position::try_from`]
    /// for strings from untrusted sources that may carry extra whitespace
    /// or a `fen `/`epd ` prefix.
    ///
    /// # Errors
    ///
    /// Each malformed field is reported as a distinct error; a position is
    /// never silently patched up from bad input. Syntactically valid
    /// positions are additionally checked for basic semantic sanity (king
    /// count, pawn placement, en passant consistency).
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split(' ');
        let mut result = Self::empty();

        let placement = parts
            .next()
            .context("incorrect FEN: missing piece placement")?;
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in placement.split('/') {
            if rank_id == 0 {
                bail!("incorrect FEN: expected 8 ranks, got {placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                match symbol {
                    '0' => bail!("incorrect FEN: empty-square run can not start with 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                if file >= BOARD_WIDTH {
                    bail!("incorrect FEN: rank {rank_fen} overflows the board");
                }
                result
                    .board
                    .place(piece, Square::new(File::try_from(file)?, rank));
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!("incorrect FEN: rank {rank_fen} should cover 8 files, got {file}");
            }
        }
        if rank_id != 0 {
            bail!("incorrect FEN: expected 8 ranks, got {placement}");
        }

        result.side_to_move = parts
            .next()
            .context("incorrect FEN: missing side to move")?
            .try_into()?;
        result.castling = parts
            .next()
            .context("incorrect FEN: missing castling rights")?
            .try_into()?;
        result.en_passant_square = match parts.next() {
            Some("-") => None,
            Some(value) => Some(value.try_into()?),
            None => bail!("incorrect FEN: missing en passant square"),
        };
        result.halfmove_clock = match parts.next() {
            Some(value) => {
                // parse() would also accept a leading '+'.
                if !value.bytes().all(|c| c.is_ascii_digit()) {
                    bail!("halfmove clock can not contain anything other than digits");
                }
                value
                    .parse()
                    .with_context(|| format!("incorrect FEN: bad halfmove clock {value}"))?
            },
            // A trimmed EPD-style position ends here.
            None => {
                result.validate()?;
                return Ok(result);
            },
        };
        result.fullmove_counter = match parts.next() {
            Some(value) => {
                if !value.bytes().all(|c| c.is_ascii_digit()) {
                    bail!("fullmove counter can not contain anything other than digits");
                }
                value
                    .parse()
                    .with_context(|| format!("incorrect FEN: bad fullmove counter {value}"))?
            },
            None => bail!("incorrect FEN: missing fullmove counter"),
        };
        if parts.next().is_some() {
            bail!("trailing symbols are not allowed in FEN");
        }
        result.validate()?;
        Ok(result)
    }

    // Semantic sanity of a parsed position. Syntax alone admits boards no
    // game can reach and that the move generator has no answer for.
    fn validate(&self) -> anyhow::Result<()> {
        let white_kings = (self.board.kings & self.board.white).count();
        if white_kings != 1 {
            bail!("expected 1 white king, got {white_kings}");
        }
        let black_kings = (self.board.kings & self.board.black).count();
        if black_kings != 1 {
            bail!("expected 1 black king, got {black_kings}");
        }
        let white_pawns = (self.board.pawns & self.board.white).count();
        if white_pawns > 8 {
            bail!("expected <= 8 white pawns, got {white_pawns}");
        }
        let black_pawns = (self.board.pawns & self.board.black).count();
        if black_pawns > 8 {
            bail!("expected <= 8 black pawns, got {black_pawns}");
        }
        if (self.board.pawns & (Rank::One.mask() | Rank::Eight.mask())).has_any() {
            bail!("pawns can not be placed on backranks");
        }
        let open = !self.board.occupied();
        let their_king = self.board.pieces(self.they(), PieceKind::King);
        if (attacks::threats(&self.board, self.us(), open) & their_king).has_any() {
            bail!("the side to move can capture the opponent's king");
        }
        if let Some(square) = self.en_passant_square {
            let expected_rank = match self.side_to_move {
                Player::White => Rank::Six,
                Player::Black => Rank::Three,
            };
            if square.rank() != expected_rank {
                bail!(
                    "expected en passant square to be on rank {expected_rank}, got {}",
                    square.rank()
                );
            }
            // The pawn that was just double-pushed stands in front of the
            // en passant square.
            let pushed_pawn = square
                .shift(self.they().push_direction())
                .expect("the en passant rank has both neighbors on the board");
            if !self
                .board
                .pieces(self.they(), PieceKind::Pawn)
                .contains(pushed_pawn)
            {
                bail!("en passant square is not behind a doubly pushed pawn");
            }
        }
        let checkers = AttackInfo::new(self).checkers.count();
        if checkers > 2 {
            bail!("more than two pieces can not check the king");
        }
        Ok(())
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Cleans up the input (surrounding whitespace, an optional `fen ` or
    /// `epd ` prefix) and delegates to [`Position::from_fen`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        for prefix in ["fen ", "epd "] {
            if let Some(stripped) = input.strip_prefix(prefix) {
                return Self::from_fen(stripped);
            }
        }
        Self::from_fen(input)
    }
}

impl fmt::Display for Position {
    /// Serializes the position in FEN.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", &self.board)?;
        write!(f, "{} ", &self.side_to_move)?;
        write!(f, "{} ", &self.castling)?;
        match self.en_passant_square {
            Some(square) => write!(f, "{square} "),
            None => write!(f, "- "),
        }?;
        write!(f, "{} {}", &self.halfmove_clock, &self.fullmove_counter)
    }
}

impl fmt::Debug for Position {
    /// Dumps the board grid (one character per square) and the state
    /// fields in a human-readable form.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "Side to move: {}", &self.side_to_move)?;
        writeln!(f, "Castling rights: {}", &self.castling)?;
        match self.en_passant_square {
            Some(square) => writeln!(f, "En passant: {square}"),
            None => writeln!(f, "En passant: -"),
        }?;
        write!(f, "FEN: {self}")
    }
}

/// Counts the leaf nodes of the move generation tree at the given depth:
/// the standard way to cross-check a move generator against published
/// reference numbers ([Perft]).
///
/// [Perft]: https://www.chessprogramming.org/Perft
#[must_use]
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = position.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for next_move in moves {
        let mut next = position.clone();
        let _ = next.make_move(next_move);
        nodes += perft(&next, depth - 1);
    }
    nodes
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup(fen: &str) -> Position {
        let position = Position::try_from(fen);
        assert!(position.is_ok(), "input: {fen}");
        let position = position.unwrap();
        assert_eq!(position.to_string(), fen);
        position
    }

    fn make(position: &Position, notation: &str) -> (Position, Option<Piece>) {
        let mut next = position.clone();
        let next_move = position
            .generate_moves()
            .into_iter()
            .find(|m| m.to_string() == notation)
            .unwrap_or_else(|| panic!("{notation} should be legal in {position}"));
        let captured = next.make_move(next_move);
        (next, captured)
    }

    #[test]
    fn correct_fen() {
        let _ = setup("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let _ = setup("2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4 w - - 0 34");
        let _ = setup("rnbqk1nr/p3bppp/1p2p3/2ppP3/3P4/P7/1PP1NPPP/R1BQKBNR w KQkq c6 0 7");
        let _ = setup("r2qkb1r/1pp1pp1p/p1np1np1/1B6/3PP1b1/2N1BN2/PPP2PPP/R2QK2R w KQkq - 0 7");
        let _ = setup("r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 w q - 0 24");
        let _ = setup("8/8/8/8/2P5/3k4/8/KB6 b - c3 0 1");
        let _ = setup("rnbq1rk1/pp4pp/1b1ppn2/2p2p2/2PP4/1P2PN2/PB2BPPP/RN1Q1RK1 w - c6 0 9");
    }

    #[test]
    fn correct_epd() {
        let epd = "rnbqkb1r/pp2pppp/3p1n2/8/3NP3/2N5/PPP2PPP/R1BQKB1R b KQkq -";
        assert!(Position::try_from(epd).is_ok());
    }

    #[test]
    fn clean_board_str() {
        // Prefix with "fen".
        assert!(Position::try_from(
            "fen rn1qkb1r/pp3ppp/2p1pn2/3p1b2/2PP4/5NP1/PP2PPBP/RNBQK2R w KQkq - 0 1"
        )
        .is_ok());
        // Prefix with "epd".
        assert!(Position::try_from(
            "epd rnbqkb1r/ppp1pp1p/5np1/3p4/3P1B2/5N2/PPP1PPPP/RN1QKB1R w KQkq -"
        )
        .is_ok());
        // Whitespace is trimmed by try_from but not by from_fen.
        assert!(Position::try_from(
            "rnbqkb1r/ppp1pp1p/5np1/3p4/3P1B2/5N2/PPP1PPPP/RN1QKB1R w KQkq -\n"
        )
        .is_ok());
        assert!(Position::from_fen(
            " rnbqkb1r/ppp1pp1p/5np1/3p4/3P1B2/5N2/PPP1PPPP/RN1QKB1R w KQkq -"
        )
        .is_err());
    }

    #[test]
    fn no_crash() {
        assert!(Position::try_from("3k2p1N/82/8/8/7B/6K1/3R4/8 b - - 0 1").is_err());
        assert!(
            Position::try_from("3kn3/R2p1N2/8/8/70000000000000000B/6K1/3R4/8 b - - 0 1").is_err()
        );
        assert!(Position::try_from("3kn3/R4N2/8/8/7B/6K1/3R4/8 b - - 0 48 b - - 0 4/8 b").is_err());
        assert!(Position::try_from("\tfen3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 23").is_err());
        assert!(Position::try_from("fen3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 23").is_err());
        assert!(Position::try_from("3kn3/R4N2/8/8/7B/6K1/3r4/8 b - - +8 1").is_err());
        assert!(Position::try_from("8/8/8/8/8/8/8/8 b 88 💣  💣  ").is_err());
        assert!(Position::try_from("").is_err());
    }

    #[test]
    fn malformed_fields() {
        // Underfull and overfull ranks.
        assert!(Position::try_from("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::try_from("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .is_err());
        assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
        // Unknown piece letter.
        assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1")
            .is_err());
        // Bad side to move.
        assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1")
            .is_err());
        // Bad castling rights.
        assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1")
            .is_err());
        // Bad en passant square.
        assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1")
            .is_err());
        // Missing fields.
        assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
        assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
    }

    #[test]
    fn semantic_validation() {
        fn rejected_with(input: &str, message: &str) {
            let error = Position::try_from(input).expect_err("expected invalid position");
            assert_eq!(error.to_string(), message);
        }
        rejected_with("3k4/8/8/8/8/8/8/8 w - - 0 1", "expected 1 white king, got 0");
        rejected_with("8/8/8/8/8/8/8/3K4 w - - 0 1", "expected 1 black king, got 0");
        rejected_with(
            "1kkk4/8/8/8/8/8/8/1KKK4 w - - 0 1",
            "expected 1 white king, got 3",
        );
        rejected_with(
            "rnbqkbnr/pppppppp/8/8/8/P7/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "expected <= 8 white pawns, got 9",
        );
        rejected_with(
            "rnbqkbnr/pppppppp/p7/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "expected <= 8 black pawns, got 9",
        );
        rejected_with(
            "3kr3/8/8/8/8/5Q2/8/1KP5 w - - 0 1",
            "pawns can not be placed on backranks",
        );
        rejected_with(
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1",
            "expected en passant square to be on rank 6, got 3",
        );
        rejected_with(
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq e4 0 1",
            "expected en passant square to be on rank 3, got 4",
        );
        rejected_with(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 1",
            "en passant square is not behind a doubly pushed pawn",
        );
        // The moving side could capture the king: unreachable position.
        rejected_with(
            "4k3/8/8/8/8/8/4R3/4K3 w - - 0 1",
            "the side to move can capture the opponent's king",
        );
    }

    #[test]
    fn make_move_applies_captures_and_clocks() {
        let position = setup("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let (position, captured) = make(&position, "e2e4");
        assert_eq!(captured, None);
        // The double push records the passed-over square for one ply.
        assert_eq!(
            position.to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        let (position, captured) = make(&position, "c7c5");
        assert_eq!(captured, None);
        assert_eq!(
            position.to_string(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
        );
        // A quiet piece move clears the target and bumps the clock.
        let (position, captured) = make(&position, "g1f3");
        assert_eq!(captured, None);
        assert_eq!(
            position.to_string(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn make_move_reports_captured_piece() {
        let position = setup("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let (position, captured) = make(&position, "e4d5");
        assert_eq!(
            captured,
            Some(Piece {
                owner: Player::Black,
                kind: PieceKind::Pawn,
            })
        );
        assert_eq!(
            position.to_string(),
            "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2"
        );
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let position = setup("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
        let (position, captured) = make(&position, "d4e3");
        assert_eq!(
            captured,
            Some(Piece {
                owner: Player::White,
                kind: PieceKind::Pawn,
            })
        );
        // The pawn on e4 is gone; nothing ever stood on e3.
        assert_eq!(position.to_string(), "4k3/8/8/8/8/4p3/8/4K3 w - - 0 2");
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let position = setup("8/P6k/8/8/8/8/8/K7 w - - 0 1");
        for (notation, expected) in [
            ("a7a8q", "Q7/7k/8/8/8/8/8/K7 b - - 0 1"),
            ("a7a8r", "R7/7k/8/8/8/8/8/K7 b - - 0 1"),
            ("a7a8b", "B7/7k/8/8/8/8/8/K7 b - - 0 1"),
            ("a7a8n", "N7/7k/8/8/8/8/8/K7 b - - 0 1"),
        ] {
            let (next, captured) = make(&position, notation);
            assert_eq!(captured, None);
            assert_eq!(next.to_string(), expected);
        }
    }

    #[test]
    fn castling_relocates_both_king_and_rook() {
        let position = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let (next, _) = make(&position, "e1g1");
        assert_eq!(next.to_string(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
        let (next, _) = make(&position, "e1c1");
        assert_eq!(next.to_string(), "r3k2r/8/8/8/8/8/8/2KR3R b kq - 1 1");
        let (next, _) = make(&next, "e8g8");
        assert_eq!(next.to_string(), "r4rk1/8/8/8/8/8/8/2KR3R w - - 2 2");
    }

    #[test]
    fn castle_rights_follow_rook_moves_and_captures() {
        let position = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        // Moving a rook drops the right on that side only.
        let (next, _) = make(&position, "a1a2");
        assert_eq!(next.to_string(), "r3k2r/8/8/8/8/8/R7/4K2R b Kkq - 1 1");
        // Moving the king drops both rights.
        let (next, _) = make(&position, "e1e2");
        assert_eq!(next.to_string(), "r3k2r/8/8/8/8/8/4K3/R6R b kq - 1 1");
        // Capturing a rook on its corner drops the opponent's right.
        let position = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let (next, captured) = make(&position, "a1a8");
        assert_eq!(
            captured,
            Some(Piece {
                owner: Player::Black,
                kind: PieceKind::Rook,
            })
        );
        assert_eq!(next.to_string(), "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
    }

    #[test]
    fn clones_are_independent_snapshots() {
        let original = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let snapshot = original.clone();
        let (mutated, _) = make(&original, "e1g1");
        assert_eq!(original, snapshot);
        assert_ne!(mutated, original);
        // Rebuilding from the snapshot's FEN restores the exact state.
        assert_eq!(
            Position::try_from(snapshot.to_string().as_str()).unwrap(),
            original
        );
    }

    #[test]
    fn is_check_reflects_the_side_to_move() {
        assert!(!Position::starting().is_check());
        assert!(setup("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").is_check());
        assert!(!setup("4k3/8/8/8/8/8/3R4/4K3 b - - 0 1").is_check());
    }
}
