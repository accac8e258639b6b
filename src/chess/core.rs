//! Chess primitives shared by the rest of the engine: board coordinates,
//! piece identities, castling rights, ray directions and the packed move
//! record.

use std::fmt::{self, Write};
use std::mem;

use anyhow::bail;
use itertools::Itertools;

use crate::chess::bitboard::Bitboard;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares, numbered from White's left corner, rank by rank:
///
/// ```
/// use tabia::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A2 as u8, 8);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// The numbering mirrors bit indices of [`Bitboard`]: the least significant
/// bit is A1, the most significant is H8.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) into a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    // The caller ensures that the index is within the board.
    pub(super) fn from_index(index: u8) -> Self {
        debug_assert!(index < BOARD_SIZE);
        unsafe { mem::transmute(index) }
    }

    /// Returns the file (column) the square is on.
    #[must_use]
    pub const fn file(self) -> File {
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns the rank (row) the square is on.
    #[must_use]
    pub const fn rank(self) -> Rank {
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }

    /// Steps one square in the given direction, or `None` when the step
    /// leaves the board.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Left | Direction::UpLeft | Direction::DownLeft
                if self.file() == File::A =>
            {
                return None;
            },
            Direction::Right | Direction::UpRight | Direction::DownRight
                if self.file() == File::H =>
            {
                return None;
            },
            _ => (),
        }
        const WIDTH: i8 = BOARD_WIDTH as i8;
        let step: i8 = match direction {
            Direction::Up => WIDTH,
            Direction::Down => -WIDTH,
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::UpLeft => WIDTH - 1,
            Direction::UpRight => WIDTH + 1,
            Direction::DownLeft => -WIDTH - 1,
            Direction::DownRight => -WIDTH + 1,
        };
        let candidate = self as i8 + step;
        if candidate < 0 {
            return None;
        }
        Self::try_from(candidate as u8).ok()
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        // Exclusive range patterns are not stable, hence the constant.
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(unsafe { mem::transmute::<u8, Self>(square_index) }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!("square should be two chars, got '{square}'"),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column of the chessboard, written as a lowercase letter in
/// algebraic notation.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Bitboard mask with 1s on all squares of the file.
    pub(super) const fn mask(self) -> Bitboard {
        Bitboard::from_bits(0x0101_0101_0101_0101 << self as u8)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(unsafe { mem::transmute::<u8, Self>(file as u8 - b'a') }),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(column) }),
            _ => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

/// Represents a horizontal row of the chessboard, written as a digit in
/// algebraic notation. Values are zero-based: rank 1 is 0.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// Bitboard mask with 1s on all squares of the rank.
    pub(super) const fn mask(self) -> Bitboard {
        Bitboard::from_bits(0xFF << (self as u8 * BOARD_WIDTH))
    }

    pub(super) fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    pub(super) fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(unsafe { mem::transmute::<u8, Self>(rank as u8 - b'1') }),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(row) }),
            _ => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A game is played between two players: White (moving first) and Black.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub(super) fn push_direction(self) -> Direction {
        match self {
            Self::White => Direction::Up,
            Self::Black => Direction::Down,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("side to move should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(match self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard chess piece kinds.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// A specific piece owned by a player. Serialized as the piece letter, with
/// the color encoded in the letter case (uppercase for White).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self { owner, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        f.write_char(match self.owner {
            Player::White => symbol.to_ascii_uppercase(),
            Player::Black => symbol,
        })
    }
}

bitflags::bitflags! {
    /// Tracks the ability to [castle] each side (kingside is often called
    /// O-O or short castle, queenside O-O-O or long castle). A player loses
    /// both rights when the king moves and one right when the corresponding
    /// rook moves or is captured on its corner.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct CastleRights : u8 {
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b1000;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0100;
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0010;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b0001;
    }
}

impl CastleRights {
    pub(super) fn for_player(player: Player) -> Self {
        match player {
            Player::White => Self::WHITE_SHORT | Self::WHITE_LONG,
            Player::Black => Self::BLACK_SHORT | Self::BLACK_LONG,
        }
    }

    // Rights that disappear once a piece moves from or is captured on the
    // given square. King squares are not listed: a king move clears both
    // rights at once through for_player.
    pub(super) fn lost_on(square: Square) -> Self {
        match square {
            Square::A1 => Self::WHITE_LONG,
            Square::H1 => Self::WHITE_SHORT,
            Square::A8 => Self::BLACK_LONG,
            Square::H8 => Self::BLACK_SHORT,
            _ => Self::empty(),
        }
    }
}

impl TryFrom<&str> for CastleRights {
    type Error = anyhow::Error;

    /// Parses castle rights for both players from the FEN field. Accepts
    /// only the canonical spelling: `-`, or a non-empty subset of `KQkq`
    /// in exactly that order.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        if input == "-" {
            return Ok(Self::empty());
        }
        if input.is_empty() {
            bail!("castle rights should be '-' or a subset of \"KQkq\", got an empty field");
        }
        let mut rights = Self::empty();
        let mut last_order = 0;
        for symbol in input.chars() {
            let (flag, order) = match symbol {
                'K' => (Self::WHITE_SHORT, 1),
                'Q' => (Self::WHITE_LONG, 2),
                'k' => (Self::BLACK_SHORT, 3),
                'q' => (Self::BLACK_LONG, 4),
                _ => bail!("unknown castle rights symbol '{symbol}' in '{input}'"),
            };
            if order <= last_order {
                bail!("castle rights should be listed in \"KQkq\" order, got '{input}'");
            }
            last_order = order;
            rights |= flag;
        }
        Ok(rights)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }
        if self.contains(Self::WHITE_SHORT) {
            f.write_char('K')?;
        }
        if self.contains(Self::WHITE_LONG) {
            f.write_char('Q')?;
        }
        if self.contains(Self::BLACK_SHORT) {
            f.write_char('k')?;
        }
        if self.contains(Self::BLACK_LONG) {
            f.write_char('q')?;
        }
        Ok(())
    }
}

/// A pawn reaching the last rank is promoted to a queen, rook, bishop or
/// knight.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    const fn from_bits(bits: u16) -> Self {
        match bits {
            0 => Self::Knight,
            1 => Self::Bishop,
            2 => Self::Rook,
            _ => Self::Queen,
        }
    }

    const fn bits(self) -> u16 {
        match self {
            Self::Knight => 0,
            Self::Bishop => 1,
            Self::Rook => 2,
            Self::Queen => 3,
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self {
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
        })
    }
}

/// Distinguishes the moves that need extra handling during application, on
/// top of relocating the moving piece.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Regular,
    Promotion,
    EnPassant,
    Castle,
}

/// A move packed into 16 bits:
///
/// | Bits  | Contents |
/// | ----- | -------- |
/// | 0-5   | source square |
/// | 6-11  | destination square |
/// | 12-13 | promotion piece kind (meaningful only for promotions) |
/// | 14-15 | [`MoveKind`] tag |
///
/// Moves compare by exact field equality. Castling is encoded as the king
/// move (e.g. e1g1); the accompanying rook relocation happens during
/// application. The en passant tag marks en passant *captures*; double
/// pawn pushes are plain [`MoveKind::Regular`] moves.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Move {
    bits: u16,
}

impl Move {
    const TO_SHIFT: u16 = 6;
    const PROMOTION_SHIFT: u16 = 12;
    const KIND_SHIFT: u16 = 14;
    const SQUARE_MASK: u16 = 0b11_1111;

    const fn pack(from: Square, to: Square, payload: u16, kind: u16) -> Self {
        Self {
            bits: from as u16
                | ((to as u16) << Self::TO_SHIFT)
                | (payload << Self::PROMOTION_SHIFT)
                | (kind << Self::KIND_SHIFT),
        }
    }

    /// An ordinary relocation or capture, including double pawn pushes.
    #[must_use]
    pub const fn regular(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, 0)
    }

    /// A pawn reaching the last rank; `promotion` replaces the pawn.
    #[must_use]
    pub const fn promotion(from: Square, to: Square, promotion: Promotion) -> Self {
        Self::pack(from, to, promotion.bits(), 1)
    }

    /// A pawn capturing en passant; `to` is the capturer's destination, not
    /// the square of the captured pawn.
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, 2)
    }

    /// Castling, encoded as the king move.
    #[must_use]
    pub const fn castle(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, 3)
    }

    /// Source square.
    #[must_use]
    pub fn from(self) -> Square {
        Square::from_index((self.bits & Self::SQUARE_MASK) as u8)
    }

    /// Destination square.
    #[must_use]
    pub fn to(self) -> Square {
        Square::from_index(((self.bits >> Self::TO_SHIFT) & Self::SQUARE_MASK) as u8)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        match self.bits >> Self::KIND_SHIFT {
            0 => MoveKind::Regular,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castle,
        }
    }

    /// The piece kind a promoting pawn turns into; `None` for every other
    /// kind of move.
    #[must_use]
    pub const fn promoted_to(self) -> Option<Promotion> {
        match self.kind() {
            MoveKind::Promotion => Some(Promotion::from_bits(
                (self.bits >> Self::PROMOTION_SHIFT) & 0b11,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    /// Serializes a move in coordinate ([UCI]) notation.
    ///
    /// [UCI]: https://www.chessprogramming.org/UCI
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promotion) = self.promoted_to() {
            write!(f, "{promotion}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({:?})", self.kind())
    }
}

/// Directions on the board from the perspective of the White player: `Up`
/// is the direction of White's pawn pushes (towards rank 8), `Right` leads
/// towards the h file.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub(super) fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::UpLeft => Self::DownRight,
            Self::UpRight => Self::DownLeft,
            Self::DownLeft => Self::UpRight,
            Self::DownRight => Self::UpLeft,
        }
    }

    pub(super) fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownLeft | Self::DownRight
        )
    }
}

#[cfg(test)]
mod test {
    use std::mem::size_of;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rank() {
        assert_eq!(
            ('1'..='9')
                .filter_map(|ch| Rank::try_from(ch).ok())
                .collect::<Vec<Rank>>(),
            vec![
                Rank::One,
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
            ]
        );
        assert!(Rank::try_from('0').is_err());
        assert!(Rank::try_from('9').is_err());
        assert!(Rank::try_from(BOARD_WIDTH).is_err());
    }

    #[test]
    fn file() {
        assert_eq!(
            ('a'..='i')
                .filter_map(|ch| File::try_from(ch).ok())
                .collect::<Vec<File>>(),
            vec![
                File::A,
                File::B,
                File::C,
                File::D,
                File::E,
                File::F,
                File::G,
                File::H,
            ]
        );
        assert!(File::try_from('i').is_err());
        assert!(File::try_from(BOARD_WIDTH).is_err());
    }

    #[test]
    fn square() {
        let squares: Vec<_> = [
            0u8,
            BOARD_SIZE - 1,
            BOARD_WIDTH - 1,
            BOARD_WIDTH,
            BOARD_WIDTH * 2 + 5,
            BOARD_SIZE,
        ]
        .iter()
        .filter_map(|square| Square::try_from(*square).ok())
        .collect();
        assert_eq!(
            squares,
            vec![Square::A1, Square::H8, Square::H1, Square::A2, Square::F3]
        );
        assert_eq!(Square::new(File::B, Rank::Three), Square::B3);
        assert_eq!(Square::new(File::H, Rank::Eight), Square::H8);
        assert_eq!(Square::try_from("e4").unwrap(), Square::E4);
        assert!(Square::try_from("e9").is_err());
        assert!(Square::try_from("i4").is_err());
        assert!(Square::try_from("e44").is_err());
    }

    #[test]
    fn square_shifts() {
        assert_eq!(Square::E4.shift(Direction::Up), Some(Square::E5));
        assert_eq!(Square::E4.shift(Direction::DownRight), Some(Square::F3));
        assert_eq!(Square::A2.shift(Direction::Left), None);
        assert_eq!(Square::A2.shift(Direction::UpLeft), None);
        assert_eq!(Square::A2.shift(Direction::DownLeft), None);
        assert_eq!(Square::H6.shift(Direction::Right), None);
        assert_eq!(Square::H6.shift(Direction::UpRight), None);
        assert_eq!(Square::H1.shift(Direction::Down), None);
        assert_eq!(Square::A8.shift(Direction::Up), None);
        assert_eq!(Square::A1.shift(Direction::UpRight), Some(Square::B2));
    }

    #[test]
    fn pieces() {
        let piece = Piece::try_from('N').unwrap();
        assert_eq!(piece.owner, Player::White);
        assert_eq!(piece.kind, PieceKind::Knight);
        assert_eq!(piece.to_string(), "N");
        let piece = Piece::try_from('q').unwrap();
        assert_eq!(piece.owner, Player::Black);
        assert_eq!(piece.kind, PieceKind::Queen);
        assert_eq!(piece.to_string(), "q");
        assert!(Piece::try_from('x').is_err());
        assert!(Piece::try_from('1').is_err());
    }

    #[test]
    fn castle_rights() {
        assert_eq!(CastleRights::try_from("KQkq").unwrap(), CastleRights::all());
        assert_eq!(CastleRights::try_from("-").unwrap(), CastleRights::empty());
        assert_eq!(
            CastleRights::try_from("Kq").unwrap(),
            CastleRights::WHITE_SHORT | CastleRights::BLACK_LONG
        );
        // Out-of-order, duplicated and unknown symbols are rejected.
        assert!(CastleRights::try_from("qK").is_err());
        assert!(CastleRights::try_from("KK").is_err());
        assert!(CastleRights::try_from("KQx").is_err());
        assert!(CastleRights::try_from("").is_err());
        assert_eq!(CastleRights::all().to_string(), "KQkq");
        assert_eq!(CastleRights::empty().to_string(), "-");
        assert_eq!(
            (CastleRights::WHITE_LONG | CastleRights::BLACK_SHORT).to_string(),
            "Qk"
        );
    }

    #[test]
    fn move_packing() {
        assert_eq!(size_of::<Move>(), 2);

        let regular = Move::regular(Square::E2, Square::E4);
        assert_eq!(regular.from(), Square::E2);
        assert_eq!(regular.to(), Square::E4);
        assert_eq!(regular.kind(), MoveKind::Regular);
        assert_eq!(regular.promoted_to(), None);
        assert_eq!(regular.to_string(), "e2e4");

        let promotion = Move::promotion(Square::B7, Square::A8, Promotion::Rook);
        assert_eq!(promotion.kind(), MoveKind::Promotion);
        assert_eq!(promotion.promoted_to(), Some(Promotion::Rook));
        assert_eq!(promotion.to_string(), "b7a8r");

        let en_passant = Move::en_passant(Square::D5, Square::E6);
        assert_eq!(en_passant.kind(), MoveKind::EnPassant);
        assert_eq!(en_passant.promoted_to(), None);
        assert_eq!(en_passant.to_string(), "d5e6");

        let castle = Move::castle(Square::E8, Square::G8);
        assert_eq!(castle.kind(), MoveKind::Castle);
        assert_eq!(castle.to_string(), "e8g8");

        // Exact-field equality.
        assert_eq!(regular, Move::regular(Square::E2, Square::E4));
        assert_ne!(regular, Move::regular(Square::E2, Square::E3));
        assert_ne!(
            Move::promotion(Square::B7, Square::A8, Promotion::Rook),
            Move::promotion(Square::B7, Square::A8, Promotion::Queen)
        );
    }

    #[test]
    fn directions() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::UpLeft.opposite(), Direction::DownRight);
        assert!(Direction::UpLeft.is_diagonal());
        assert!(!Direction::Left.is_diagonal());
    }
}
