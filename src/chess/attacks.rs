//! Attacked-square computation. Every function maps a whole *set* of
//! pieces of one kind to the set of squares they attack: batches are
//! processed in parallel by the bitwise operations, so attacking with five
//! pawns costs the same as with one. Sliding pieces cast their rays with
//! the obstructed fill from [`crate::chess::bitboard`].

use crate::chess::bitboard::{Bitboard, Board};
use crate::chess::core::{Direction, Player};

pub(super) const DIAGONAL_RAYS: [Direction; 4] = [
    Direction::UpLeft,
    Direction::UpRight,
    Direction::DownLeft,
    Direction::DownRight,
];

pub(super) const ORTHOGONAL_RAYS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Squares attacked by pawns: one diagonal step forward. Pushes are not
/// attacks and are handled by the move generator.
pub(super) fn pawn_attacks(pawns: Bitboard, player: Player) -> Bitboard {
    match player {
        Player::White => pawns.shift(Direction::UpLeft) | pawns.shift(Direction::UpRight),
        Player::Black => pawns.shift(Direction::DownLeft) | pawns.shift(Direction::DownRight),
    }
}

/// Squares attacked by knights: the union of all eight L-shaped hops, each
/// masked against file wraparound. The west/east steps are shared between
/// the vertical shifts to cut the operation count.
pub(super) fn knight_attacks(knights: Bitboard) -> Bitboard {
    let sideways_one = knights.shift(Direction::Left) | knights.shift(Direction::Right);
    let sideways_two =
        knights.double_shift(Direction::Left) | knights.double_shift(Direction::Right);
    sideways_one.double_shift(Direction::Up)
        | sideways_two.shift(Direction::Up)
        | sideways_two.shift(Direction::Down)
        | sideways_one.double_shift(Direction::Down)
}

/// Squares attacked by bishops: obstructed fill along the four diagonals.
/// The result includes the first blocker on each ray (a potential capture)
/// and excludes the origins.
pub(super) fn bishop_attacks(bishops: Bitboard, open: Bitboard) -> Bitboard {
    DIAGONAL_RAYS
        .iter()
        .fold(Bitboard::empty(), |attacks, direction| {
            attacks | bishops.ray_attacks(open, *direction)
        })
}

/// Squares attacked by rooks: obstructed fill along the four orthogonal
/// rays.
pub(super) fn rook_attacks(rooks: Bitboard, open: Bitboard) -> Bitboard {
    ORTHOGONAL_RAYS
        .iter()
        .fold(Bitboard::empty(), |attacks, direction| {
            attacks | rooks.ray_attacks(open, *direction)
        })
}

/// Squares attacked by queens: bishop and rook geometry combined.
pub(super) fn queen_attacks(queens: Bitboard, open: Bitboard) -> Bitboard {
    bishop_attacks(queens, open) | rook_attacks(queens, open)
}

/// Squares attacked by the king: the surrounding halo, built from three
/// shifts instead of eight.
pub(super) fn king_attacks(king: Bitboard) -> Bitboard {
    let mut halo = king | king.shift(Direction::Left) | king.shift(Direction::Right);
    halo |= halo.shift(Direction::Up) | halo.shift(Direction::Down);
    halo - king
}

/// Every square attacked by the given player: the union of all per-kind
/// attack sets. This is the primitive behind "is this square safe" checks;
/// `open` is passed explicitly so callers can drop the defending king from
/// the blockers.
pub(super) fn threats(board: &Board, player: Player, open: Bitboard) -> Bitboard {
    let own = board.occupancy(player);
    let diagonal_sliders = (board.bishops | board.queens) & own;
    let orthogonal_sliders = (board.rooks | board.queens) & own;
    pawn_attacks(board.pawns & own, player)
        | knight_attacks(board.knights & own)
        | bishop_attacks(diagonal_sliders, open)
        | rook_attacks(orthogonal_sliders, open)
        | king_attacks(board.kings & own)
}
