//! Legal move enumeration. A single [`AttackInfo`] pass analyzes checks
//! and pins over an immutable position snapshot, then per-piece-kind
//! target sets are intersected with the resulting constraint masks and
//! expanded into the complete list of strictly legal moves.

use arrayvec::ArrayVec;

use crate::chess::attacks;
use crate::chess::bitboard::Bitboard;
use crate::chess::core::{
    CastleRights, Direction, Move, PieceKind, Player, Promotion, Rank, Square,
};
use crate::chess::position::Position;

/// A freshly produced list of moves. The longest known legal move list is
/// 218 entries, so the capacity keeps enumeration off the heap.
pub type MoveList = ArrayVec<Move, 256>;

const RAYS: [Direction; 8] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::UpLeft,
    Direction::UpRight,
    Direction::DownLeft,
    Direction::DownRight,
];

/// Check and pin analysis for the side to move, computed once per
/// enumeration.
pub(super) struct AttackInfo {
    /// Enemy pieces currently giving check.
    pub(super) checkers: Bitboard,
    /// Every square the enemy attacks, with our king excluded from the
    /// blockers: a king stepping away along a checking ray must not shield
    /// itself.
    pub(super) threats: Bitboard,
    /// Squares the king can legally step to.
    pub(super) safe_king_squares: Bitboard,
    /// Destinations that resolve the current check for non-king pieces:
    /// the full board when there is no check, the blocking/capturing
    /// squares in single check, empty in double check.
    pub(super) check_targets: Bitboard,
    // One candidate rail per ray direction from the king; empty when the
    // ray pins nothing.
    pin_rails: [Bitboard; 8],
    /// Own pieces that are pinned to the king.
    pub(super) pinned: Bitboard,
}

impl AttackInfo {
    pub(super) fn new(position: &Position) -> Self {
        let us = position.us();
        let they = position.they();
        let board = position.board();
        let own = board.occupancy(us);
        let enemy = board.occupancy(they);
        let open = !(own | enemy);
        let king = board.pieces(us, PieceKind::King);
        let diagonal_sliders = (board.bishops | board.queens) & enemy;
        let orthogonal_sliders = (board.rooks | board.queens) & enemy;

        // Attack from the king square as if the king were each enemy piece
        // kind and intersect with the actual pieces of that kind: the union
        // is the set of checking pieces.
        let checkers = (attacks::knight_attacks(king) & board.knights & enemy)
            | (attacks::pawn_attacks(king, us) & board.pawns & enemy)
            | (attacks::bishop_attacks(king, open) & diagonal_sliders)
            | (attacks::rook_attacks(king, open) & orthogonal_sliders);

        let threats = attacks::threats(board, they, open | king);
        let safe_king_squares = attacks::king_attacks(king) - threats - own;

        let check_targets = match checkers.count() {
            0 => Bitboard::full(),
            1 => {
                if (checkers & (diagonal_sliders | orthogonal_sliders)).has_any() {
                    // A sliding check is blocked on the ray between the king
                    // and the checker, or resolved by capturing the checker:
                    // the checker is the first blocker of exactly one ray.
                    let mut targets = Bitboard::empty();
                    for direction in RAYS {
                        let ray = king.ray_attacks(open, direction);
                        if (ray & checkers).has_any() {
                            targets = ray;
                            break;
                        }
                    }
                    debug_assert!(targets.has_any());
                    targets
                } else {
                    // Knight and pawn checks can only be resolved by capture.
                    checkers
                }
            },
            // No single move can resolve two simultaneous threats.
            _ => Bitboard::empty(),
        };

        // A rail is the intersection of two fills that pass through empty
        // and own-occupied squares only: outward from the king (shifted one
        // extra step to take in the first enemy piece), and inward from the
        // matching-geometry enemy sliders. Any interposed enemy piece cuts
        // the fills short, so the rails meet exactly when a slider eyes the
        // king through own material. One own piece on the rail is a pin;
        // more than one means the line is already blocked.
        let mut pin_rails = [Bitboard::empty(); 8];
        let mut pinned = Bitboard::empty();
        let passable = !enemy;
        for (index, direction) in RAYS.iter().enumerate() {
            let sliders = if direction.is_diagonal() {
                diagonal_sliders
            } else {
                orthogonal_sliders
            };
            if sliders.is_empty() {
                continue;
            }
            let outward = king.ray_attacks(passable, *direction);
            let inward = sliders.occluded_fill(passable, direction.opposite());
            let rail = outward & inward;
            if (rail & own).count() == 1 {
                pin_rails[index] = rail;
                pinned |= rail & own;
            }
        }

        Self {
            checkers,
            threats,
            safe_king_squares,
            check_targets,
            pin_rails,
            pinned,
        }
    }

    // The rail the given pinned piece stands on. Rays from the king never
    // overlap, so there is exactly one.
    fn rail_for(&self, square: Square) -> Bitboard {
        debug_assert!(self.pinned.contains(square));
        for rail in self.pin_rails {
            if rail.contains(square) {
                return rail;
            }
        }
        unreachable!("pinned piece {square} is not on any rail")
    }
}

struct CastleLane {
    right: CastleRights,
    rook: Square,
    /// Squares between the king and the rook; all must be empty.
    gap: Bitboard,
    /// Squares the king crosses or lands on; none may be attacked.
    king_walk: Bitboard,
    king_from: Square,
    king_to: Square,
}

const CASTLE_LANES: [[CastleLane; 2]; 2] = [
    [
        CastleLane {
            right: CastleRights::WHITE_SHORT,
            rook: Square::H1,
            gap: Bitboard::from_bits(0x60),
            king_walk: Bitboard::from_bits(0x60),
            king_from: Square::E1,
            king_to: Square::G1,
        },
        CastleLane {
            right: CastleRights::WHITE_LONG,
            rook: Square::A1,
            gap: Bitboard::from_bits(0x0E),
            king_walk: Bitboard::from_bits(0x0C),
            king_from: Square::E1,
            king_to: Square::C1,
        },
    ],
    [
        CastleLane {
            right: CastleRights::BLACK_SHORT,
            rook: Square::H8,
            gap: Bitboard::from_bits(0x6000_0000_0000_0000),
            king_walk: Bitboard::from_bits(0x6000_0000_0000_0000),
            king_from: Square::E8,
            king_to: Square::G8,
        },
        CastleLane {
            right: CastleRights::BLACK_LONG,
            rook: Square::A8,
            gap: Bitboard::from_bits(0x0E00_0000_0000_0000),
            king_walk: Bitboard::from_bits(0x0C00_0000_0000_0000),
            king_from: Square::E8,
            king_to: Square::C8,
        },
    ],
];

/// Produces the complete list of legal moves for the side to move. The
/// position is only read; enumeration order carries no meaning.
#[must_use]
pub(super) fn generate(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let us = position.us();
    let they = position.they();
    let board = position.board();
    let own = board.occupancy(us);
    let enemy = board.occupancy(they);
    let occupied = own | enemy;
    let open = !occupied;
    let info = AttackInfo::new(position);
    let king_square = board.pieces(us, PieceKind::King).as_square();

    // The king walks to safety regardless of how many pieces check it.
    for to in info.safe_king_squares.iter() {
        moves.push(Move::regular(king_square, to));
    }
    // Nothing but a king move resolves a double check.
    if info.checkers.count() >= 2 {
        return moves;
    }

    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ] {
        for from in board.pieces(us, kind).iter() {
            let origin = Bitboard::from(from);
            let attack_set = match kind {
                PieceKind::Knight => attacks::knight_attacks(origin),
                PieceKind::Bishop => attacks::bishop_attacks(origin, open),
                PieceKind::Rook => attacks::rook_attacks(origin, open),
                _ => attacks::queen_attacks(origin, open),
            };
            let mut allowed = info.check_targets;
            if info.pinned.contains(from) {
                allowed = allowed & info.rail_for(from);
            }
            for to in ((attack_set & allowed) - own).iter() {
                moves.push(Move::regular(from, to));
            }
        }
    }

    // Pawns: diagonal captures, single pushes, and double pushes through
    // two open squares from the starting rank. Landing on the last rank
    // expands into the four promotions.
    let push = us.push_direction();
    let jump_rank = Rank::pawns_starting(us).mask().shift(push);
    for from in board.pieces(us, PieceKind::Pawn).iter() {
        let origin = Bitboard::from(from);
        let mut allowed = info.check_targets;
        if info.pinned.contains(from) {
            allowed = allowed & info.rail_for(from);
        }
        let captures = attacks::pawn_attacks(origin, us) & enemy;
        let single = origin.shift(push) & open;
        let double = (single & jump_rank).shift(push) & open;
        for to in ((captures | single | double) & allowed).iter() {
            push_pawn_moves(&mut moves, from, to);
        }
    }

    // En passant captures, validated by replaying the capture against the
    // enemy sliders: two pawns leave the board at once and the capturer
    // lands on a third square, which neither the pin rails nor the check
    // mask can see.
    if let Some(to) = position.en_passant_square() {
        let capturers =
            attacks::pawn_attacks(Bitboard::from(to), they) & board.pieces(us, PieceKind::Pawn);
        for from in capturers.iter() {
            if en_passant_is_legal(position, from, to) {
                moves.push(Move::en_passant(from, to));
            }
        }
    }

    // Castling: the right is intact, the rook is home, the lane between is
    // clear, and neither the king's origin nor any square it crosses is
    // attacked. The threat set already excludes the king from the blockers.
    if info.checkers.is_empty() {
        let lanes = match us {
            Player::White => &CASTLE_LANES[0],
            Player::Black => &CASTLE_LANES[1],
        };
        for lane in lanes {
            if position.castling().contains(lane.right)
                && board.pieces(us, PieceKind::Rook).contains(lane.rook)
                && (occupied & lane.gap).is_empty()
                && (info.threats & lane.king_walk).is_empty()
            {
                moves.push(Move::castle(lane.king_from, lane.king_to));
            }
        }
    }
    moves
}

fn push_pawn_moves(moves: &mut MoveList, from: Square, to: Square) {
    match to.rank() {
        Rank::One | Rank::Eight => {
            moves.push(Move::promotion(from, to, Promotion::Queen));
            moves.push(Move::promotion(from, to, Promotion::Rook));
            moves.push(Move::promotion(from, to, Promotion::Bishop));
            moves.push(Move::promotion(from, to, Promotion::Knight));
        },
        _ => moves.push(Move::regular(from, to)),
    }
}

// The captured pawn sits next to the destination square, not on it, so the
// capture is replayed against the enemy sliders and leapers to see whether
// the king is left exposed. This uniformly covers pins along the capture
// diagonal, en passant as a check evasion, and the discovered rank attack
// after both pawns disappear from it.
fn en_passant_is_legal(position: &Position, from: Square, to: Square) -> bool {
    let us = position.us();
    let they = position.they();
    let board = position.board();
    let captured = to
        .shift(they.push_direction())
        .expect("en passant target has the captured pawn next to it");
    let occupied_after =
        (board.occupied() - Bitboard::from(from) - Bitboard::from(captured)) | Bitboard::from(to);
    let open_after = !occupied_after;
    let enemy = board.occupancy(they);
    let king = board.pieces(us, PieceKind::King);
    let diagonal_sliders = (board.bishops | board.queens) & enemy;
    let orthogonal_sliders = (board.rooks | board.queens) & enemy;
    let enemy_pawns = (board.pawns & enemy) - Bitboard::from(captured);
    let checks = (attacks::bishop_attacks(king, open_after) & diagonal_sliders)
        | (attacks::rook_attacks(king, open_after) & orthogonal_sliders)
        | (attacks::knight_attacks(king) & board.knights & enemy)
        | (attacks::pawn_attacks(king, us) & enemy_pawns);
    checks.is_empty()
}
