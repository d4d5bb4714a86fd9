//! Move generation, attack detection, and legality filtering.
//!
//! Generation is pseudo-legal: it respects movement geometry and occupancy
//! but not self-check. [`valid_moves`] layers legality on top by applying
//! each candidate to a cloned position and asking [`is_attacked`] about the
//! mover's king.

use crate::position::{Piece, Position};
use chess_core::{Color, MoveDescriptor, MoveKind, PieceId, PieceKind, Relocation, Square};

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// What a generation pass is for.
///
/// `Attack` is used while answering "is this square attacked?"; it
/// generates castling unconditionally, which keeps attack detection from
/// recursing back into itself through the castling safety condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Real move candidates for the legality filter.
    Play,
    /// Attack coverage for check detection.
    Attack,
}

/// Generates the pseudo-legal moves of one piece.
///
/// An id that resolves to no live piece yields no moves.
pub fn all_moves(position: &Position, piece: PieceId, scope: Scope) -> Vec<MoveDescriptor> {
    let Some(piece) = position.piece(piece) else {
        return Vec::new();
    };
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(position, piece),
        PieceKind::Rook => trace(position, piece, &ORTHOGONAL),
        PieceKind::Knight => jump_moves(position, piece, &KNIGHT_JUMPS),
        PieceKind::Bishop => trace(position, piece, &DIAGONAL),
        PieceKind::Queen => trace(position, piece, &ALL_DIRECTIONS),
        PieceKind::King => king_moves(position, piece, scope),
    }
}

/// Returns true if any piece of `by` color attacks `square`.
///
/// A square is attacked when some pseudo-legal move of that color lists it
/// among its captures.
pub fn is_attacked(position: &Position, square: Square, by: Color) -> bool {
    position.pieces_of(by).any(|piece| {
        all_moves(position, piece.id(), Scope::Attack)
            .iter()
            .any(|mv| mv.captures().contains(&square))
    })
}

/// Returns the legal moves of one piece: pseudo-legal candidates that do
/// not leave the mover's own king attacked.
///
/// Each candidate is applied to a cloned position; if the clone has no king
/// of the mover's color, no check is possible and the candidate stands.
pub fn valid_moves(position: &Position, piece: PieceId) -> Vec<MoveDescriptor> {
    let Some(piece) = position.piece(piece) else {
        return Vec::new();
    };
    let color = piece.color();
    let id = piece.id();

    all_moves(position, id, Scope::Play)
        .into_iter()
        .filter(|candidate| {
            let mut board = position.clone();
            board.apply(candidate);
            match board.king(color) {
                Some(king) => !is_attacked(&board, king.square(), color.opposite()),
                None => true,
            }
        })
        .collect()
}

fn pawn_moves(position: &Position, pawn: &Piece) -> Vec<MoveDescriptor> {
    let mut moves = Vec::new();
    let from = pawn.square();
    let dy = pawn.color().forward();

    if let Some(one) = from.offset(0, dy) {
        if position.at(one).is_none() {
            moves.push(MoveDescriptor::plain(pawn.id(), from, one));
            if from.rank() == pawn.color().home_rank() {
                if let Some(two) = from.offset(0, 2 * dy) {
                    if position.at(two).is_none() {
                        moves.push(MoveDescriptor::double_step(pawn.id(), from, two));
                    }
                }
            }
        }
    }

    for dx in [-1, 1] {
        if let Some(to) = from.offset(dx, dy) {
            if let Some(other) = position.at(to) {
                if other.color() != pawn.color() {
                    moves.push(MoveDescriptor::capture(pawn.id(), from, to));
                }
            }
        }
    }

    // En passant: the target pawn stands beside us and is removed from a
    // square other than the one we land on.
    if let Some(target) = position.en_passant() {
        let adjacent = target.rank() == from.rank()
            && (target.file() as i8 - from.file() as i8).abs() == 1;
        if adjacent {
            if let Some(victim) = position.at(target) {
                if victim.color() != pawn.color() && victim.kind() == PieceKind::Pawn {
                    if let Some(to) = target.offset(0, dy) {
                        if position.at(to).is_none() {
                            moves.push(MoveDescriptor::en_passant(pawn.id(), from, to, target));
                        }
                    }
                }
            }
        }
    }

    moves
}

fn trace(position: &Position, piece: &Piece, directions: &[(i8, i8)]) -> Vec<MoveDescriptor> {
    let mut moves = Vec::new();
    let from = piece.square();

    for &(dx, dy) in directions {
        let mut square = from;
        while let Some(next) = square.offset(dx, dy) {
            match position.at(next) {
                Some(other) => {
                    if other.color() != piece.color() {
                        moves.push(MoveDescriptor::capture(piece.id(), from, next));
                    }
                    break;
                }
                None => {
                    moves.push(MoveDescriptor::plain(piece.id(), from, next));
                    square = next;
                }
            }
        }
    }

    moves
}

fn jump_moves(position: &Position, piece: &Piece, offsets: &[(i8, i8)]) -> Vec<MoveDescriptor> {
    let mut moves = Vec::new();
    let from = piece.square();

    for &(dx, dy) in offsets {
        let Some(to) = from.offset(dx, dy) else {
            continue;
        };
        match position.at(to) {
            None => moves.push(MoveDescriptor::plain(piece.id(), from, to)),
            Some(other) if other.color() != piece.color() => {
                moves.push(MoveDescriptor::capture(piece.id(), from, to));
            }
            Some(_) => {}
        }
    }

    moves
}

fn king_moves(position: &Position, king: &Piece, scope: Scope) -> Vec<MoveDescriptor> {
    let mut moves = jump_moves(position, king, &ALL_DIRECTIONS);
    castling_moves(position, king, scope, &mut moves);
    moves
}

/// Castling: neither the king nor the chosen rook has moved and the squares
/// strictly between them are empty. Under [`Scope::Play`] a currently
/// attacked king cannot castle. Squares the king passes through are
/// deliberately not checked for attacks.
fn castling_moves(position: &Position, king: &Piece, scope: Scope, moves: &mut Vec<MoveDescriptor>) {
    if king.has_moved() {
        return;
    }
    if scope == Scope::Play && is_attacked(position, king.square(), king.color().opposite()) {
        return;
    }

    let rank = king.square().rank();
    let sides = [
        (MoveKind::CastleKingside, 7u8, 6u8, 5u8),
        (MoveKind::CastleQueenside, 0u8, 2u8, 3u8),
    ];

    for (kind, rook_file, king_to, rook_to) in sides {
        let Some(corner) = Square::new(rook_file, rank) else {
            continue;
        };
        let Some(rook) = position.at(corner) else {
            continue;
        };
        if rook.color() != king.color() || rook.kind() != PieceKind::Rook || rook.has_moved() {
            continue;
        }

        let (low, high) = if rook_file < king.square().file() {
            (rook_file, king.square().file())
        } else {
            (king.square().file(), rook_file)
        };
        let clear = (low + 1..high)
            .all(|file| Square::new(file, rank).is_some_and(|sq| position.at(sq).is_none()));
        if !clear {
            continue;
        }

        let (Some(king_target), Some(rook_target)) =
            (Square::new(king_to, rank), Square::new(rook_to, rank))
        else {
            continue;
        };
        moves.push(MoveDescriptor::castle(
            kind,
            Relocation {
                piece: king.id(),
                from: king.square(),
                to: king_target,
            },
            Relocation {
                piece: rook.id(),
                from: corner,
                to: rook_target,
            },
        ));
    }
}
