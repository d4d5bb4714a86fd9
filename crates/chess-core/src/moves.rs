//! Move representation.
//!
//! A move is described as data, not behavior: an ordered list of
//! [`Relocation`]s (one for ordinary moves, two for castling) plus a list of
//! squares whose occupants are captured. The capture square usually equals
//! the destination, but differs for en passant, which is why it is listed
//! separately.

use crate::{PieceId, Square};
use std::fmt;

/// Classification of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain relocation onto an empty square.
    Normal,
    /// Pawn double step from its home rank.
    DoubleStep,
    /// Capture of the piece on the destination square.
    Capture,
    /// En passant capture; the victim is not on the destination square.
    EnPassant,
    /// Kingside castling (king and rook relocate together).
    CastleKingside,
    /// Queenside castling.
    CastleQueenside,
}

/// A single piece relocation within a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relocation {
    /// The piece being relocated.
    pub piece: PieceId,
    /// Where it stands before the move.
    pub from: Square,
    /// Where it stands after the move.
    pub to: Square,
}

/// A fully described move.
///
/// `relocations[0]` is always the piece the move belongs to (the king, for
/// castling). `captures` lists every square whose occupant is removed when
/// the move is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDescriptor {
    kind: MoveKind,
    relocations: Vec<Relocation>,
    captures: Vec<Square>,
}

impl MoveDescriptor {
    /// A plain relocation onto an empty square.
    pub fn plain(piece: PieceId, from: Square, to: Square) -> Self {
        MoveDescriptor {
            kind: MoveKind::Normal,
            relocations: vec![Relocation { piece, from, to }],
            captures: Vec::new(),
        }
    }

    /// A pawn double step.
    pub fn double_step(piece: PieceId, from: Square, to: Square) -> Self {
        MoveDescriptor {
            kind: MoveKind::DoubleStep,
            relocations: vec![Relocation { piece, from, to }],
            captures: Vec::new(),
        }
    }

    /// A capture of the occupant of `to`.
    pub fn capture(piece: PieceId, from: Square, to: Square) -> Self {
        MoveDescriptor {
            kind: MoveKind::Capture,
            relocations: vec![Relocation { piece, from, to }],
            captures: vec![to],
        }
    }

    /// An en passant capture: the pawn lands on `to`, the victim stands on
    /// `victim`.
    pub fn en_passant(piece: PieceId, from: Square, to: Square, victim: Square) -> Self {
        MoveDescriptor {
            kind: MoveKind::EnPassant,
            relocations: vec![Relocation { piece, from, to }],
            captures: vec![victim],
        }
    }

    /// A castling move; `king` must come first.
    pub fn castle(kind: MoveKind, king: Relocation, rook: Relocation) -> Self {
        debug_assert!(matches!(
            kind,
            MoveKind::CastleKingside | MoveKind::CastleQueenside
        ));
        MoveDescriptor {
            kind,
            relocations: vec![king, rook],
            captures: Vec::new(),
        }
    }

    /// Returns the move classification.
    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the relocations, moving piece first.
    #[inline]
    pub fn relocations(&self) -> &[Relocation] {
        &self.relocations
    }

    /// Returns the squares whose occupants this move removes.
    #[inline]
    pub fn captures(&self) -> &[Square] {
        &self.captures
    }

    /// Returns the destination of the moving piece.
    #[inline]
    pub fn destination(&self) -> Square {
        self.relocations[0].to
    }

    /// Returns true for either castling variant.
    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::CastleKingside | MoveKind::CastleQueenside
        )
    }
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary = &self.relocations[0];
        write!(f, "{}{}", primary.from, primary.to)
    }
}
