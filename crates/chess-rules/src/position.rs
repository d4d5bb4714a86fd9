//! Position representation.
//!
//! A [`Position`] owns the live pieces as a small arena in placement order,
//! the captured pieces per color in capture order, the turn, and the
//! single-ply en passant target. It knows how to apply a
//! [`MoveDescriptor`] but nothing about move legality; cloning a position
//! yields a fully independent copy, which is what the legality filter uses
//! for its hypothetical boards.

use chess_core::{Color, MoveDescriptor, PieceId, PieceKind, Setup, SetupError, Square};

/// A live or captured piece.
///
/// Identity ([`PieceId`]) and color are fixed at creation; the kind changes
/// only through promotion, the square through relocation, and `moved` goes
/// from false to true exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    color: Color,
    kind: PieceKind,
    square: Square,
    moved: bool,
}

impl Piece {
    /// Returns the piece's stable identity.
    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the piece's color.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the piece's current kind.
    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the square the piece stands on (its last square, if
    /// captured).
    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// Returns true once the piece has moved.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }
}

/// What applying a move did, beyond the board mutation itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// Pieces removed from the board, in removal order.
    pub captured: Vec<PieceId>,
    /// A pawn that reached its promotion rank and awaits a kind choice.
    pub promotion: Option<PieceId>,
}

/// Complete mutable chess state: pieces, captures, turn, en passant target.
#[derive(Debug, Clone)]
pub struct Position {
    pieces: Vec<Piece>,
    removed: [Vec<Piece>; 2],
    turn: Color,
    en_passant: Option<Square>,
}

impl Position {
    /// Builds a position from a setup.
    ///
    /// Pieces are created in placement order and keep that relative order
    /// for their whole life. The en passant target comes from the last
    /// placement flagged `double_step`, if any.
    pub fn from_setup(setup: &Setup) -> Result<Self, SetupError> {
        let mut pieces: Vec<Piece> = Vec::with_capacity(setup.placements.len());
        let mut en_passant = None;

        for (index, placement) in setup.placements.iter().enumerate() {
            let square = placement.square().ok_or(SetupError::SquareOffBoard {
                x: placement.x,
                y: placement.y,
            })?;
            if pieces.iter().any(|p| p.square == square) {
                return Err(SetupError::DuplicateSquare(square));
            }
            if placement.double_step {
                en_passant = Some(square);
            }
            pieces.push(Piece {
                id: PieceId::new(index as u32),
                color: placement.color,
                kind: placement.kind,
                square,
                moved: placement.moved,
            });
        }

        Ok(Position {
            pieces,
            removed: [Vec::new(), Vec::new()],
            turn: setup.turn,
            en_passant,
        })
    }

    /// Returns the live piece on `square`, if any.
    pub fn at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    /// Returns the live piece with the given id, if it has not been
    /// captured.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Returns all live pieces in stable order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns the live pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    /// Returns the king of the given color.
    ///
    /// `None` is a valid answer (the king may have been captured on a
    /// hypothetical board); callers treat it as "no check possible".
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.color == color && p.kind == PieceKind::King)
    }

    /// Returns the captured pieces of one color, in capture order.
    pub fn removed(&self, color: Color) -> &[Piece] {
        &self.removed[color.index()]
    }

    /// Returns the side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Passes the turn to the other side.
    pub fn flip_turn(&mut self) {
        self.turn = self.turn.opposite();
    }

    /// Returns the square of the pawn that just double-stepped, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Applies a move descriptor.
    ///
    /// Captures are processed first, then the en passant target is cleared,
    /// then each relocation is carried out in order; a pawn relocation
    /// spanning two ranks re-arms the en passant target. The caller decides
    /// what to do about a reported promotion (see
    /// [`promote`](Position::promote)).
    pub fn apply(&mut self, mv: &MoveDescriptor) -> AppliedMove {
        let mut captured = Vec::new();
        for &square in mv.captures() {
            if let Some(index) = self.pieces.iter().position(|p| p.square == square) {
                let piece = self.pieces.remove(index);
                captured.push(piece.id);
                self.removed[piece.color.index()].push(piece);
            }
        }

        self.en_passant = None;

        let mut promotion = None;
        for relocation in mv.relocations() {
            let Some(piece) = self.piece_mut(relocation.piece) else {
                continue;
            };
            piece.square = relocation.to;
            piece.moved = true;
            let kind = piece.kind;
            let color = piece.color;
            let id = piece.id;
            if kind == PieceKind::Pawn {
                let span = (relocation.to.rank() as i8 - relocation.from.rank() as i8).abs();
                if span == 2 {
                    self.en_passant = Some(relocation.to);
                }
                if relocation.to.rank() == color.promotion_rank() {
                    promotion = Some(id);
                }
            }
        }

        AppliedMove {
            captured,
            promotion,
        }
    }

    /// Replaces a pawn's kind after a promotion choice resolved.
    pub fn promote(&mut self, id: PieceId, kind: PieceKind) {
        if let Some(piece) = self.piece_mut(id) {
            piece.kind = kind;
        }
    }
}
