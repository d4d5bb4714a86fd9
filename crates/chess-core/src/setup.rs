//! Board setups.
//!
//! A [`Setup`] is the host-facing description of a position: whose turn it
//! is plus a list of piece placements. It is plain serializable data so
//! hosts can ship custom positions as JSON.

use crate::{Color, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors detected when a position is built from a [`Setup`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("placement at ({x}, {y}) is off the board")]
    SquareOffBoard { x: u8, y: u8 },

    #[error("two placements share square {0}")]
    DuplicateSquare(Square),
}

/// A single piece placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub color: Color,
    pub kind: PieceKind,
    pub x: u8,
    pub y: u8,
    /// Whether the piece counts as having already moved (affects castling
    /// and pawn double steps).
    #[serde(default)]
    pub moved: bool,
    /// Whether this pawn just made a double step and can be captured en
    /// passant on the first move of the setup.
    #[serde(default)]
    pub double_step: bool,
}

impl Placement {
    /// Creates a placement with `moved` and `double_step` unset.
    pub fn new(color: Color, kind: PieceKind, x: u8, y: u8) -> Self {
        Placement {
            color,
            kind,
            x,
            y,
            moved: false,
            double_step: false,
        }
    }

    /// Marks the piece as having already moved.
    pub fn mark_moved(mut self) -> Self {
        self.moved = true;
        self
    }

    /// Marks the pawn as an en passant target.
    pub fn mark_double_step(mut self) -> Self {
        self.double_step = true;
        self
    }

    /// Returns the placement square, if it is on the board.
    pub fn square(&self) -> Option<Square> {
        Square::new(self.x, self.y)
    }
}

/// A complete board setup: starting turn plus placements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub turn: Color,
    pub placements: Vec<Placement>,
}

impl Setup {
    /// The standard 32-piece starting position, white to move.
    pub fn standard() -> Self {
        use Color::{Black, White};
        use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};

        let mut placements = vec![
            Placement::new(White, Rook, 0, 0),
            Placement::new(White, Knight, 1, 0),
            Placement::new(White, Bishop, 2, 0),
            Placement::new(White, Queen, 3, 0),
            Placement::new(White, King, 4, 0),
            Placement::new(White, Bishop, 5, 0),
            Placement::new(White, Knight, 6, 0),
            Placement::new(White, Rook, 7, 0),
        ];
        for x in 0..8 {
            placements.push(Placement::new(White, Pawn, x, 1));
        }
        placements.extend([
            Placement::new(Black, Rook, 0, 7),
            Placement::new(Black, Knight, 1, 7),
            Placement::new(Black, Bishop, 2, 7),
            Placement::new(Black, Queen, 3, 7),
            Placement::new(Black, King, 4, 7),
            Placement::new(Black, Bishop, 5, 7),
            Placement::new(Black, Knight, 6, 7),
            Placement::new(Black, Rook, 7, 7),
        ]);
        for x in 0..8 {
            placements.push(Placement::new(Black, Pawn, x, 6));
        }

        Setup {
            turn: Color::White,
            placements,
        }
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_setup_counts() {
        let setup = Setup::standard();
        assert_eq!(setup.turn, Color::White);
        assert_eq!(setup.placements.len(), 32);

        let whites = setup
            .placements
            .iter()
            .filter(|p| p.color == Color::White)
            .count();
        assert_eq!(whites, 16);

        let kings: Vec<_> = setup
            .placements
            .iter()
            .filter(|p| p.kind == PieceKind::King)
            .collect();
        assert_eq!(kings.len(), 2);
        assert_eq!((kings[0].x, kings[0].y), (4, 0));
        assert_eq!((kings[1].x, kings[1].y), (4, 7));
    }

    #[test]
    fn standard_setup_squares_distinct() {
        let setup = Setup::standard();
        let mut squares: Vec<_> = setup.placements.iter().map(|p| (p.x, p.y)).collect();
        squares.sort();
        squares.dedup();
        assert_eq!(squares.len(), 32);
    }

    #[test]
    fn placement_builders() {
        let p = Placement::new(Color::Black, PieceKind::Pawn, 4, 3)
            .mark_moved()
            .mark_double_step();
        assert!(p.moved);
        assert!(p.double_step);
        assert_eq!(p.square(), Square::new(4, 3));
    }

    #[test]
    fn placement_off_board_square() {
        let p = Placement::new(Color::White, PieceKind::Rook, 9, 0);
        assert_eq!(p.square(), None);
    }

    #[test]
    fn setup_serde_roundtrip() {
        let setup = Setup {
            turn: Color::Black,
            placements: vec![
                Placement::new(Color::White, PieceKind::King, 4, 0),
                Placement::new(Color::Black, PieceKind::King, 4, 7).mark_moved(),
                Placement::new(Color::White, PieceKind::Pawn, 4, 3).mark_double_step(),
            ],
        };
        let json = serde_json::to_string(&setup).unwrap();
        let back: Setup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, setup);
    }

    #[test]
    fn setup_optional_fields_default() {
        let json = r#"{
            "turn": "white",
            "placements": [
                { "color": "white", "kind": "king", "x": 4, "y": 0 }
            ]
        }"#;
        let setup: Setup = serde_json::from_str(json).unwrap();
        assert!(!setup.placements[0].moved);
        assert!(!setup.placements[0].double_step);
    }
}
