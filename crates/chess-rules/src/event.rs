//! Discrete notifications emitted by the game.
//!
//! Hosts that render or log the game subscribe by draining
//! [`Game::drain_events`](crate::Game::drain_events) after each play; the
//! engine itself holds no rendering dependency.

use crate::game::Outcome;
use chess_core::{Color, PieceId, PieceKind, Square};

/// Something observable that happened while a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece relocated (castling emits two of these).
    Moved {
        piece: PieceId,
        from: Square,
        to: Square,
    },
    /// A piece was removed from the board.
    Captured { piece: PieceId, square: Square },
    /// A pawn's kind was replaced after a promotion choice.
    Promoted { piece: PieceId, kind: PieceKind },
    /// The turn passed to the given color.
    TurnChanged(Color),
    /// The game reached its terminal state.
    Ended(Outcome),
}
