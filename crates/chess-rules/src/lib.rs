//! Chess rules engine for interactive hosts.
//!
//! This crate implements the rules of chess over a piece-arena position
//! model:
//! - [`Position`] - pieces, captures, turn, and the en passant target
//! - [`all_moves`] / [`is_attacked`] / [`valid_moves`] - pseudo-legal
//!   generation, attack detection, and legality filtering
//! - [`Game`] - the turn state machine with asynchronous host
//!   interactions for promotion choices and end-of-game announcements
//!
//! # Architecture
//!
//! Pieces are records with stable identity held in insertion order; moves
//! are data ([`MoveDescriptor`](chess_core::MoveDescriptor)) describing
//! relocations and captured squares. Legality is decided by applying a
//! candidate to a cloned position and testing whether the mover's king is
//! attacked, which keeps the hot path simple and the hypothetical boards
//! fully independent of the live one.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_rules::{Game, PlayOutcome};
//!
//! # futures_util::future::FutureExt::now_or_never(async {
//! let mut game = Game::standard();
//! let pawn = game.at(4, 1).unwrap().id();
//! let outcome = game.play(pawn, Square::new(4, 3).unwrap()).await;
//! assert_eq!(outcome, PlayOutcome::Applied);
//! # }).unwrap();
//! ```

mod event;
mod game;
mod interact;
mod movegen;
mod position;

pub use event::GameEvent;
pub use game::{EndRule, Game, Outcome, PlayOutcome};
pub use interact::{AutoInteractions, Interactions};
pub use movegen::{all_moves, is_attacked, valid_moves, Scope};
pub use position::{AppliedMove, Piece, Position};
