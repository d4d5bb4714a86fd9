//! Turn flow and game lifecycle.
//!
//! [`Game`] wraps a [`Position`] with the turn state machine: it accepts
//! play requests, consults the legality filter, applies accepted moves
//! (suspending for the host's promotion choice when a pawn reaches its last
//! rank), and detects the end of the game after every move. Rule
//! violations are not errors: a rejected request leaves the position
//! untouched and reports why through [`PlayOutcome`], so hosts that already
//! filter against [`valid_moves`](Game::valid_moves) can ignore the
//! outcome entirely.

use crate::event::GameEvent;
use crate::interact::{AutoInteractions, Interactions};
use crate::movegen::{is_attacked, valid_moves};
use crate::position::{Piece, Position};
use chess_core::{Color, MoveDescriptor, PieceId, Setup, SetupError, Square};
use std::sync::Arc;

/// How a position with no legal reply is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndRule {
    /// Any stuck opponent loses, stalemate included.
    #[default]
    LastMoverWins,
    /// Checkmate wins, stalemate draws.
    Standard,
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The given color won.
    Win(Color),
    /// Stalemate under [`EndRule::Standard`].
    Draw,
}

/// What a play request did.
///
/// Only [`Applied`](PlayOutcome::Applied) mutates the game; every other
/// variant is a no-op on the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PlayOutcome {
    /// The move (and any promotion) was fully applied.
    Applied,
    /// The piece does not belong to the side to move.
    NotYourTurn,
    /// The target is not a legal destination for the piece.
    Illegal,
    /// The game already ended; no further moves are accepted.
    GameOver,
}

/// A chess game: position, turn flow, and host interactions.
pub struct Game {
    setup: Setup,
    position: Position,
    interactions: Arc<dyn Interactions>,
    end_rule: EndRule,
    outcome: Option<Outcome>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Creates a game with auto-resolving interactions (queen promotion,
    /// immediate end acknowledgement).
    pub fn new(setup: Setup) -> Result<Self, SetupError> {
        Self::with_interactions(setup, Arc::new(AutoInteractions))
    }

    /// Creates a game with host-supplied interactions.
    pub fn with_interactions(
        setup: Setup,
        interactions: Arc<dyn Interactions>,
    ) -> Result<Self, SetupError> {
        let position = Position::from_setup(&setup)?;
        Ok(Game {
            setup,
            position,
            interactions,
            end_rule: EndRule::default(),
            outcome: None,
            events: Vec::new(),
        })
    }

    /// Creates a game from the standard starting position.
    pub fn standard() -> Self {
        Self::new(Setup::standard()).expect("standard setup is valid")
    }

    /// Selects how stuck positions are scored.
    pub fn with_end_rule(mut self, rule: EndRule) -> Self {
        self.end_rule = rule;
        self
    }

    /// Returns all live pieces in stable order.
    pub fn pieces(&self) -> &[Piece] {
        self.position.pieces()
    }

    /// Returns the captured white pieces in capture order.
    pub fn removed_white(&self) -> &[Piece] {
        self.position.removed(Color::White)
    }

    /// Returns the captured black pieces in capture order.
    pub fn removed_black(&self) -> &[Piece] {
        self.position.removed(Color::Black)
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Returns the piece standing on (`x`, `y`), if the coordinates are on
    /// the board and occupied.
    pub fn at(&self, x: u8, y: u8) -> Option<&Piece> {
        Square::new(x, y).and_then(|square| self.position.at(square))
    }

    /// Returns the live piece with the given id.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.position.piece(id)
    }

    /// Returns the legal moves of a piece; the move-hint surface for hosts.
    pub fn valid_moves(&self, piece: PieceId) -> Vec<MoveDescriptor> {
        valid_moves(&self.position, piece)
    }

    /// Returns the position for read-only inspection.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the outcome once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Takes the buffered events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Requests that `piece` move to `target`.
    ///
    /// Resolves once the move and any promotion choice are fully applied.
    /// The future borrows the game mutably, so a second request cannot
    /// start until the first settles.
    pub async fn play(&mut self, piece: PieceId, target: Square) -> PlayOutcome {
        if self.outcome.is_some() {
            return PlayOutcome::GameOver;
        }
        let Some(mover) = self.position.piece(piece) else {
            return PlayOutcome::Illegal;
        };
        let mover_color = mover.color();
        if mover_color != self.position.turn() {
            return PlayOutcome::NotYourTurn;
        }
        let Some(descriptor) = valid_moves(&self.position, piece)
            .into_iter()
            .find(|m| m.destination() == target)
        else {
            return PlayOutcome::Illegal;
        };

        tracing::debug!(mover = %mover_color, mv = %descriptor, kind = ?descriptor.kind(), "applying move");

        for &square in descriptor.captures() {
            if let Some(victim) = self.position.at(square) {
                self.events.push(GameEvent::Captured {
                    piece: victim.id(),
                    square,
                });
            }
        }
        for relocation in descriptor.relocations() {
            self.events.push(GameEvent::Moved {
                piece: relocation.piece,
                from: relocation.from,
                to: relocation.to,
            });
        }

        let applied = self.position.apply(&descriptor);

        if let Some(pawn) = applied.promotion {
            let interactions = Arc::clone(&self.interactions);
            let kind = interactions.choose_promotion(mover_color).await;
            self.position.promote(pawn, kind);
            self.events.push(GameEvent::Promoted { piece: pawn, kind });
        }

        self.position.flip_turn();
        self.events.push(GameEvent::TurnChanged(self.position.turn()));

        if !self.any_legal_move(self.position.turn()) {
            let outcome = self.score_stuck_opponent(mover_color);
            self.outcome = Some(outcome);
            self.events.push(GameEvent::Ended(outcome));
            tracing::debug!(?outcome, "game over");
            let interactions = Arc::clone(&self.interactions);
            interactions.announce_end(outcome).await;
        }

        PlayOutcome::Applied
    }

    /// [`play`](Game::play) addressed by coordinates, the way pointer-based
    /// hosts issue it. Off-board coordinates are illegal.
    pub async fn play_at(&mut self, piece: PieceId, x: u8, y: u8) -> PlayOutcome {
        match Square::new(x, y) {
            Some(target) => self.play(piece, target).await,
            None => PlayOutcome::Illegal,
        }
    }

    /// Rebuilds the position from the game's setup and reopens play.
    pub fn reset(&mut self) {
        self.position = Position::from_setup(&self.setup).expect("setup validated at construction");
        self.outcome = None;
        self.events.clear();
    }

    /// Replaces the setup and rebuilds the position from it.
    pub fn reset_to(&mut self, setup: Setup) -> Result<(), SetupError> {
        self.position = Position::from_setup(&setup)?;
        self.setup = setup;
        self.outcome = None;
        self.events.clear();
        Ok(())
    }

    fn any_legal_move(&self, color: Color) -> bool {
        self.position
            .pieces_of(color)
            .any(|piece| !valid_moves(&self.position, piece.id()).is_empty())
    }

    fn score_stuck_opponent(&self, winner: Color) -> Outcome {
        match self.end_rule {
            EndRule::LastMoverWins => Outcome::Win(winner),
            EndRule::Standard => {
                let in_check = self
                    .position
                    .king(self.position.turn())
                    .is_some_and(|king| is_attacked(&self.position, king.square(), winner));
                if in_check {
                    Outcome::Win(winner)
                } else {
                    Outcome::Draw
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{PieceKind, Placement};

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    fn game(turn: Color, placements: Vec<Placement>) -> Game {
        Game::new(Setup { turn, placements }).unwrap()
    }

    #[tokio::test]
    async fn applied_move_flips_turn() {
        let mut game = Game::standard();
        let pawn = game.at(4, 1).unwrap().id();
        assert_eq!(game.play(pawn, sq(4, 3)).await, PlayOutcome::Applied);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.at(4, 3).unwrap().id(), pawn);
        assert!(game.at(4, 1).is_none());
    }

    #[tokio::test]
    async fn wrong_turn_is_rejected_without_mutation() {
        let mut game = Game::standard();
        let black_pawn = game.at(4, 6).unwrap().id();
        assert_eq!(game.play(black_pawn, sq(4, 4)).await, PlayOutcome::NotYourTurn);
        assert_eq!(game.turn(), Color::White);
        assert!(game.at(4, 6).is_some());
        assert!(game.drain_events().is_empty());
    }

    #[tokio::test]
    async fn illegal_destination_is_rejected_without_mutation() {
        let mut game = Game::standard();
        let pawn = game.at(4, 1).unwrap().id();
        assert_eq!(game.play(pawn, sq(4, 5)).await, PlayOutcome::Illegal);
        assert_eq!(game.turn(), Color::White);
        assert!(game.at(4, 1).is_some());
        assert!(game.drain_events().is_empty());

        assert_eq!(game.play_at(pawn, 4, 9).await, PlayOutcome::Illegal);
    }

    #[tokio::test]
    async fn capture_emits_events_in_order() {
        let mut game = game(
            Color::White,
            vec![
                Placement::new(Color::White, PieceKind::King, 4, 0),
                Placement::new(Color::Black, PieceKind::King, 4, 7),
                Placement::new(Color::White, PieceKind::Rook, 0, 0),
                Placement::new(Color::Black, PieceKind::Knight, 0, 5),
            ],
        );
        let rook = game.at(0, 0).unwrap().id();
        let knight = game.at(0, 5).unwrap().id();
        assert_eq!(game.play(rook, sq(0, 5)).await, PlayOutcome::Applied);

        let events = game.drain_events();
        assert_eq!(
            events[0],
            GameEvent::Captured {
                piece: knight,
                square: sq(0, 5)
            }
        );
        assert_eq!(
            events[1],
            GameEvent::Moved {
                piece: rook,
                from: sq(0, 0),
                to: sq(0, 5)
            }
        );
        assert_eq!(events[2], GameEvent::TurnChanged(Color::Black));
        assert_eq!(game.removed_black().len(), 1);
        assert_eq!(game.drain_events(), Vec::new());
    }

    #[tokio::test]
    async fn reset_restores_the_setup() {
        let mut game = Game::standard();
        let pawn = game.at(4, 1).unwrap().id();
        let _ = game.play(pawn, sq(4, 3)).await;
        game.reset();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.pieces().len(), 32);
        assert!(game.at(4, 1).is_some());
        assert!(game.at(4, 3).is_none());
        assert!(game.drain_events().is_empty());
    }

    #[tokio::test]
    async fn reset_to_swaps_the_setup() {
        let mut game = Game::standard();
        game.reset_to(Setup {
            turn: Color::Black,
            placements: vec![
                Placement::new(Color::White, PieceKind::King, 0, 0),
                Placement::new(Color::Black, PieceKind::King, 7, 7),
            ],
        })
        .unwrap();
        assert_eq!(game.pieces().len(), 2);
        assert_eq!(game.turn(), Color::Black);

        // the stored setup is the new one
        game.reset();
        assert_eq!(game.pieces().len(), 2);
    }
}
