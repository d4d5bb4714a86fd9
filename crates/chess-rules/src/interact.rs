//! Host interaction seam.
//!
//! The engine suspends in exactly two places: when a pawn must pick its
//! promotion kind and when the end of the game is announced. Both are
//! expressed as futures supplied by the host through [`Interactions`], so a
//! UI can show a modal dialog while a headless host resolves immediately.
//! The implementation is handed to the game at construction and never
//! replaced afterwards.

use crate::game::Outcome;
use chess_core::{Color, PieceKind};
use futures_util::future::{ready, BoxFuture, FutureExt};

/// Host-supplied choices and acknowledgements.
///
/// A future that never resolves stalls the engine on purpose: the game
/// makes no progress until the host answers, and there is no timeout or
/// cancellation. Callers must await one play before starting the next.
pub trait Interactions: Send + Sync {
    /// Chooses the kind a pawn of `color` promotes to.
    fn choose_promotion(&self, color: Color) -> BoxFuture<'_, PieceKind>;

    /// Announces the end of the game and resolves once acknowledged.
    fn announce_end(&self, outcome: Outcome) -> BoxFuture<'_, ()>;
}

/// The default host: promotes to queen, acknowledges immediately.
///
/// Keeps the engine usable with no UI attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoInteractions;

impl Interactions for AutoInteractions {
    fn choose_promotion(&self, _color: Color) -> BoxFuture<'_, PieceKind> {
        ready(PieceKind::Queen).boxed()
    }

    fn announce_end(&self, _outcome: Outcome) -> BoxFuture<'_, ()> {
        ready(()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn auto_interactions_resolve_immediately() {
        let auto = AutoInteractions;
        assert_eq!(
            auto.choose_promotion(Color::White).await,
            PieceKind::Queen
        );
        auto.announce_end(Outcome::Win(Color::Black)).await;
    }
}
