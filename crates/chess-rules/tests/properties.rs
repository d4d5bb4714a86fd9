//! Property tests over randomly generated sparse positions.

use chess_core::{Color, PieceKind, Placement, Setup, Square};
use chess_rules::{all_moves, valid_moves, Position, Scope};
use proptest::prelude::*;

const EXTRA_KINDS: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
];

/// A setup with one king per color plus up to eleven assorted pieces, all
/// on distinct squares.
fn arb_setup() -> impl Strategy<Value = Setup> {
    (
        prop::collection::hash_set((0u8..8, 0u8..8), 2..14),
        prop::collection::vec((any::<bool>(), 0usize..EXTRA_KINDS.len()), 12),
        any::<bool>(),
    )
        .prop_map(|(squares, extras, white_to_move)| {
            let squares: Vec<(u8, u8)> = squares.into_iter().collect();
            let mut placements = vec![
                Placement::new(Color::White, PieceKind::King, squares[0].0, squares[0].1),
                Placement::new(Color::Black, PieceKind::King, squares[1].0, squares[1].1),
            ];
            for (i, &(x, y)) in squares.iter().enumerate().skip(2) {
                let (white, kind) = extras[i - 2];
                let color = if white { Color::White } else { Color::Black };
                placements.push(Placement::new(color, EXTRA_KINDS[kind], x, y));
            }
            Setup {
                turn: if white_to_move {
                    Color::White
                } else {
                    Color::Black
                },
                placements,
            }
        })
}

proptest! {
    /// Applying a pseudo-legal move touches exactly the squares it names:
    /// relocated pieces land on their targets, captured occupants leave
    /// the board, and everything else stays where it was.
    #[test]
    fn apply_touches_only_named_squares(setup in arb_setup()) {
        let position = Position::from_setup(&setup).unwrap();
        for piece in position.pieces() {
            for mv in all_moves(&position, piece.id(), Scope::Play) {
                let mut board = position.clone();
                board.apply(&mv);

                for before in position.pieces() {
                    if let Some(relocation) =
                        mv.relocations().iter().find(|r| r.piece == before.id())
                    {
                        let after = board.piece(before.id()).expect("relocated piece stays live");
                        prop_assert_eq!(after.square(), relocation.to);
                    } else {
                        match board.piece(before.id()) {
                            Some(after) => prop_assert_eq!(after.square(), before.square()),
                            None => prop_assert!(mv.captures().contains(&before.square())),
                        }
                    }
                }
            }
        }
    }

    /// Legal destinations are always a subset of pseudo-legal ones.
    #[test]
    fn valid_destinations_subset_of_pseudo_legal(setup in arb_setup()) {
        let position = Position::from_setup(&setup).unwrap();
        for piece in position.pieces() {
            let pseudo: Vec<Square> = all_moves(&position, piece.id(), Scope::Attack)
                .iter()
                .map(|m| m.destination())
                .collect();
            for legal in valid_moves(&position, piece.id()) {
                prop_assert!(pseudo.contains(&legal.destination()));
            }
        }
    }

    /// No single move removes more than one piece; castling removes none.
    #[test]
    fn moves_capture_at_most_one(setup in arb_setup()) {
        let position = Position::from_setup(&setup).unwrap();
        for piece in position.pieces() {
            for mv in all_moves(&position, piece.id(), Scope::Play) {
                prop_assert!(mv.captures().len() <= 1);
                if mv.is_castle() {
                    prop_assert!(mv.captures().is_empty());
                }
            }
        }
    }
}
