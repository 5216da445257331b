/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use cmatrix::{
    build_contact_matrix, CastleSide, CheckDetection, Color, ContactBuilder, ContactIdentity,
    EvaluationTiming, EvaluatorConfig, Latch, PieceId, PieceKind, Position, Square,
};

fn id(bits: u8) -> PieceId {
    PieceId::new(bits).unwrap()
}

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

fn position_with(pieces: &[(u8, u8, u8)]) -> Position {
    let mut pos = Position::empty();
    for &(bits, row, col) in pieces {
        pos.place(id(bits), sq(row, col)).unwrap();
    }
    pos
}

fn contacts_of(pos: &Position, config: &EvaluatorConfig, from: u8) -> Vec<u8> {
    build_contact_matrix(pos, config)
        .matrix
        .contacts_of(id(from))
        .map(|to| to.inner())
        .collect()
}

#[cfg(test)]
mod initial_position {
    use super::*;

    #[test]
    fn test_rook_contacts() {
        let pos = Position::initial();
        assert_eq!(contacts_of(&pos, &EvaluatorConfig::default(), 1), [2, 9]);
    }

    #[test]
    fn test_queen_contacts() {
        let pos = Position::initial();
        assert_eq!(
            contacts_of(&pos, &EvaluatorConfig::default(), 4),
            [3, 5, 11, 12, 13]
        );
    }

    #[test]
    fn test_king_contacts() {
        let pos = Position::initial();
        let king = contacts_of(&pos, &EvaluatorConfig::default(), 5);
        for expected in [4, 6, 12, 13, 14] {
            assert!(king.contains(&expected), "King is missing contact {expected}");
        }
    }

    #[test]
    fn test_pawns_have_no_contacts() {
        let report = Position::initial().contacts();
        for color in Color::all() {
            for pawn in PieceId::pawns(color) {
                assert_eq!(report.matrix.contacts_of(pawn).count(), 0, "{pawn}");
            }
        }
    }

    #[test]
    fn test_no_threats_across_the_gap() {
        let report = Position::initial().contacts();
        assert!(report
            .matrix
            .iter()
            .all(|(from, to)| from.color() == to.color()));
    }

    #[test]
    fn test_kings_are_safe_and_blocked() {
        let report = Position::initial().contacts();
        for color in Color::all() {
            let king = report.king(color).unwrap();
            assert_eq!(king.king, PieceId::king(color));
            assert!(!king.in_check);
            assert!(!king.can_castle(CastleSide::QueenSide));
            assert!(!king.can_castle(CastleSide::KingSide));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let pos = Position::initial();
        for config in [EvaluatorConfig::default(), EvaluatorConfig::legacy()] {
            assert_eq!(
                build_contact_matrix(&pos, &config),
                build_contact_matrix(&pos, &config)
            );
        }
    }
}

#[cfg(test)]
mod contact_properties {
    use super::*;

    #[test]
    fn test_contacts_are_directed() {
        let report = Position::initial().contacts();

        // The Rook reaches the Pawn in front of it, but the Pawn only looks diagonally
        assert!(report.matrix.get(id(1), id(9)));
        assert!(!report.matrix.get(id(9), id(1)));
    }

    /// Places `bits` alone on `square` and returns how many squares its color reaches.
    fn lone_reach(bits: u8, square: Square) -> usize {
        let mut pos = Position::empty();
        pos.place(id(bits), square).unwrap();
        let report = pos.contacts();

        assert!(report.matrix.is_empty());
        assert_eq!(report.accessibility.total(id(bits).color().opponent()), 0);
        assert_eq!(report.accessibility.get(id(bits).color(), square), 0);
        report.accessibility.total(id(bits).color())
    }

    #[test]
    fn test_corner_pieces_stay_in_bounds() {
        for corner in [sq(0, 0), sq(0, 7), sq(7, 0), sq(7, 7)] {
            assert_eq!(lone_reach(1, corner), 14, "rook on {corner}");
            assert_eq!(lone_reach(2, corner), 2, "knight on {corner}");
            assert_eq!(lone_reach(3, corner), 7, "bishop on {corner}");
            assert_eq!(lone_reach(4, corner), 21, "queen on {corner}");
            assert_eq!(lone_reach(5, corner), 3, "king on {corner}");
            assert_eq!(lone_reach(9, corner), 0, "pawn on {corner}");
        }
    }

    #[test]
    fn test_edge_pieces_stay_in_bounds() {
        for edge in [sq(3, 0), sq(0, 3), sq(4, 7), sq(7, 4)] {
            assert_eq!(lone_reach(1, edge), 14, "rook on {edge}");
            assert_eq!(lone_reach(2, edge), 4, "knight on {edge}");
            assert_eq!(lone_reach(3, edge), 7, "bishop on {edge}");
            assert_eq!(lone_reach(4, edge), 21, "queen on {edge}");
            assert_eq!(lone_reach(5, edge), 5, "king on {edge}");
        }
    }

    #[test]
    fn test_corner_knight_squares() {
        let pos = position_with(&[(2, 0, 0)]);
        let report = pos.contacts();
        let reached: Vec<Square> = report
            .accessibility
            .of(Color::Black)
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(square, _)| square)
            .collect();
        assert_eq!(reached, vec![sq(1, 2), sq(2, 1)]);
    }

    #[test]
    fn test_lone_rook_accessibility() {
        let pos = position_with(&[(1, 7, 7)]);
        let report = pos.contacts();

        assert_eq!(report.accessibility.total(Color::Black), 14);
        assert_eq!(report.accessibility.total(Color::White), 0);
        assert_eq!(report.accessibility.get(Color::Black, sq(0, 7)), 1);
        assert_eq!(report.accessibility.get(Color::Black, sq(7, 7)), 0);
    }

    #[test]
    fn test_accessibility_accumulates() {
        // Both Rooks reach (3, 3)
        let pos = position_with(&[(25, 3, 0), (32, 7, 3)]);
        let report = pos.contacts();
        assert_eq!(report.accessibility.get(Color::White, sq(3, 3)), 2);
    }

    #[test]
    fn test_builder_never_decreases() {
        let pos = Position::initial();
        let mut builder = ContactBuilder::new(&pos, EvaluatorConfig::default());
        let mut previous = *builder.accessibility();
        let mut previous_matrix = *builder.matrix();

        for square in Square::iter() {
            builder.visit(square);
            let current = *builder.accessibility();
            for color in Color::all() {
                for cell in Square::iter() {
                    assert!(current.get(color, cell) >= previous.get(color, cell));
                }
            }
            for (from, to) in previous_matrix.iter() {
                assert!(builder.matrix().get(from, to));
            }
            previous = current;
            previous_matrix = *builder.matrix();
        }

        assert_eq!(builder.finish(), pos.contacts());
    }

    #[test]
    fn test_en_passant_contact() {
        // White Pawn 21 just stepped from (6, 4) to (4, 4), leaving its ghost on (5, 4)
        let mut pos = position_with(&[(21, 4, 4), (12, 4, 3)]);
        pos.mark_passed_pawn(sq(5, 4), id(21)).unwrap();

        let report = pos.contacts();
        assert!(report.matrix.get(id(12), id(21)));
        assert_eq!(report.matrix.len(), 1);

        pos.clear_passed_pawns();
        assert!(pos.contacts().matrix.is_empty());
    }
}

#[cfg(test)]
mod promotion {
    use super::*;

    fn promoted(identity: ContactIdentity) -> Position {
        let mut pos = position_with(&[(20, 4, 4), (1, 4, 7)]);
        pos.promote(id(20), id(28), identity).unwrap();
        pos
    }

    #[test]
    fn test_unpromoted_pawn_sees_nothing() {
        let pos = position_with(&[(20, 4, 4), (1, 4, 7)]);
        let report = pos.contacts();
        assert!(!report.matrix.get(id(20), id(1)));
        assert_eq!(report.accessibility.total(Color::White), 0);
    }

    #[test]
    fn test_contacts_recorded_under_promoted_id() {
        let report = promoted(ContactIdentity::Promoted).contacts();
        assert!(report.matrix.get(id(28), id(1)));
        assert!(!report.matrix.get(id(20), id(1)));
        assert!(report.accessibility.total(Color::White) > 0);
    }

    #[test]
    fn test_contacts_recorded_under_original_id() {
        let report = promoted(ContactIdentity::Original).contacts();
        assert!(report.matrix.get(id(20), id(1)));
        assert!(!report.matrix.get(id(28), id(1)));
    }

    #[test]
    fn test_promotion_is_validated() {
        let mut pos = Position::empty();
        // Not a Pawn
        assert!(pos.promote(id(1), id(4), ContactIdentity::Promoted).is_err());
        // Wrong color
        assert!(pos.promote(id(20), id(4), ContactIdentity::Promoted).is_err());
        // Kings are not a promotion target
        assert!(pos.promote(id(20), id(29), ContactIdentity::Promoted).is_err());

        assert!(pos.promote(id(20), id(26), ContactIdentity::Promoted).is_ok());
        assert!(pos.promote(id(20), id(28), ContactIdentity::Promoted).is_err());
        assert_eq!(pos.effective_kind(id(20)), PieceKind::Knight);
    }
}

#[cfg(test)]
mod king_safety {
    use super::*;

    fn castling_position() -> Position {
        position_with(&[
            (1, 0, 0),
            (5, 0, 4),
            (8, 0, 7),
            (25, 7, 0),
            (29, 7, 4),
            (32, 7, 7),
        ])
    }

    #[test]
    fn test_castling_offered_on_open_back_ranks() {
        let report = castling_position().contacts();
        for color in Color::all() {
            let king = report.king(color).unwrap();
            assert!(!king.in_check);
            assert!(king.can_castle(CastleSide::QueenSide));
            assert!(king.can_castle(CastleSide::KingSide));
        }
    }

    #[test]
    fn test_latches_forfeit_castling() {
        let mut pos = castling_position();
        pos.forfeit(Color::Black, Latch::KingMoved);
        pos.forfeit(Color::White, Latch::QueenSide);

        let report = pos.contacts();
        let black = report.king(Color::Black).unwrap();
        assert!(!black.can_castle(CastleSide::QueenSide));
        assert!(!black.can_castle(CastleSide::KingSide));

        let white = report.king(Color::White).unwrap();
        assert!(!white.can_castle(CastleSide::QueenSide));
        assert!(white.can_castle(CastleSide::KingSide));
    }

    #[test]
    fn test_in_scan_misses_later_pawn() {
        // The White Pawn on (1, 3) is scanned after the Black King on (0, 4)
        let pos = position_with(&[(5, 0, 4), (17, 1, 3)]);

        let legacy = build_contact_matrix(&pos, &EvaluatorConfig::legacy());
        assert!(legacy.matrix.get(id(17), id(5)));
        assert!(!legacy.king(Color::Black).unwrap().in_check);

        let deferred = EvaluatorConfig {
            timing: EvaluationTiming::AfterBuild,
            ..EvaluatorConfig::legacy()
        };
        let report = build_contact_matrix(&pos, &deferred);
        assert!(report.king(Color::Black).unwrap().in_check);

        let report = build_contact_matrix(&pos, &EvaluatorConfig::default());
        assert!(report.king(Color::Black).unwrap().in_check);
        assert!(report.king(Color::White).is_none());
    }

    #[test]
    fn test_in_scan_sees_earlier_pawn() {
        // The Black Pawn on (6, 3) is scanned before the White King on (7, 4)
        let pos = position_with(&[(29, 7, 4), (12, 6, 3)]);

        let report = build_contact_matrix(&pos, &EvaluatorConfig::legacy());
        assert!(report.matrix.get(id(12), id(29)));
        let king = report.king(Color::White).unwrap();
        assert!(king.in_check);
        assert!(!king.can_castle(CastleSide::QueenSide));
        assert!(!king.can_castle(CastleSide::KingSide));
    }

    #[test]
    fn test_castling_needs_rooks_at_home() {
        let pos = position_with(&[(5, 0, 4), (29, 7, 4)]);
        let report = pos.contacts();
        for color in Color::all() {
            let king = report.king(color).unwrap();
            assert!(!king.can_castle(CastleSide::QueenSide));
            assert!(!king.can_castle(CastleSide::KingSide));
        }

        let pos = position_with(&[(5, 3, 4), (1, 3, 0), (8, 3, 7)]);
        let king = *pos.contacts().king(Color::Black).unwrap();
        assert!(!king.can_castle(CastleSide::QueenSide));
        assert!(!king.can_castle(CastleSide::KingSide));
    }

    #[test]
    fn test_pawns_only_misses_queen() {
        let pos = position_with(&[(5, 0, 4), (28, 4, 4)]);

        let pawns_only = EvaluatorConfig {
            check: CheckDetection::PawnsOnly,
            ..EvaluatorConfig::default()
        };
        let report = build_contact_matrix(&pos, &pawns_only);
        assert!(report.matrix.get(id(28), id(5)));
        assert!(!report.king(Color::Black).unwrap().in_check);

        let report = build_contact_matrix(&pos, &EvaluatorConfig::default());
        let king = report.king(Color::Black).unwrap();
        assert!(king.in_check);
        assert!(!king.can_castle(CastleSide::KingSide));
    }

    #[test]
    fn test_transit_safety() {
        // The White Rook on (4, 5) reaches (0, 5), which the Black King passes castling king side
        let pos = position_with(&[(5, 0, 4), (8, 0, 7), (32, 4, 5)]);

        let legacy = build_contact_matrix(&pos, &EvaluatorConfig::legacy());
        assert!(legacy
            .king(Color::Black)
            .unwrap()
            .can_castle(CastleSide::KingSide));

        let report = build_contact_matrix(&pos, &EvaluatorConfig::default());
        let king = report.king(Color::Black).unwrap();
        assert!(!king.in_check);
        assert!(!king.can_castle(CastleSide::KingSide));
    }
}
