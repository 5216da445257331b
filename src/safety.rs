/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{
    covers, pawn_attack_squares, Accessibility, Color, ContactMatrix, Latch, PieceId, PieceKind,
    Position, Square,
};

/// How a King is determined to be in check.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum CheckDetection {
    /// Only looks for a recorded contact from one of the enemy Pawn ids onto the King.
    ///
    /// Threats from sliders, Knights, and the enemy King are not seen.
    PawnsOnly,

    /// Asks every enemy piece whether its movement reaches the King's square.
    #[default]
    Full,
}

/// When Kings are evaluated relative to the matrix scan.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum EvaluationTiming {
    /// As soon as the King's square is scanned, seeing only the contacts of earlier squares.
    InScan,

    /// Once the whole matrix has been built.
    #[default]
    AfterBuild,
}

/// Knobs of the King safety evaluation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct EvaluatorConfig {
    /// How check is detected.
    pub check: CheckDetection,

    /// When Kings are evaluated.
    pub timing: EvaluationTiming,

    /// If set, castling also requires that no enemy piece reaches the squares the King passes.
    pub transit_safety: bool,
}

impl EvaluatorConfig {
    /// The legacy evaluation: mid-scan, with the Pawn-only check heuristic and no transit
    /// safety.
    #[inline(always)]
    pub const fn legacy() -> Self {
        Self {
            check: CheckDetection::PawnsOnly,
            timing: EvaluationTiming::InScan,
            transit_safety: false,
        }
    }
}

impl Default for EvaluatorConfig {
    /// Full check detection over the complete matrix, with transit safety.
    #[inline(always)]
    fn default() -> Self {
        Self {
            check: CheckDetection::Full,
            timing: EvaluationTiming::AfterBuild,
            transit_safety: true,
        }
    }
}

/// A side of the board to castle towards.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum CastleSide {
    /// Towards column `0`.
    QueenSide,

    /// Towards column `7`.
    KingSide,
}

impl CastleSide {
    pub const COUNT: usize = 2;

    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::QueenSide, Self::KingSide]
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The latch that forfeits castling on this side.
    #[inline(always)]
    pub const fn latch(&self) -> Latch {
        match self {
            Self::QueenSide => Latch::QueenSide,
            Self::KingSide => Latch::KingSide,
        }
    }

    /// Column of the Rook castled with on this side.
    #[inline(always)]
    pub const fn rook_col(&self) -> u8 {
        match self {
            Self::QueenSide => 0,
            Self::KingSide => Square::SIDE - 1,
        }
    }

    /// The id of `color`'s Rook castled with on this side.
    #[inline(always)]
    pub const fn rook(&self, color: Color) -> PieceId {
        match self {
            Self::QueenSide => PieceId::queen_side_rook(color),
            Self::KingSide => PieceId::king_side_rook(color),
        }
    }

    /// Column step from the King towards the Rook.
    #[inline(always)]
    pub const fn direction(&self) -> i8 {
        match self {
            Self::QueenSide => -1,
            Self::KingSide => 1,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::QueenSide => "queen side",
            Self::KingSide => "king side",
        }
    }
}

/// Check and castling status of one King.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct KingSafety {
    pub king: PieceId,
    pub square: Square,
    pub in_check: bool,
    pub castling: [bool; CastleSide::COUNT],
}

impl KingSafety {
    /// Returns `true` if castling towards `side` is offered.
    #[inline(always)]
    pub const fn can_castle(&self, side: CastleSide) -> bool {
        self.castling[side.index()]
    }
}

impl fmt::Display for KingSafety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}:", self.king, self.square)?;
        if self.in_check {
            write!(f, " in check")?;
        } else {
            write!(f, " not in check")?;
        }
        for side in CastleSide::all() {
            let verdict = if self.can_castle(side) { "yes" } else { "no" };
            write!(f, ", castle {}: {verdict}", side.name())?;
        }
        Ok(())
    }
}

/// Returns `true` if any piece of color `by` reaches `target`.
///
/// Pieces move as their promoted kind. Pawns cover both forward diagonals, occupied or not.
///
/// # Example
/// ```
/// # use cmatrix::{is_attacked, Color, PieceId, Position, Square};
/// let mut pos = Position::empty();
/// pos.place(PieceId::new(25).unwrap(), Square::new(7, 0).unwrap()).unwrap();
///
/// assert!(is_attacked(&pos, Square::new(0, 0).unwrap(), Color::White));
/// assert!(!is_attacked(&pos, Square::new(1, 1).unwrap(), Color::White));
/// ```
pub fn is_attacked(position: &Position, target: Square, by: Color) -> bool {
    position.grid().iter().any(|(from, occupant)| match occupant {
        Some(id) if id.color() == by && from != target => {
            covers(position.effective_kind(*id), by, from, target, position)
        }
        _ => false,
    })
}

/// Returns `true` if any Pawn (by effective kind) of color `by` covers `target` diagonally.
fn pawn_covers(position: &Position, target: Square, by: Color) -> bool {
    position.grid().iter().any(|(from, occupant)| match occupant {
        Some(id) if id.color() == by && position.effective_kind(*id) == PieceKind::Pawn => {
            pawn_attack_squares(by, from).contains(&target)
        }
        _ => false,
    })
}

/// Decides whether `king`, standing on `square`, is in check.
pub fn is_in_check(
    position: &Position,
    king: PieceId,
    square: Square,
    matrix: &ContactMatrix,
    detection: CheckDetection,
) -> bool {
    let enemy = king.color().opponent();
    match detection {
        CheckDetection::PawnsOnly => PieceId::pawns(enemy).any(|pawn| matrix.get(pawn, king)),
        CheckDetection::Full => is_attacked(position, square, enemy),
    }
}

/// Decides whether `king` on `square` may castle towards `side`.
///
/// Requires that neither the side's latch nor the King-moved latch is set, that the King is
/// not in check, that the King stands on its home row with the side's own Rook on its home
/// square, and that every square strictly between King and Rook is empty. With
/// `transit_safety`, the two squares the King passes must also be unreached by the enemy.
pub fn can_castle(
    position: &Position,
    king: PieceId,
    square: Square,
    side: CastleSide,
    in_check: bool,
    accessibility: &Accessibility,
    transit_safety: bool,
) -> bool {
    let color = king.color();
    let rights = position.castling();
    if rights.is_forfeited(color, side.latch()) || rights.is_forfeited(color, Latch::KingMoved) {
        return false;
    }
    if in_check {
        return false;
    }
    if square.row() != color.home_row() {
        return false;
    }
    if position.piece_at(square.with_col(side.rook_col())) != Some(side.rook(color)) {
        return false;
    }

    let (low, high) = match side {
        CastleSide::QueenSide => (side.rook_col() + 1, square.col()),
        CastleSide::KingSide => (square.col() + 1, side.rook_col()),
    };
    if !(low..high).all(|col| position.is_empty(square.with_col(col))) {
        return false;
    }

    if transit_safety {
        let enemy = color.opponent();
        let unsafe_transit = (1..=2)
            .filter_map(|step| square.offset(0, side.direction() * step))
            .any(|transit| {
                accessibility.get(enemy, transit) > 0 || pawn_covers(position, transit, enemy)
            });
        if unsafe_transit {
            return false;
        }
    }

    true
}

/// Evaluates check and castling eligibility of `king` on `square`.
///
/// Only what `matrix` and `accessibility` contain at the time of the call is considered, so
/// the result depends on how far the build has progressed.
pub fn evaluate_king(
    position: &Position,
    king: PieceId,
    square: Square,
    matrix: &ContactMatrix,
    accessibility: &Accessibility,
    config: &EvaluatorConfig,
) -> KingSafety {
    let in_check = is_in_check(position, king, square, matrix, config.check);
    let castling = CastleSide::all().map(|side| {
        can_castle(
            position,
            king,
            square,
            side,
            in_check,
            accessibility,
            config.transit_safety,
        )
    });

    KingSafety {
        king,
        square,
        in_check,
        castling,
    }
}
