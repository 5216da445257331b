/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Color, PieceId, PieceKind, Position, Square};

/// Deltas (row, column) for the movement of the Queen.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook: left, right, up, down */
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    /* Bishop: up-left, up-right, down-left, down-right */
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Deltas for the movement of the Rook.
const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
];

/// Deltas for the movement of the King: every neighbour, never its own square.
const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A single square reached by a piece's movement pattern.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Reach {
    /// The square is occupied by `id`.
    Contact(Square, PieceId),

    /// The square is empty.
    Empty(Square),

    /// The square holds the en passant ghost of Pawn `id`.
    EnPassant(Square, PieceId),
}

impl Reach {
    /// The square that was reached.
    #[inline(always)]
    pub const fn square(&self) -> Square {
        match self {
            Self::Contact(square, _) | Self::Empty(square) | Self::EnPassant(square, _) => *square,
        }
    }

    /// The id that was reached, if the square was not empty.
    #[inline(always)]
    pub const fn target(&self) -> Option<PieceId> {
        match self {
            Self::Contact(_, id) | Self::EnPassant(_, id) => Some(*id),
            Self::Empty(_) => None,
        }
    }
}

/// Generates every square reached by a piece of `kind` and `color` standing on `from`.
///
/// * Sliders walk each of their rays until the first occupied square (inclusive) or the edge.
/// * Knights and Kings check each offset independently and are never blocked.
/// * Pawns only reach their two forward diagonals, and only when something is there: either
///   a piece on the grid or a ghost on the passed-pawn grid.
///
/// # Example
/// ```
/// # use cmatrix::{reach, Color, PieceKind, Position, Reach, Square};
/// let pos = Position::initial();
/// let from = Square::new(0, 0).unwrap();
/// let reached = reach(PieceKind::Rook, Color::Black, from, &pos);
/// assert_eq!(reached.len(), 2);
/// assert!(reached.iter().all(|r| matches!(r, Reach::Contact(..))));
/// ```
pub fn reach(kind: PieceKind, color: Color, from: Square, position: &Position) -> Vec<Reach> {
    let mut reached = Vec::with_capacity(16);

    match kind {
        PieceKind::Rook => slide(from, &ROOK_DELTAS, position, &mut reached),
        PieceKind::Bishop => slide(from, &BISHOP_DELTAS, position, &mut reached),
        PieceKind::Queen => slide(from, &QUEEN_DELTAS, position, &mut reached),
        PieceKind::Knight => leap(from, &KNIGHT_DELTAS, position, &mut reached),
        PieceKind::King => leap(from, &KING_DELTAS, position, &mut reached),
        PieceKind::Pawn => pawn_captures(color, from, position, &mut reached),
    }

    reached
}

/// The (up to) two forward-diagonal squares a `color` Pawn on `from` attacks.
///
/// # Example
/// ```
/// # use cmatrix::{pawn_attack_squares, Color, Square};
/// let edge = Square::new(6, 0).unwrap();
/// assert_eq!(pawn_attack_squares(Color::White, edge), vec![Square::new(5, 1).unwrap()]);
/// ```
pub fn pawn_attack_squares(color: Color, from: Square) -> Vec<Square> {
    [-1, 1]
        .into_iter()
        .filter_map(|dc| from.offset(color.forward(), dc))
        .collect()
}

/// Returns `true` if a piece of `kind` and `color` on `from` reaches `target`.
///
/// Unlike [`reach`], a Pawn covers its diagonals whether or not they are occupied.
pub fn covers(
    kind: PieceKind,
    color: Color,
    from: Square,
    target: Square,
    position: &Position,
) -> bool {
    match kind {
        PieceKind::Pawn => pawn_attack_squares(color, from).contains(&target),
        _ => reach(kind, color, from, position)
            .iter()
            .any(|r| r.square() == target),
    }
}

/// Walks each ray in `deltas` until it hits a piece or leaves the grid.
fn slide(from: Square, deltas: &[(i8, i8)], position: &Position, reached: &mut Vec<Reach>) {
    for &(dr, dc) in deltas {
        let mut to = from;
        while let Some(next) = to.offset(dr, dc) {
            to = next;
            if let Some(id) = position.piece_at(to) {
                reached.push(Reach::Contact(to, id));
                break;
            }
            reached.push(Reach::Empty(to));
        }
    }
}

/// Visits each single offset in `deltas` that stays on the grid.
fn leap(from: Square, deltas: &[(i8, i8)], position: &Position, reached: &mut Vec<Reach>) {
    for to in deltas.iter().filter_map(|&(dr, dc)| from.offset(dr, dc)) {
        match position.piece_at(to) {
            Some(id) => reached.push(Reach::Contact(to, id)),
            None => reached.push(Reach::Empty(to)),
        }
    }
}

/// Diagonal captures, including probes of the passed-pawn grid on the same squares.
fn pawn_captures(color: Color, from: Square, position: &Position, reached: &mut Vec<Reach>) {
    for to in pawn_attack_squares(color, from) {
        if let Some(id) = position.piece_at(to) {
            reached.push(Reach::Contact(to, id));
        }
        if let Some(ghost) = *position.passed_pawns().get(to) {
            reached.push(Reach::EnPassant(to, ghost));
        }
    }
}
