/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, trace};

use crate::{
    evaluate_king, reach, Color, EvaluationTiming, EvaluatorConfig, KingSafety, PieceId,
    Position, Reach, Square, Table,
};

/// Directed contacts between pieces.
///
/// Entry `(a, b)` is set when `a`'s movement reaches the square of `b`. Between pieces of the
/// same color this means protection; between opposite colors it means threat. `(b, a)` is
/// independent of `(a, b)`.
///
/// Internally each row is a 32-bit set of targets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContactMatrix([u32; PieceId::COUNT]);

impl ContactMatrix {
    /// Creates a matrix without any contacts.
    #[inline(always)]
    pub const fn new() -> Self {
        Self([0; PieceId::COUNT])
    }

    /// Returns `true` if `from` is in contact with `to`.
    #[inline(always)]
    pub const fn get(&self, from: PieceId, to: PieceId) -> bool {
        self.0[from.index()] & (1 << to.index()) != 0
    }

    /// Records a contact from `from` to `to`.
    #[inline(always)]
    pub fn set(&mut self, from: PieceId, to: PieceId) {
        self.0[from] |= 1 << to.index();
    }

    /// Iterates over every id that `from` is in contact with, in ascending order.
    pub fn contacts_of(&self, from: PieceId) -> impl Iterator<Item = PieceId> + '_ {
        PieceId::iter().filter(move |to| self.get(from, *to))
    }

    /// Iterates over every id that is in contact with `to`, in ascending order.
    pub fn contacted_by(&self, to: PieceId) -> impl Iterator<Item = PieceId> + '_ {
        PieceId::iter().filter(move |from| self.get(*from, to))
    }

    /// Iterates over every `(from, to)` contact, ordered by `from` and then `to`.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, PieceId)> + '_ {
        PieceId::iter().flat_map(move |from| self.contacts_of(from).map(move |to| (from, to)))
    }

    /// Number of contacts recorded.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.iter().map(|row| row.count_ones() as usize).sum()
    }

    /// Returns `true` if no contact has been recorded.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|row| *row == 0)
    }
}

impl std::fmt::Debug for ContactMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(from, to)| (from.inner(), to.inner())))
            .finish()
    }
}

/// Per-color counts of how many pieces reach each empty square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Accessibility([Table<u8>; Color::COUNT]);

impl Accessibility {
    /// Creates all-zero accessibility grids.
    #[inline(always)]
    pub const fn new() -> Self {
        Self([Table::splat(0); Color::COUNT])
    }

    /// Number of `color`'s pieces that reach `square` and find it empty.
    #[inline(always)]
    pub const fn get(&self, color: Color, square: Square) -> u8 {
        *self.0[color.index()].get(square)
    }

    /// Fetches the whole accessibility grid of `color`.
    #[inline(always)]
    pub const fn of(&self, color: Color) -> &Table<u8> {
        &self.0[color.index()]
    }

    /// Sum of all counters of `color`.
    pub fn total(&self, color: Color) -> usize {
        self.of(color).iter().map(|(_, n)| *n as usize).sum()
    }

    #[inline(always)]
    fn increment(&mut self, color: Color, square: Square) {
        self.0[color][square] += 1;
    }
}

/// Everything produced by a single build.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ContactReport {
    /// Contacts between all pieces.
    pub matrix: ContactMatrix,

    /// Accessibility grids of both colors.
    pub accessibility: Accessibility,

    /// Safety of each color's King, if it is on the grid.
    pub kings: [Option<KingSafety>; Color::COUNT],
}

impl ContactReport {
    /// Fetches the safety report of `color`'s King.
    #[inline(always)]
    pub fn king(&self, color: Color) -> Option<&KingSafety> {
        self.kings[color].as_ref()
    }
}

/// Builds a [`ContactReport`] one square at a time.
///
/// Squares are meant to be visited once each, in row-major order; [`ContactBuilder::build`]
/// does exactly that. With [`EvaluationTiming::InScan`], a King is evaluated the moment it is
/// visited and only sees the contacts written so far.
#[derive(Debug)]
pub struct ContactBuilder<'a> {
    position: &'a Position,
    config: EvaluatorConfig,
    matrix: ContactMatrix,
    accessibility: Accessibility,
    kings: [Option<KingSafety>; Color::COUNT],
}

impl<'a> ContactBuilder<'a> {
    /// Creates a builder with an empty matrix and zeroed accessibility grids.
    pub fn new(position: &'a Position, config: EvaluatorConfig) -> Self {
        Self {
            position,
            config,
            matrix: ContactMatrix::new(),
            accessibility: Accessibility::new(),
            kings: [None; Color::COUNT],
        }
    }

    /// The contacts written so far.
    #[inline(always)]
    pub const fn matrix(&self) -> &ContactMatrix {
        &self.matrix
    }

    /// The accessibility counts accumulated so far.
    #[inline(always)]
    pub const fn accessibility(&self) -> &Accessibility {
        &self.accessibility
    }

    /// Evaluates the piece on `square`, if any, writing its contacts and accessibility.
    pub fn visit(&mut self, square: Square) {
        let Some(id) = self.position.piece_at(square) else {
            return;
        };

        let kind = self.position.effective_kind(id);
        let color = id.color();
        let recorder = self.position.recorder(id);
        debug!("{recorder} - {kind} on {square} ({})", square.coords());

        for reached in reach(kind, color, square, self.position) {
            match reached {
                Reach::Contact(to, target) => {
                    trace!(" Contact with {target} in {}", to.coords());
                    self.matrix.set(recorder, target);
                }
                Reach::EnPassant(to, ghost) => {
                    trace!(" Contact with {ghost} en passant in {}", to.coords());
                    self.matrix.set(recorder, ghost);
                }
                Reach::Empty(to) => self.accessibility.increment(color, to),
            }
        }

        if id.is_king() && self.config.timing == EvaluationTiming::InScan {
            self.evaluate(id, square);
        }
    }

    /// Visits every square in row-major order and finishes the build.
    pub fn build(mut self) -> ContactReport {
        for square in Square::iter() {
            self.visit(square);
        }
        self.finish()
    }

    /// Finishes the build, evaluating both Kings if that was deferred until now.
    pub fn finish(mut self) -> ContactReport {
        if self.config.timing == EvaluationTiming::AfterBuild {
            for color in Color::all() {
                let king = PieceId::king(color);
                if let Some(square) = self.position.square_of(king) {
                    self.evaluate(king, square);
                }
            }
        }

        ContactReport {
            matrix: self.matrix,
            accessibility: self.accessibility,
            kings: self.kings,
        }
    }

    fn evaluate(&mut self, king: PieceId, square: Square) {
        let safety = evaluate_king(
            self.position,
            king,
            square,
            &self.matrix,
            &self.accessibility,
            &self.config,
        );
        debug!("{safety}");
        self.kings[king.color()] = Some(safety);
    }
}

/// Computes the contact matrix, accessibility grids, and King safety of `position`.
///
/// # Example
/// ```
/// # use cmatrix::{build_contact_matrix, EvaluatorConfig, PieceId, Position};
/// let report = build_contact_matrix(&Position::initial(), &EvaluatorConfig::default());
/// let rook = PieceId::new(1).unwrap();
/// let contacts: Vec<u8> = report.matrix.contacts_of(rook).map(|id| id.inner()).collect();
/// assert_eq!(contacts, vec![2, 9]);
/// ```
pub fn build_contact_matrix(position: &Position, config: &EvaluatorConfig) -> ContactReport {
    ContactBuilder::new(position, *config).build()
}

impl Position {
    /// Shorthand for [`build_contact_matrix`] with the default [`EvaluatorConfig`].
    #[inline(always)]
    pub fn contacts(&self) -> ContactReport {
        build_contact_matrix(self, &EvaluatorConfig::default())
    }
}
