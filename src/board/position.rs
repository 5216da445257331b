/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};

use super::{Color, PieceId, PieceKind, Square, Table};

/// Occupancy of the grid: the [`PieceId`] on each square, if any.
pub type Grid = Table<Option<PieceId>>;

/// Which id a promoted Pawn's contacts are recorded under.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum ContactIdentity {
    /// Contacts stay under the Pawn's own id.
    Original,

    /// Contacts are recorded under the id the Pawn was promoted to.
    #[default]
    Promoted,
}

/// A single Pawn promotion.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Promotion {
    /// The id whose kind the Pawn now moves as.
    pub target: PieceId,

    /// The id contacts are recorded under.
    pub identity: ContactIdentity,
}

impl Promotion {
    /// Resolves the id that contacts of `pawn` are recorded under.
    #[inline(always)]
    pub const fn recorder(&self, pawn: PieceId) -> PieceId {
        match self.identity {
            ContactIdentity::Original => pawn,
            ContactIdentity::Promoted => self.target,
        }
    }
}

/// Redirection table for promoted Pawns.
///
/// An entry starts empty and is set at most once. Promotion cannot be undone.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct PromotionTable([Option<Promotion>; PieceId::COUNT]);

impl PromotionTable {
    /// Creates a table where no Pawn has been promoted.
    #[inline(always)]
    pub const fn new() -> Self {
        Self([None; PieceId::COUNT])
    }

    /// Fetches the promotion of `id`, if it was promoted.
    #[inline(always)]
    pub const fn get(&self, id: PieceId) -> Option<&Promotion> {
        self.0[id.index()].as_ref()
    }

    /// Marks `pawn` as promoted to the kind of `target`.
    ///
    /// Fails if `pawn` is not a Pawn, if it was already promoted, or if `target` is not a
    /// non-Pawn, non-King id of the same color.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::{ContactIdentity, PieceId, PromotionTable};
    /// let pawn = PieceId::new(20).unwrap();
    /// let queen = PieceId::new(28).unwrap();
    ///
    /// let mut table = PromotionTable::new();
    /// assert!(table.promote(pawn, queen, ContactIdentity::Promoted).is_ok());
    /// assert_eq!(table.get(pawn).unwrap().target, queen);
    ///
    /// // A pawn can only be promoted once
    /// assert!(table.promote(pawn, queen, ContactIdentity::Promoted).is_err());
    /// ```
    pub fn promote(
        &mut self,
        pawn: PieceId,
        target: PieceId,
        identity: ContactIdentity,
    ) -> Result<()> {
        if !pawn.is_pawn() {
            bail!("Only pawns can be promoted. {pawn} is a {}", pawn.kind());
        }
        if let Some(existing) = self.get(pawn) {
            bail!("{pawn} was already promoted to {}", existing.target);
        }
        if !target.kind().is_promotion_target() {
            bail!("{pawn} cannot be promoted to a {}", target.kind());
        }
        if target.color() != pawn.color() {
            bail!(
                "{pawn} is {} and cannot be promoted to {} piece {target}",
                pawn.color(),
                target.color()
            );
        }

        self.0[pawn] = Some(Promotion { target, identity });
        Ok(())
    }

    /// Iterates over every `(pawn, promotion)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Promotion)> {
        PieceId::iter().filter_map(|id| self.get(id).map(|promo| (id, promo)))
    }
}

/// One of the three castling latches held for each color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Latch {
    /// Castling with the Rook on column `0` was forfeited.
    QueenSide,

    /// The King has moved, forfeiting castling on both sides.
    KingMoved,

    /// Castling with the Rook on column `7` was forfeited.
    KingSide,
}

impl Latch {
    pub const COUNT: usize = 3;

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Six one-way castling latches, three per color.
///
/// A set latch means castling was permanently forfeited. Latches can be set but never cleared.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights([[bool; Latch::COUNT]; Color::COUNT]);

impl CastlingRights {
    /// Creates a new [`CastlingRights`] with no latch set.
    #[inline(always)]
    pub const fn new() -> Self {
        Self([[false; Latch::COUNT]; Color::COUNT])
    }

    /// Sets `latch` for `color`. Setting an already-set latch has no effect.
    #[inline(always)]
    pub fn forfeit(&mut self, color: Color, latch: Latch) {
        self.0[color][latch.index()] = true;
    }

    /// Returns `true` if `latch` is set for `color`.
    #[inline(always)]
    pub const fn is_forfeited(&self, color: Color, latch: Latch) -> bool {
        self.0[color.index()][latch.index()]
    }
}

/// Everything a contact matrix is computed from: the grid plus its auxiliary state.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Which piece is on which square.
    grid: Grid,

    /// Pawns that have been promoted, and to what.
    promotions: PromotionTable,

    /// Squares a Pawn may be captured on en passant during the next turn.
    passed_pawns: Grid,

    /// Castling latches of both colors.
    castling: CastlingRights,
}

impl Position {
    /// Creates a new [`Position`] with no pieces, no promotions, and no latches set.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            grid: Table::splat(None),
            promotions: PromotionTable::new(),
            passed_pawns: Table::splat(None),
            castling: CastlingRights::new(),
        }
    }

    /// Creates the canonical starting position.
    ///
    /// Rows `0` and `1` hold ids `1..=16` and rows `6` and `7` hold ids `17..=32`, both
    /// assigned in row-major order. Rows `2` through `5` are empty.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::{PieceId, Position, Square};
    /// let pos = Position::initial();
    /// assert_eq!(pos.piece_at(Square::new(0, 4).unwrap()), Some(PieceId::new(5).unwrap()));
    /// assert_eq!(pos.piece_at(Square::new(4, 4).unwrap()), None);
    /// ```
    pub fn initial() -> Self {
        let mut next = PieceId::MIN;
        let grid = Table::from_fn(|square| {
            if (2..6).contains(&square.row()) {
                return None;
            }
            let id = PieceId::from_bits_unchecked(next);
            next += 1;
            Some(id)
        });

        Self {
            grid,
            ..Self::empty()
        }
    }

    /// Fetches the grid.
    #[inline(always)]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Fetches the promotion table.
    #[inline(always)]
    pub const fn promotions(&self) -> &PromotionTable {
        &self.promotions
    }

    /// Fetches the passed-pawn grid.
    #[inline(always)]
    pub const fn passed_pawns(&self) -> &Grid {
        &self.passed_pawns
    }

    /// Fetches the castling latches.
    #[inline(always)]
    pub const fn castling(&self) -> &CastlingRights {
        &self.castling
    }

    /// Fetches the id on `square`, if any.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<PieceId> {
        *self.grid.get(square)
    }

    /// Returns `true` if there is no piece on `square`.
    #[inline(always)]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Finds the square holding `id`, if it is on the grid.
    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        self.grid
            .iter()
            .find_map(|(square, occupant)| (*occupant == Some(id)).then_some(square))
    }

    /// Places `id` on `square`.
    ///
    /// Fails if `square` is occupied or if `id` is already elsewhere on the grid.
    pub fn place(&mut self, id: PieceId, square: Square) -> Result<()> {
        if let Some(occupant) = self.piece_at(square) {
            bail!("Cannot place {id} on {square}: it is occupied by {occupant}");
        }
        if let Some(existing) = self.square_of(id) {
            bail!("Cannot place {id} on {square}: it is already on {existing}");
        }
        self.grid.set(square, Some(id));
        Ok(())
    }

    /// Removes and returns the id on `square`, if any.
    #[inline(always)]
    pub fn remove(&mut self, square: Square) -> Option<PieceId> {
        self.grid[square].take()
    }

    /// Promotes `pawn` to move as `target`. See [`PromotionTable::promote`].
    #[inline(always)]
    pub fn promote(
        &mut self,
        pawn: PieceId,
        target: PieceId,
        identity: ContactIdentity,
    ) -> Result<()> {
        self.promotions.promote(pawn, target, identity)
    }

    /// Marks `square` as holding the en passant ghost of `pawn` for the next turn.
    pub fn mark_passed_pawn(&mut self, square: Square, pawn: PieceId) -> Result<()> {
        if !pawn.is_pawn() {
            bail!("Only pawns can be captured en passant. {pawn} is a {}", pawn.kind());
        }
        self.passed_pawns.set(square, Some(pawn));
        Ok(())
    }

    /// Clears the passed-pawn grid. Callers do this once the turn after the double step ends.
    #[inline(always)]
    pub fn clear_passed_pawns(&mut self) {
        self.passed_pawns = Table::splat(None);
    }

    /// Sets a castling latch. See [`CastlingRights::forfeit`].
    #[inline(always)]
    pub fn forfeit(&mut self, color: Color, latch: Latch) {
        self.castling.forfeit(color, latch);
    }

    /// Resolves the kind `id` moves as, after promotion.
    #[inline(always)]
    pub fn effective_kind(&self, id: PieceId) -> PieceKind {
        self.promotions
            .get(id)
            .map_or(id.kind(), |promo| promo.target.kind())
    }

    /// Resolves the id that contacts made by `id` are recorded under.
    #[inline(always)]
    pub fn recorder(&self, id: PieceId) -> PieceId {
        self.promotions
            .get(id)
            .map_or(id, |promo| promo.recorder(id))
    }
}

impl Default for Position {
    /// The default position is the starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..Square::SIDE {
            for occupant in self.grid.row(row) {
                match occupant {
                    Some(id) => write!(f, "{:>3}", id.inner())?,
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f)?;
        }
        for (pawn, promo) in self.promotions.iter() {
            writeln!(f, "promoted: {pawn} -> {} ({:?})", promo.target, promo.identity)?;
        }
        Ok(())
    }
}

/// Produces the canonical starting grid. Alias for [`Position::initial`].
#[inline(always)]
pub fn initial_position() -> Position {
    Position::initial()
}
