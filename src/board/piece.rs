/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use anyhow::{bail, Result};

/// Kinds of the eight back-rank pieces of either color, from column `0` to column `7`.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Display labels for every [`PieceId`], indexed by [`PieceId::index`].
#[rustfmt::skip]
const LABELS: [&str; PieceId::COUNT] = [
    "RLb", "NLb", "BLb", "Qb", "Kb", "BRb", "NRb", "RRb",
    "p1b", "p2b", "p3b", "p4b", "p5b", "p6b", "p7b", "p8b",
    "p1w", "p2w", "p3w", "p4w", "p5w", "p6w", "p7w", "p8w",
    "RLw", "NLw", "BLw", "Qw", "Kw", "BRw", "NRw", "RRw",
];

/// Represents the color of a piece.
///
/// Black owns ids `1..=16` and starts at the top of the grid (rows `0` and `1`).
/// White owns ids `17..=32` and starts at the bottom (rows `6` and `7`).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    ///
    /// Will be `0` for White, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Row delta of a single step "forward" for this [`Color`]'s pawns.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::Color;
    /// assert_eq!(Color::Black.forward(), 1);
    /// assert_eq!(Color::White.forward(), -1);
    /// ```
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// The row on which this [`Color`]'s King and Rooks start.
    #[inline(always)]
    pub const fn home_row(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

/// Represents the kind (or "role") that a piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// Returns this [`PieceKind`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `true` if a Pawn may be promoted to this [`PieceKind`].
    #[inline(always)]
    pub const fn is_promotion_target(&self) -> bool {
        !matches!(self, Self::Pawn | Self::King)
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use cmatrix::PieceKind;
    /// assert_eq!(PieceKind::Knight.name(), "knight");
    /// ```
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// Identity of a single piece, fixed when the position is set up.
///
/// Ids are in `[1, 32]`. An id stays with its piece wherever the piece moves, and its kind,
/// color, and label are given by a fixed layout:
///
/// ```text
///  id   | 1  2  3  4  5  6  7  8 | 9 .. 16 | 17 .. 24 | 25 26 27 28 29 30 31 32
///  kind | R  N  B  Q  K  B  N  R | pawns   | pawns    | R  N  B  Q  K  B  N  R
///  color|         black          |  black  |  white   |          white
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PieceId(u8);

impl PieceId {
    /// Number of distinct piece ids.
    pub const COUNT: usize = 32;

    pub const MIN: u8 = 1;
    pub const MAX: u8 = 32;

    /// Number of ids owned by each color.
    const PER_COLOR: u8 = 16;

    /// Creates a new [`PieceId`], failing if `bits` is not in `[1, 32]`.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::{Color, PieceId, PieceKind};
    /// let queen = PieceId::new(4).unwrap();
    /// assert_eq!(queen.kind(), PieceKind::Queen);
    /// assert_eq!(queen.color(), Color::Black);
    ///
    /// assert!(PieceId::new(0).is_err());
    /// assert!(PieceId::new(33).is_err());
    /// ```
    #[inline(always)]
    pub fn new(bits: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&bits) {
            bail!(
                "Invalid bits for PieceId: Must be between [{}, {}]. Got {bits}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(bits))
    }

    /// Creates a new [`PieceId`] without error checking.
    ///
    /// # Panics
    /// If `bits` is not in `[1, 32]` when debug assertions are enabled.
    #[inline(always)]
    pub const fn from_bits_unchecked(bits: u8) -> Self {
        debug_assert!(
            bits >= Self::MIN && bits <= Self::MAX,
            "Invalid bits for PieceId: Must be between [1, 32]"
        );
        Self(bits)
    }

    /// Iterates over every id, from `1` to `32`.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Iterates over the ids of `color`'s eight Pawns.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::{Color, PieceId};
    /// let ids: Vec<u8> = PieceId::pawns(Color::White).map(|id| id.inner()).collect();
    /// assert_eq!(ids, (17..=24).collect::<Vec<_>>());
    /// ```
    #[inline(always)]
    pub fn pawns(color: Color) -> impl ExactSizeIterator<Item = Self> {
        let start = match color {
            Color::White => Self::PER_COLOR + 1,
            Color::Black => 9,
        };
        (start..start + 8).map(Self)
    }

    /// The id of `color`'s King.
    #[inline(always)]
    pub const fn king(color: Color) -> Self {
        match color {
            Color::White => Self(29),
            Color::Black => Self(5),
        }
    }

    /// The id of `color`'s Rook that starts on column `0`.
    #[inline(always)]
    pub const fn queen_side_rook(color: Color) -> Self {
        match color {
            Color::White => Self(25),
            Color::Black => Self(1),
        }
    }

    /// The id of `color`'s Rook that starts on column `7`.
    #[inline(always)]
    pub const fn king_side_rook(color: Color) -> Self {
        match color {
            Color::White => Self(32),
            Color::Black => Self(8),
        }
    }

    /// Fetches the raw id value, in `[1, 32]`.
    #[inline(always)]
    pub const fn inner(&self) -> u8 {
        self.0
    }

    /// Returns this id as a `usize` in `[0, 31]`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    /// Fetches the [`Color`] owning this id.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        if self.0 <= Self::PER_COLOR {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Fetches the [`PieceKind`] this id starts the game as.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::{PieceId, PieceKind};
    /// assert_eq!(PieceId::new(1).unwrap().kind(), PieceKind::Rook);
    /// assert_eq!(PieceId::new(12).unwrap().kind(), PieceKind::Pawn);
    /// assert_eq!(PieceId::new(29).unwrap().kind(), PieceKind::King);
    /// ```
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        let local = (self.0 - 1) % Self::PER_COLOR;
        match self.color() {
            Color::Black if local < 8 => BACK_RANK[local as usize],
            Color::White if local >= 8 => BACK_RANK[(local - 8) as usize],
            _ => PieceKind::Pawn,
        }
    }

    /// Returns `true` if this id starts the game as a Pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind(), PieceKind::Pawn)
    }

    /// Returns `true` if this id belongs to a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind(), PieceKind::King)
    }

    /// Short display label, such as `"RLb"` or `"p3w"`.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::PieceId;
    /// assert_eq!(PieceId::new(1).unwrap().label(), "RLb");
    /// assert_eq!(PieceId::new(28).unwrap().label(), "Qw");
    /// ```
    #[inline(always)]
    pub const fn label(&self) -> &'static str {
        LABELS[self.index()]
    }

    /// Fetches a human-readable name for this id.
    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.color().name(), self.kind().name())
    }
}

macro_rules! impl_common_traits {
    ($type:ty) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            /// [`$type`] can be used to index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            /// [`$type`] can be used to mutably index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }

        impl fmt::Debug for $type {
            /// Debug formatting displays a $type as its human-readable name and index value.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"{}\" ({})", self.name(), self.index())
            }
        }
    };
}

impl_common_traits!(PieceId);
impl_common_traits!(PieceKind);
impl_common_traits!(Color);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl fmt::Display for PieceId {
    /// Displays the id together with its label, such as `4(Qb)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.0, self.label())
    }
}
