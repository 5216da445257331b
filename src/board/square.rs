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

/// Represents a single square on the `8x8` grid.
///
/// Squares are addressed by `(row, col)`, with row `0` at the top of the grid and column `0`
/// on the left. Internally the index is `row * 8 + col`, so iterating over indices visits the
/// grid row by row, top to bottom, left to right:
/// ```text
///  row 0 |  0  1  2  3  4  5  6  7 | 8
///  row 1 |  8  9 10 11 12 13 14 15 | 7
///  ...
///  row 7 | 56 57 58 59 60 61 62 63 | 1
///           a  b  c  d  e  f  g  h
/// ```
/// The right-hand margin and bottom row give the algebraic names used by [`Square`]'s
/// [`fmt::Display`] implementation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Number of rows, and of columns, on the grid.
    pub const SIDE: u8 = 8;

    /// Returns an iterator over all squares, in row-major order.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::new(0, 0).unwrap());
    /// assert_eq!(iter.last().unwrap(), Square::new(7, 7).unwrap());
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from a row and column, both of which must be in `[0, 7]`.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::Square;
    /// let d8 = Square::new(0, 3).unwrap();
    /// assert_eq!(d8.to_string(), "d8");
    ///
    /// assert!(Square::new(8, 0).is_err());
    /// ```
    #[inline(always)]
    pub fn new(row: u8, col: u8) -> Result<Self> {
        if row >= Self::SIDE || col >= Self::SIDE {
            bail!("Invalid Square: row and column must be between [0, 7]. Got ({row}, {col})");
        }
        Ok(Self::new_unchecked(row, col))
    }

    /// Creates a new [`Square`] from a row and column, without error checking.
    ///
    /// # Panics
    /// If `row` or `col` is greater than `7` when debug assertions are enabled.
    #[inline(always)]
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "Row and column must be between [0, 7]");
        Self(row << 3 | col)
    }

    /// Fetches the row of this [`Square`], counted from the top of the grid.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 >> 3
    }

    /// Fetches the column of this [`Square`], counted from the left of the grid.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 & 0b0000_0111
    }

    /// Fetches the internal index of this [`Square`], casted to a [`usize`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Attempt to offset this [`Square`] by a row and column delta.
    ///
    /// Returns [`None`] if the result would leave the grid.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::Square;
    /// let corner = Square::new(0, 0).unwrap();
    /// assert_eq!(corner.offset(1, 2), Some(Square::new(1, 2).unwrap()));
    /// assert_eq!(corner.offset(-1, 0), None);
    /// assert_eq!(corner.offset(0, -1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Self> {
        let Some(row) = self.row().checked_add_signed(row_delta) else {
            return None;
        };
        let Some(col) = self.col().checked_add_signed(col_delta) else {
            return None;
        };

        if row < Self::SIDE && col < Self::SIDE {
            Some(Self::new_unchecked(row, col))
        } else {
            None
        }
    }

    /// Returns the [`Square`] on the same row, but on column `col`.
    #[inline(always)]
    pub const fn with_col(&self, col: u8) -> Self {
        Self::new_unchecked(self.row(), col)
    }

    /// Algebraic file letter of this [`Square`]'s column.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col()) as char
    }

    /// Algebraic rank number of this [`Square`]'s row.
    #[inline(always)]
    pub const fn rank_number(&self) -> u8 {
        Self::SIDE - self.row()
    }

    /// Formats this [`Square`] as `row:col`.
    ///
    /// # Example
    /// ```
    /// # use cmatrix::Square;
    /// assert_eq!(Square::new(6, 2).unwrap().coords(), "6:2");
    /// ```
    #[inline(always)]
    pub fn coords(&self) -> String {
        format!("{}:{}", self.row(), self.col())
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// [`Square`] can be used to index into a list of 64 elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    /// [`Square`] can be used to mutably index into a list of 64 elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    /// Displays this [`Square`] by its algebraic name, such as `e8`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

impl fmt::Debug for Square {
    /// Displays the algebraic name and the `row:col` coordinates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self, self.coords())
    }
}
