/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Per-piece reach generation.
mod movegen;

/// Piece identities, kinds, and colors.
mod piece;

/// The grid and its auxiliary state.
mod position;

/// Squares on the `8x8` grid.
mod square;

/// A container of 64 elements, indexed by [`Square`].
mod table;

pub use movegen::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use table::*;
