/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Pieces, squares, and the grid holding them.
mod board;

/// Command-line options of the `cmatrix` binary.
mod cli;

/// Construction of the contact matrix.
mod contact;

/// Text rendering of grids and matrices.
mod display;

/// King safety and castling eligibility.
mod safety;

pub use board::*;
pub use cli::*;
pub use contact::*;
pub use display::*;
pub use safety::*;
