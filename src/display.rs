/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, ContactMatrix, ContactReport, Grid, PieceId, Square, Table};

/// How the pieces of a grid are drawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum BoardStyle {
    /// Each occupied cell shows the piece's numeric id.
    #[default]
    Ids,

    /// Each occupied cell shows the piece's label, such as `RLb`.
    Labels,
}

/// Draws a grid inside a frame, with row indices on the left, ranks on the right, and files
/// underneath.
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    style: BoardStyle,
}

impl<'a> BoardDisplay<'a> {
    pub const fn new(grid: &'a Grid, style: BoardStyle) -> Self {
        Self { grid, style }
    }
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        framed(f, |square| match (self.grid.get(square), self.style) {
            (Some(id), BoardStyle::Ids) => format!("{:>2} ", id.inner()),
            (Some(id), BoardStyle::Labels) => format!("{:<3}", id.label()),
            (None, _) => String::from("   "),
        })
    }
}

/// Draws one color's accessibility counts in the same frame as [`BoardDisplay`].
pub struct AccessibilityDisplay<'a>(pub &'a Table<u8>);

impl fmt::Display for AccessibilityDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        framed(f, |square| match *self.0.get(square) {
            0 => String::from("   "),
            n => format!("{n:>2} "),
        })
    }
}

fn framed<F>(f: &mut fmt::Formatter<'_>, cell: F) -> fmt::Result
where
    F: Fn(Square) -> String,
{
    let border = "    +---+---+---+---+---+---+---+---+";

    write!(f, "    ")?;
    for col in 0..Square::SIDE {
        write!(f, " [{col}]")?;
    }
    writeln!(f)?;
    writeln!(f, "{border}")?;

    for row in 0..Square::SIDE {
        write!(f, "[{row}] |")?;
        for col in 0..Square::SIDE {
            write!(f, "{}|", cell(Square::new_unchecked(row, col)))?;
        }
        writeln!(f, " {}", Square::SIDE - row)?;
        writeln!(f, "{border}")?;
    }

    write!(f, "    ")?;
    for col in 0..Square::SIDE {
        write!(f, "  {} ", Square::new_unchecked(0, col).file_char())?;
    }
    Ok(())
}

/// Draws a [`ContactMatrix`] as 32 rows of `0` and `1`, one row per contacting id.
pub struct MatrixDisplay<'a>(pub &'a ContactMatrix);

impl fmt::Display for MatrixDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for from in PieceId::iter() {
            for to in PieceId::iter() {
                write!(f, "{} ", self.0.get(from, to) as u8)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Lists every contact of a report by piece, followed by the King summaries.
pub struct ContactListDisplay<'a>(pub &'a ContactReport);

impl fmt::Display for ContactListDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        for from in PieceId::iter() {
            let mut contacts = report.matrix.contacts_of(from).peekable();
            if contacts.peek().is_none() {
                continue;
            }
            write!(f, "{from}:")?;
            for to in contacts {
                let relation = if to.color() == from.color() {
                    "protects"
                } else {
                    "threatens"
                };
                write!(f, " {relation} {to}")?;
            }
            writeln!(f)?;
        }

        for color in Color::all() {
            match report.king(color) {
                Some(king) => writeln!(f, "{king}")?,
                None => writeln!(f, "{color} king is not on the grid")?,
            }
        }
        Ok(())
    }
}
