/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::Write;

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::{
    AccessibilityDisplay, BoardDisplay, BoardStyle, Color, ContactListDisplay, ContactReport,
    EvaluatorConfig, MatrixDisplay, Position,
};

/// Builds and prints the contact matrix of the initial chess position.
#[derive(Debug, Clone, Default, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Increase logging output. Once for every evaluated piece, twice for every contact.
    ///
    /// `RUST_LOG` takes precedence, if set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Draw the board with piece labels, such as `RLb`, instead of numeric ids.
    #[arg(short, long, default_value = "false")]
    pub labels: bool,

    /// Print the full 32x32 contact matrix.
    #[arg(short, long, default_value = "false")]
    pub matrix: bool,

    /// Print each piece's contacts and both King summaries.
    #[arg(short, long, default_value = "false")]
    pub contacts: bool,

    /// Print the accessibility grid of each color.
    #[arg(short, long, default_value = "false")]
    pub accessibility: bool,

    /// Evaluate Kings during the scan, look only at Pawns for check, and skip transit safety.
    #[arg(long, default_value = "false")]
    pub legacy: bool,
}

impl Cli {
    /// The evaluator configuration requested on the command line.
    pub fn config(&self) -> EvaluatorConfig {
        if self.legacy {
            EvaluatorConfig::legacy()
        } else {
            EvaluatorConfig::default()
        }
    }

    /// How the board should be drawn.
    pub fn style(&self) -> BoardStyle {
        if self.labels {
            BoardStyle::Labels
        } else {
            BoardStyle::Ids
        }
    }

    /// Log level implied by the number of `-v` flags.
    pub fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Writes the board and every section of `report` requested on the command line.
    ///
    /// The King summaries always close the output, once.
    pub fn write_report<W: Write>(
        &self,
        out: &mut W,
        position: &Position,
        report: &ContactReport,
    ) -> Result<()> {
        writeln!(out, "{}\n", BoardDisplay::new(position.grid(), self.style()))?;

        if self.matrix {
            writeln!(out, "{}", MatrixDisplay(&report.matrix))?;
        }

        if self.accessibility {
            for color in Color::all() {
                writeln!(out, "{color} accessibility:")?;
                writeln!(out, "{}\n", AccessibilityDisplay(report.accessibility.of(color)))?;
            }
        }

        if self.contacts {
            write!(out, "{}", ContactListDisplay(report))?;
        } else {
            for king in report.kings.iter().flatten() {
                writeln!(out, "{king}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CheckDetection, EvaluationTiming};

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["cmatrix", "-vv", "--labels", "-m"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.level(), LevelFilter::Trace);
        assert_eq!(cli.style(), BoardStyle::Labels);
        assert!(cli.matrix);
        assert!(!cli.contacts);
        assert_eq!(cli.config(), EvaluatorConfig::default());
    }

    #[test]
    fn test_legacy_config() {
        let cli = Cli::try_parse_from(["cmatrix", "--legacy"]).unwrap();
        let config = cli.config();
        assert_eq!(config.check, CheckDetection::PawnsOnly);
        assert_eq!(config.timing, EvaluationTiming::InScan);
        assert!(!config.transit_safety);
        assert_eq!(cli.level(), LevelFilter::Info);
    }

    fn report_text(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let position = Position::initial();
        let report = crate::build_contact_matrix(&position, &cli.config());

        let mut out = Vec::new();
        cli.write_report(&mut out, &position, &report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let plain = report_text(&["cmatrix"]);
        assert!(plain.contains("[0] | 1 | 2 |"));
        assert!(!plain.contains("threatens"));
        assert_eq!(plain.matches("not in check").count(), 2);

        let full = report_text(&["cmatrix", "-l", "-m", "-c", "-a"]);
        assert!(full.contains("|RLb|NLb|"));
        assert!(full.contains("1(RLb): protects 2(NLb) protects 9(p1b)"));
        assert!(full.contains("white accessibility:"));
        assert!(full.contains("black accessibility:"));
        assert_eq!(full.matches("not in check").count(), 2);
    }

    #[test]
    fn test_report_write_errors_propagate() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let cli = Cli::default();
        let position = Position::initial();
        let report = position.contacts();
        assert!(cli.write_report(&mut Closed, &position, &report).is_err());
    }
}
