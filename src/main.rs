/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{self, Write},
    time::Instant,
};

use anyhow::Result;
use clap::Parser;
use cmatrix::{build_contact_matrix, Cli, Position};
use log::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.level())
        .parse_default_env()
        .init();

    let position = Position::initial();
    let config = cli.config();

    let start = Instant::now();
    let report = build_contact_matrix(&position, &config);
    info!(
        "Built {} contacts in {:?} ({config:?})",
        report.matrix.len(),
        start.elapsed()
    );

    let mut out = io::stdout().lock();
    cli.write_report(&mut out, &position, &report)?;
    out.flush()?;
    Ok(())
}
