// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use clap::Parser;
use cvs_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.logging.init("cvs-cmd")?;

    let stdout = std::io::stdout();
    cli.run(&mut stdout.lock())
}
