// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

use std::io;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{info, warn};

use bacheca::cli::Session;
use bacheca::config::{self, Cli, Interface};
use bacheca::logic::Board;
use bacheca::tracing_setup::{self, TracingConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    let mut board = load_board(&cli.file, cli.strict_load)?;

    let interface = match cli.interface {
        Some(interface) => interface,
        None => match config::choose_interface(io::stdin().lock(), io::stdout())
            .context("reading launcher choice")?
        {
            Some(interface) => interface,
            None => return Ok(()),
        },
    };

    match interface {
        Interface::Gui => {
            bacheca::app::run(board, cli.file).map_err(|err| anyhow!("desktop UI failed: {err}"))
        }
        Interface::Cli => {
            Session::new(&mut board, &cli.file, io::stdin().lock(), io::stdout()).run()
        }
    }
}

/// Load the board at startup. A missing file starts empty; other failures start empty too
/// unless `strict` is set.
fn load_board(path: &Path, strict: bool) -> Result<Board> {
    if !path.exists() {
        info!(path = %path.display(), "no board file yet, starting empty");
        return Ok(Board::new());
    }

    match Board::open(path) {
        Ok(board) => Ok(board),
        Err(err) if !strict => {
            warn!(%err, "could not load board, starting empty");
            Ok(Board::new())
        }
        Err(err) => Err(err).with_context(|| format!("loading board from {}", path.display())),
    }
}
