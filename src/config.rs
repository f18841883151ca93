// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line configuration and the interactive front-end launcher.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Default board file, relative to the working directory.
pub const DEFAULT_BOARD_FILE: &str = "annunci.txt";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Interface {
    Gui,
    Cli,
}

#[derive(Parser, Debug)]
#[command(
    name = "bacheca",
    author,
    version,
    about = "Classified postings board with a desktop and a terminal front end."
)]
pub struct Cli {
    /// Board file to load at startup and rewrite after every change.
    #[arg(
        long,
        value_name = "PATH",
        env = "BACHECA_FILE",
        default_value = DEFAULT_BOARD_FILE
    )]
    pub file: PathBuf,

    /// Front end to start; asks interactively when omitted.
    #[arg(long, value_enum)]
    pub interface: Option<Interface>,

    /// Enable debug logging (unless RUST_LOG is set).
    #[arg(long, action = ArgAction::SetTrue)]
    pub debug: bool,

    /// Abort when the board file exists but cannot be loaded.
    #[arg(long = "strict-load", action = ArgAction::SetTrue)]
    pub strict_load: bool,
}

/// Answer to the launcher menu.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LauncherChoice {
    Gui,
    Cli,
    Quit,
}

impl LauncherChoice {
    pub const PROMPT: &'static str = "1) Graphical interface\n2) Command line\n3) Quit\n> ";

    /// Parse a menu answer; `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" => Some(Self::Gui),
            "2" => Some(Self::Cli),
            "3" | "q" => Some(Self::Quit),
            _ => None,
        }
    }

    pub fn interface(self) -> Option<Interface> {
        match self {
            Self::Gui => Some(Interface::Gui),
            Self::Cli => Some(Interface::Cli),
            Self::Quit => None,
        }
    }
}

/// Ask which front end to start until a valid answer arrives.
///
/// Returns `None` when the user quits or input ends.
pub fn choose_interface<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<Option<Interface>> {
    loop {
        write!(output, "{}", LauncherChoice::PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match LauncherChoice::parse(&line) {
            Some(choice) => return Ok(choice.interface()),
            None => writeln!(output, "Invalid choice.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    // Defaults point at the conventional board file and leave the front end open.
    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["bacheca"]).unwrap();
        // BACHECA_FILE may be set in the environment running the tests.
        if std::env::var_os("BACHECA_FILE").is_none() {
            assert_eq!(cli.file, PathBuf::from(DEFAULT_BOARD_FILE));
        }
        assert_eq!(cli.interface, None);
        assert!(!cli.debug);
        assert!(!cli.strict_load);
    }

    // All flags parse into their fields.
    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "bacheca",
            "--file",
            "/tmp/board.txt",
            "--interface",
            "cli",
            "--debug",
            "--strict-load",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("/tmp/board.txt"));
        assert_eq!(cli.interface, Some(Interface::Cli));
        assert!(cli.debug);
        assert!(cli.strict_load);
    }

    // Unknown front ends are rejected by clap.
    #[test]
    fn cli_rejects_unknown_interface() {
        assert!(Cli::try_parse_from(["bacheca", "--interface", "web"]).is_err());
    }

    // Launcher answers map onto choices; anything else re-prompts.
    #[test]
    fn launcher_choice_parse() {
        assert_eq!(LauncherChoice::parse("1"), Some(LauncherChoice::Gui));
        assert_eq!(LauncherChoice::parse(" 2 "), Some(LauncherChoice::Cli));
        assert_eq!(LauncherChoice::parse("3"), Some(LauncherChoice::Quit));
        assert_eq!(LauncherChoice::parse("Q"), Some(LauncherChoice::Quit));
        assert_eq!(LauncherChoice::parse("4"), None);
        assert_eq!(LauncherChoice::parse(""), None);
        assert_eq!(LauncherChoice::Quit.interface(), None);
        assert_eq!(LauncherChoice::Gui.interface(), Some(Interface::Gui));
    }

    // The launcher re-prompts on bad input and stops at quit or end of input.
    #[test]
    fn choose_interface_loops_until_valid() {
        let mut out = Vec::new();
        let choice = choose_interface(Cursor::new("x\n2\n"), &mut out).unwrap();
        assert_eq!(choice, Some(Interface::Cli));
        assert!(String::from_utf8(out).unwrap().contains("Invalid choice."));

        assert_eq!(choose_interface(Cursor::new("q\n"), Vec::new()).unwrap(), None);
        assert_eq!(choose_interface(Cursor::new(""), Vec::new()).unwrap(), None);
    }
}
