// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Line-oriented terminal front end.
//!
//! The dialogue is generic over its input and output so it can be driven from a real terminal
//! or from in-memory buffers. End of input behaves like choosing "exit".

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::error::BoardError;
use crate::logic::Board;
use crate::models::{Kind, Posting, PostingDraft, User};
use crate::utils::normalize_input;

const MENU: &str = "\n1) Add posting\n2) Remove posting\n3) Search by keyword\n\
4) Clean expired postings\n5) Show board\n6) Add keywords to a posting\n7) Exit\n> ";

/// Entries of the main menu.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MenuChoice {
    AddPosting,
    RemovePosting,
    Search,
    CleanExpired,
    ShowBoard,
    AddKeywords,
    Exit,
}

impl MenuChoice {
    /// Parse the number typed at the menu prompt.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::AddPosting),
            "2" => Some(Self::RemovePosting),
            "3" => Some(Self::Search),
            "4" => Some(Self::CleanExpired),
            "5" => Some(Self::ShowBoard),
            "6" => Some(Self::AddKeywords),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// One terminal session bound to a board and the file it is persisted to.
pub struct Session<'a, R, W> {
    board: &'a mut Board,
    path: &'a Path,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(board: &'a mut Board, path: &'a Path, input: R, output: W) -> Self {
        Self {
            board,
            path,
            input,
            output,
        }
    }

    /// Log in, then serve menu choices until exit or end of input.
    pub fn run(mut self) -> Result<()> {
        let Some(user) = self.login()? else {
            return Ok(());
        };
        info!(address = user.address(), "terminal session started");
        writeln!(self.output, "Welcome, {}!", user.name())?;

        loop {
            let Some(answer) = self.prompt(MENU)? else {
                break;
            };
            let Some(choice) = MenuChoice::parse(&answer) else {
                writeln!(self.output, "Invalid choice.")?;
                continue;
            };
            match choice {
                MenuChoice::AddPosting => self.add_posting(&user)?,
                MenuChoice::RemovePosting => self.remove_posting(&user)?,
                MenuChoice::Search => self.search()?,
                MenuChoice::CleanExpired => self.clean_expired()?,
                MenuChoice::ShowBoard => self.show_board()?,
                MenuChoice::AddKeywords => self.add_keywords(&user)?,
                MenuChoice::Exit => break,
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn login(&mut self) -> Result<Option<Arc<User>>> {
        loop {
            let Some(name) = self.prompt("Name: ")? else {
                return Ok(None);
            };
            let Some(address) = self.prompt("Email: ")? else {
                return Ok(None);
            };
            match User::new(address, name) {
                Ok(user) => return Ok(Some(Arc::new(user))),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn add_posting(&mut self, user: &Arc<User>) -> Result<()> {
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(());
        };
        let Some(raw_price) = self.prompt("Price: ")? else {
            return Ok(());
        };
        let Ok(price) = raw_price.replace(',', ".").parse::<f64>() else {
            writeln!(self.output, "Price must be a number.")?;
            return Ok(());
        };
        let Some(kind) = self.prompt("Kind (buy/sell): ")? else {
            return Ok(());
        };
        let Some(keywords) = self.prompt("Keywords (comma separated): ")? else {
            return Ok(());
        };
        let expiry = if Kind::parse(&kind) == Some(Kind::Sell) {
            let Some(raw) = self.prompt("Expiry (yyyy-mm-dd): ")? else {
                return Ok(());
            };
            Some(raw).filter(|s| !s.is_empty())
        } else {
            None
        };

        let draft = PostingDraft {
            owner: Some(Arc::clone(user)),
            title,
            price,
            kind,
            keywords,
            expiry,
        };
        let posting = match Posting::new(draft) {
            Ok(posting) => posting,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };

        let id = posting.id();
        match self.board.add(posting) {
            Ok(matches) => {
                writeln!(self.output, "Posting {id} added.")?;
                self.persist()?;
                if !matches.is_empty() {
                    writeln!(self.output, "You might like:")?;
                    for posting in &matches {
                        writeln!(self.output, "  {}", describe(posting))?;
                    }
                }
            }
            Err(err) => {
                warn!(id, %err, "posting rejected");
                writeln!(self.output, "{err}")?;
            }
        }
        Ok(())
    }

    fn remove_posting(&mut self, user: &Arc<User>) -> Result<()> {
        let Some(id) = self.prompt_id()? else {
            return Ok(());
        };
        match self.board.remove(id, user) {
            Ok(removed) => {
                writeln!(self.output, "Posting {} removed.", removed.id())?;
                self.persist()?;
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let Some(query) = self.prompt("Keywords (comma separated): ")? else {
            return Ok(());
        };
        let results = self.board.search_by_keyword(&query);
        if results.is_empty() {
            writeln!(self.output, "No postings found.")?;
        }
        for posting in &results {
            writeln!(self.output, "{}", describe(posting))?;
        }
        Ok(())
    }

    fn clean_expired(&mut self) -> Result<()> {
        if self.board.clean_expired() {
            writeln!(self.output, "Expired postings removed.")?;
            self.persist()?;
        } else {
            writeln!(self.output, "No expired postings.")?;
        }
        Ok(())
    }

    fn show_board(&mut self) -> Result<()> {
        if self.board.is_empty() {
            writeln!(self.output, "The board is empty.")?;
        }
        for posting in self.board.traverse() {
            writeln!(self.output, "{}", describe(posting))?;
        }
        Ok(())
    }

    fn add_keywords(&mut self, user: &Arc<User>) -> Result<()> {
        let Some(id) = self.prompt_id()? else {
            return Ok(());
        };
        let Some(words) = self.prompt("Keywords to add (comma separated): ")? else {
            return Ok(());
        };

        let mut added = 0;
        for word in words.split(',').map(str::trim).filter(|w| !w.is_empty()) {
            match self.board.add_keyword_to_posting(id, user, word) {
                Ok(()) => added += 1,
                Err(err @ (BoardError::NotFound(_) | BoardError::Unauthorized(_))) => {
                    writeln!(self.output, "{err}")?;
                    break;
                }
                Err(err) => writeln!(self.output, "'{word}': {err}")?,
            }
        }

        if added > 0 {
            writeln!(self.output, "{added} keyword(s) added to posting {id}.")?;
            self.persist()?;
        }
        Ok(())
    }

    /// Ask for a posting id; `None` on cancel (0), bad input, or end of input.
    fn prompt_id(&mut self) -> Result<Option<u32>> {
        let Some(raw) = self.prompt("Posting id (0 to cancel): ")? else {
            return Ok(None);
        };
        match raw.parse::<u32>() {
            Ok(0) => {
                writeln!(self.output, "Cancelled.")?;
                Ok(None)
            }
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Invalid id.")?;
                Ok(None)
            }
        }
    }

    /// Print `label`, then read one normalized line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(normalize_input(&line)))
    }

    /// Save after a mutation; a failure is reported but the change stays in memory.
    fn persist(&mut self) -> Result<()> {
        if let Err(err) = self.board.save(self.path) {
            warn!(%err, "board not saved");
            writeln!(self.output, "Warning: could not save the board: {err}")?;
        }
        Ok(())
    }
}

/// One-line summary of a posting for terminal output.
pub fn describe(posting: &Posting) -> String {
    let expiry = posting
        .expiry()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "#{} [{}] {} - {:.2} | keywords: {} | expires: {} | {} <{}>",
        posting.id(),
        posting.kind().label(),
        posting.title(),
        posting.price(),
        posting.keywords(),
        expiry,
        posting.owner().name(),
        posting.owner().address(),
    )
}
