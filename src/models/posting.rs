// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Posting domain model: a single buy or sell listing and its validation rules.

use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

use crate::error::{BoardError, Result};
use crate::models::keywords::Keywords;
use crate::models::user::User;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// Largest id older board files could hold; ids live in `1..=MAX_ID`.
pub const MAX_ID: u32 = i32::MAX as u32;

/// Process-wide source for fresh posting ids.
static ID_RNG: Lazy<Mutex<StdRng>> = Lazy::new(|| Mutex::new(StdRng::from_entropy()));

/// Whether the owner wants to buy or to sell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    #[default]
    Buy,
    Sell,
}

impl Kind {
    /// Parse a kind token, case-insensitively.
    ///
    /// Accepts `buy`/`sell` as well as the stored tokens `acquisto`/`vendita`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "buy" | "acquisto" => Some(Self::Buy),
            "sell" | "vendita" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Token written to the board file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Buy => "acquisto",
            Kind::Sell => "vendita",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Buy => "Buy",
            Kind::Sell => "Sell",
        }
    }
}

/// Unvalidated posting fields as entered by a user or read from storage.
#[derive(Clone, Debug, Default)]
pub struct PostingDraft {
    pub owner: Option<Arc<User>>,
    pub title: String,
    pub price: f64,
    pub kind: String,
    pub keywords: String,
    pub expiry: Option<String>,
}

/// A validated listing on the board.
///
/// Two postings are equal when their ids are equal, whatever their other fields hold.
#[derive(Clone, Debug)]
pub struct Posting {
    id: u32,
    owner: Arc<User>,
    title: String,
    price: f64,
    kind: Kind,
    keywords: Keywords,
    expiry: Option<NaiveDate>,
}

impl Posting {
    /// Validate `draft` and assign a freshly generated id.
    ///
    /// The id is random and not checked for uniqueness; [`crate::logic::Board::add`]
    /// rejects collisions.
    ///
    /// # Errors
    ///
    /// Same as [`Posting::with_id`].
    pub fn new(draft: PostingDraft) -> Result<Self> {
        Self::with_id(generate_id(), draft)
    }

    /// Validate `draft` keeping a caller-supplied id (used when reloading a board).
    ///
    /// Checks run in a fixed order and stop at the first failure: id, owner, title, price,
    /// kind, keywords, expiry. The price is rounded to cents before it is checked, so the
    /// stored value is exactly what the board file holds. A buy posting drops any supplied
    /// expiry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidPosting`] naming the first failing field.
    pub fn with_id(id: u32, draft: PostingDraft) -> Result<Self> {
        if id == 0 || id > MAX_ID {
            return Err(BoardError::invalid_posting("id out of range"));
        }

        let PostingDraft {
            owner,
            title,
            price,
            kind,
            keywords,
            expiry,
        } = draft;

        let owner = owner.ok_or_else(|| BoardError::invalid_posting("owner required"))?;

        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::invalid_posting("title required"));
        }
        // `;` and line breaks would split the stored record.
        if title.contains([';', '\n', '\r']) {
            return Err(BoardError::invalid_posting(
                "title contains reserved characters",
            ));
        }

        let price = round_to_cents(price);
        if !(price.is_finite() && price > 0.0) {
            return Err(BoardError::invalid_posting("price must be positive"));
        }

        let kind = Kind::parse(&kind).ok_or_else(|| BoardError::invalid_posting("invalid kind"))?;

        let keywords = Keywords::parse(&keywords)?;

        let expiry = match kind {
            Kind::Sell => Some(
                expiry
                    .as_deref()
                    .and_then(parse_expiry)
                    .ok_or_else(|| BoardError::invalid_posting("missing/invalid expiry"))?,
            ),
            Kind::Buy => None,
        };

        Ok(Self {
            id,
            owner,
            title: title.to_string(),
            price,
            kind,
            keywords,
            expiry,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn owner(&self) -> &Arc<User> {
        &self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    pub fn expiry(&self) -> Option<NaiveDate> {
        self.expiry
    }

    /// True when `user` owns this posting.
    pub fn is_owned_by(&self, user: &User) -> bool {
        self.owner.as_ref() == user
    }

    /// Append a keyword; an existing keyword (any case) is silently kept once.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidPosting`] for blank words or words with characters
    /// other than letters, digits, and spaces.
    pub fn add_keyword(&mut self, word: &str) -> Result<()> {
        self.keywords.insert(word).map(|_| ())
    }

    /// Sell postings whose expiry is strictly before today's local date.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Local::now().date_naive())
    }

    /// Expiry check against an explicit `today`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.kind == Kind::Sell && self.expiry.is_some_and(|date| date < today)
    }
}

impl PartialEq for Posting {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Posting {}

impl Hash for Posting {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Parse a strict `yyyy-mm-dd` calendar date.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !DATE_RE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Prices are kept in whole cents.
fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Random id in `1..=MAX_ID`.
fn generate_id() -> u32 {
    let mut rng = ID_RNG.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    rng.gen_range(1..=MAX_ID)
}
