// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Keyword collection domain helper.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BoardError, Result};

static KEYWORD_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}0-9 ]+(,\s*[\p{L}0-9 ]+)*$").expect("keyword list pattern is valid")
});

static KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}0-9 ]+$").expect("keyword pattern is valid"));

/// Insertion-ordered keyword set.
///
/// Case of the first occurrence is kept for display; membership and search compare
/// lowercased forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keywords {
    items: Vec<String>,
}

impl Keywords {
    /// Parse a comma-separated keyword list such as `"elettronica, TV"`.
    ///
    /// Blank input yields an empty set. Duplicates collapse onto their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidPosting`] when the list contains anything other than
    /// comma-separated runs of letters, digits, and spaces.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut kw = Self::default();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(kw);
        }
        if !KEYWORD_LIST_RE.is_match(trimmed) {
            return Err(BoardError::invalid_posting("malformed keywords"));
        }
        for part in trimmed.split(',') {
            let word = part.trim();
            if !word.is_empty() {
                kw.insert_unchecked(word);
            }
        }
        Ok(kw)
    }

    /// Validate and append a single keyword. Returns whether it was new.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidPosting`] for blank words or words containing characters
    /// other than letters, digits, and spaces.
    pub fn insert(&mut self, word: &str) -> Result<bool> {
        let word = word.trim();
        if word.is_empty() {
            return Err(BoardError::invalid_posting("keyword must not be blank"));
        }
        if !KEYWORD_RE.is_match(word) {
            return Err(BoardError::invalid_posting(
                "keyword may contain only letters, digits, and spaces",
            ));
        }
        Ok(self.insert_unchecked(word))
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Lowercased view used for keyword-intersection search.
    pub fn normalized(&self) -> HashSet<String> {
        self.items.iter().map(|kw| kw.to_lowercase()).collect()
    }

    /// True when at least one keyword (case-insensitive) is in `query`.
    ///
    /// `query` must already be lowercased, as produced by [`query_terms`].
    pub fn intersects(&self, query: &HashSet<String>) -> bool {
        self.items.iter().any(|kw| query.contains(&kw.to_lowercase()))
    }

    fn insert_unchecked(&mut self, word: &str) -> bool {
        let lower = word.to_lowercase();
        if self.items.iter().any(|kw| kw.to_lowercase() == lower) {
            return false;
        }
        self.items.push(word.to_string());
        true
    }
}

/// Stored rendering: keywords joined by `", "` in insertion order.
impl fmt::Display for Keywords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.items.join(", "))
    }
}

/// Normalize a search query: split on commas, trim, drop empties, lowercase.
pub fn query_terms(query: &str) -> HashSet<String> {
    query
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}
