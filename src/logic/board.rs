// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! The board aggregate: posting collection, id pool, search, cleanup, and load/save.
//!
//! Responsibilities:
//! - Keep `postings` (display order) and the id pool in lockstep.
//! - Enforce id uniqueness and owner-only mutation.
//! - Delegate the text format to [`crate::logic::storage`].

use std::collections::HashSet;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::error::{BoardError, Result};
use crate::logic::storage;
use crate::models::keywords::query_terms;
use crate::models::{Kind, Posting, User};

/// In-memory store of postings.
///
/// The id pool is derived state: it always holds exactly the ids in `postings` and only
/// serves O(1) duplicate and membership checks.
#[derive(Clone, Debug, Default)]
pub struct Board {
    postings: Vec<Posting>,
    id_pool: HashSet<u32>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from postings in order, rejecting repeated ids.
    ///
    /// # Errors
    ///
    /// [`BoardError::DuplicatePosting`] for the first repeated id.
    pub fn from_postings(postings: impl IntoIterator<Item = Posting>) -> Result<Self> {
        let mut board = Self::new();
        for posting in postings {
            board.insert(posting)?;
        }
        Ok(board)
    }

    /// Add a posting at the end of the board.
    ///
    /// For a buy posting, returns the sell postings already on the board that share at least
    /// one keyword with it, in board order. For a sell posting the result is empty.
    ///
    /// # Errors
    ///
    /// [`BoardError::DuplicatePosting`] when the id is already present.
    pub fn add(&mut self, posting: Posting) -> Result<Vec<Posting>> {
        let kind = posting.kind();
        let terms = posting.keywords().normalized();
        let id = posting.id();

        self.insert(posting)?;
        info!(id, kind = kind.label(), "posting added");

        if kind != Kind::Buy {
            return Ok(Vec::new());
        }

        let matches: Vec<Posting> = self
            .postings
            .iter()
            .filter(|p| p.kind() == Kind::Sell && p.keywords().intersects(&terms))
            .cloned()
            .collect();
        debug!(id, matches = matches.len(), "sell postings matching new buy posting");
        Ok(matches)
    }

    /// Remove the posting with `id` on behalf of `requester`, returning it.
    ///
    /// Ownership is only checked once the posting is found, so an unknown id is always
    /// reported as not found.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] or [`BoardError::Unauthorized`].
    pub fn remove(&mut self, id: u32, requester: &User) -> Result<Posting> {
        let index = self
            .postings
            .iter()
            .position(|p| p.id() == id)
            .ok_or(BoardError::NotFound(id))?;

        if !self.postings[index].is_owned_by(requester) {
            return Err(BoardError::Unauthorized(id));
        }

        let removed = self.postings.remove(index);
        self.id_pool.remove(&id);
        info!(id, "posting removed");
        Ok(removed)
    }

    /// Postings sharing at least one keyword with the comma-separated `query`.
    ///
    /// Matching ignores case and surrounding whitespace. A query without any terms returns
    /// nothing. Results keep board order.
    pub fn search_by_keyword(&self, query: &str) -> Vec<Posting> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let results: Vec<Posting> = self
            .postings
            .iter()
            .filter(|p| p.keywords().intersects(&terms))
            .cloned()
            .collect();
        debug!(query, results = results.len(), "keyword search");
        results
    }

    /// Drop every expired sell posting. Returns whether anything was removed.
    pub fn clean_expired(&mut self) -> bool {
        self.clean_expired_on(Local::now().date_naive())
    }

    /// [`Board::clean_expired`] against an explicit `today`.
    pub fn clean_expired_on(&mut self, today: NaiveDate) -> bool {
        let before = self.postings.len();
        let id_pool = &mut self.id_pool;
        self.postings.retain(|p| {
            let expired = p.is_expired_on(today);
            if expired {
                id_pool.remove(&p.id());
            }
            !expired
        });

        let removed = before - self.postings.len();
        if removed > 0 {
            info!(removed, %today, "expired postings cleaned");
        }
        removed > 0
    }

    /// Append `word` to the keywords of posting `id`, on behalf of its owner.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`], then [`BoardError::Unauthorized`], then the posting's own
    /// keyword validation.
    pub fn add_keyword_to_posting(&mut self, id: u32, requester: &User, word: &str) -> Result<()> {
        let posting = self
            .postings
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(BoardError::NotFound(id))?;

        if !posting.is_owned_by(requester) {
            return Err(BoardError::Unauthorized(id));
        }

        posting.add_keyword(word)?;
        debug!(id, word, "keyword added");
        Ok(())
    }

    /// Read-only forward view over the postings in board order.
    ///
    /// The view hands out shared references only, so nothing can be removed or modified
    /// through it.
    pub fn traverse(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    /// Independent copy of the postings.
    pub fn snapshot_postings(&self) -> Vec<Posting> {
        self.postings.clone()
    }

    /// Independent copy of the id pool.
    pub fn snapshot_ids(&self) -> HashSet<u32> {
        self.id_pool.clone()
    }

    pub fn get(&self, id: u32) -> Option<&Posting> {
        self.postings.iter().find(|p| p.id() == id)
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.id_pool.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Replace the board with the contents of `path`.
    ///
    /// The file is parsed into a fresh board first; the current state is only replaced when
    /// every record loaded. On error the board is left untouched.
    ///
    /// # Errors
    ///
    /// Persistence, record, validation, or duplicate-id errors from the file.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let loaded = Self::open(path)?;
        *self = loaded;
        Ok(())
    }

    /// Build a new board from the file at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Board::load`].
    pub fn open(path: &Path) -> Result<Self> {
        let postings = storage::read_postings(path)?;
        Self::from_postings(postings)
    }

    /// Rewrite `path` with the current postings.
    ///
    /// # Errors
    ///
    /// [`BoardError::Persistence`] wrapping the I/O failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        storage::write_postings(path, &self.postings)
    }

    fn insert(&mut self, posting: Posting) -> Result<()> {
        let id = posting.id();
        if self.postings.contains(&posting) || self.id_pool.contains(&id) {
            return Err(BoardError::DuplicatePosting(id));
        }
        self.postings.push(posting);
        self.id_pool.insert(id);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::models::PostingDraft;

    fn user(address: &str, name: &str) -> Arc<User> {
        Arc::new(User::new(address, name).unwrap())
    }

    fn giovanni() -> Arc<User> {
        user("giovanni.neri@example.com", "giovanniNeri")
    }

    fn posting(id: u32, owner: &Arc<User>, kind: &str, keywords: &str, expiry: &str) -> Posting {
        Posting::with_id(
            id,
            PostingDraft {
                owner: Some(Arc::clone(owner)),
                title: format!("Articolo {id}"),
                price: 10.0 + f64::from(id),
                kind: kind.into(),
                keywords: keywords.into(),
                expiry: Some(expiry.into()),
            },
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_pool_consistent(board: &Board) {
        let ids: HashSet<u32> = board.traverse().map(Posting::id).collect();
        assert_eq!(ids, board.snapshot_ids());
        assert_eq!(ids.len(), board.len());
    }

    // A fresh board has no postings and no ids.
    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(board.snapshot_ids().is_empty());
    }

    // Adding a sell posting returns no matches and records the id.
    #[test]
    fn add_sell_records_id() {
        let mut board = Board::new();
        let matches = board
            .add(posting(1, &giovanni(), "vendita", "elettronica", "2026-09-15"))
            .unwrap();

        assert!(matches.is_empty());
        assert!(board.contains_id(1));
        assert_pool_consistent(&board);
    }

    // A second posting with the same id is rejected and leaves the board unchanged.
    #[test]
    fn add_rejects_duplicate_id() {
        let mut board = Board::new();
        let owner = giovanni();
        board
            .add(posting(4321, &owner, "vendita", "tv", "2026-09-15"))
            .unwrap();

        let err = board
            .add(posting(4321, &owner, "acquisto", "altro", "2026-01-01"))
            .unwrap_err();

        assert!(matches!(err, BoardError::DuplicatePosting(4321)));
        assert_eq!(board.len(), 1);
        assert_pool_consistent(&board);
    }

    // Buy postings return overlapping sell postings only, in board order.
    #[test]
    fn add_buy_returns_matching_sell_postings() {
        let mut board = Board::new();
        let owner = giovanni();
        board
            .add(posting(1, &owner, "vendita", "informatica, laptop", "2026-09-15"))
            .unwrap();
        board
            .add(posting(2, &owner, "acquisto", "informatica", "2026-09-15"))
            .unwrap();
        board
            .add(posting(3, &owner, "vendita", "cucina", "2026-09-15"))
            .unwrap();
        board
            .add(posting(4, &owner, "vendita", "Tecnologia", "2026-09-15"))
            .unwrap();

        let matches = board
            .add(posting(5, &owner, "acquisto", "informatica, tecnologia", "2026-09-15"))
            .unwrap();

        let ids: Vec<u32> = matches.iter().map(Posting::id).collect();
        assert_eq!(ids, [1, 4]);
    }

    // Owners can remove their postings; others get Unauthorized.
    #[test]
    fn remove_checks_owner() {
        let mut board = Board::new();
        let owner = giovanni();
        let other = user("carlo.verdi@example.com", "carloVerdi");
        board
            .add(posting(7, &owner, "vendita", "tv", "2026-09-15"))
            .unwrap();

        assert!(matches!(
            board.remove(7, &other),
            Err(BoardError::Unauthorized(7))
        ));
        assert_eq!(board.len(), 1);

        let removed = board.remove(7, &owner).unwrap();
        assert_eq!(removed.id(), 7);
        assert!(board.is_empty());
        assert!(!board.contains_id(7));
        assert_pool_consistent(&board);
    }

    // Unknown ids are NotFound even for a user who owns nothing.
    #[test]
    fn remove_unknown_id_is_not_found_before_authorization() {
        let mut board = Board::new();
        board
            .add(posting(1, &giovanni(), "vendita", "tv", "2026-09-15"))
            .unwrap();
        let stranger = user("x@example.com", "stranger");

        assert!(matches!(
            board.remove(9999, &stranger),
            Err(BoardError::NotFound(9999))
        ));
    }

    // Search results depend only on lowercased, trimmed terms.
    #[test]
    fn search_ignores_case_and_whitespace() {
        let mut board = Board::new();
        let owner = giovanni();
        board
            .add(posting(1, &owner, "vendita", "elettronica, TV", "2026-01-20"))
            .unwrap();
        board
            .add(posting(2, &owner, "vendita", "elettronica, cucina", "2026-01-20"))
            .unwrap();

        let ids = |q: &str| -> Vec<u32> {
            board.search_by_keyword(q).iter().map(Posting::id).collect()
        };
        assert_eq!(ids("TV"), [1]);
        assert_eq!(ids(" tv "), [1]);
        assert_eq!(ids("Tv"), [1]);
        assert_eq!(ids("elettronica"), [1, 2]);
        assert_eq!(ids("cucina, tv"), [1, 2]);
        assert!(ids("gaming").is_empty());
        assert!(ids("").is_empty());
        assert!(ids(" , ").is_empty());
    }

    // Postings without keywords never match.
    #[test]
    fn search_skips_postings_without_keywords() {
        let mut board = Board::new();
        board
            .add(posting(1, &giovanni(), "acquisto", "", "2026-01-20"))
            .unwrap();
        assert!(board.search_by_keyword("anything").is_empty());
    }

    // Removed postings disappear from search.
    #[test]
    fn removed_posting_is_not_searchable() {
        let mut board = Board::new();
        let owner = giovanni();
        board
            .add(posting(1, &owner, "vendita", "tv", "2026-01-20"))
            .unwrap();
        board.remove(1, &owner).unwrap();
        assert!(board.search_by_keyword("tv").is_empty());
    }

    // Cleanup removes exactly the expired sell postings and is idempotent.
    #[test]
    fn clean_expired_removes_only_expired_sell() {
        let mut board = Board::new();
        let owner = giovanni();
        board
            .add(posting(1, &owner, "vendita", "a", "2025-05-01"))
            .unwrap();
        board
            .add(posting(2, &owner, "acquisto", "b", "2025-05-01"))
            .unwrap();
        board
            .add(posting(3, &owner, "vendita", "c", "2025-05-02"))
            .unwrap();
        board
            .add(posting(4, &owner, "vendita", "d", "2025-04-30"))
            .unwrap();

        let today = date(2025, 5, 2);
        assert!(board.clean_expired_on(today));

        let ids: Vec<u32> = board.traverse().map(Posting::id).collect();
        assert_eq!(ids, [2, 3]);
        assert_pool_consistent(&board);

        assert!(!board.clean_expired_on(today));
    }

    // Keyword addition checks existence, then ownership, then the word itself.
    #[test]
    fn add_keyword_to_posting_error_order() {
        let mut board = Board::new();
        let owner = giovanni();
        let other = user("carlo.verdi@example.com", "carloVerdi");
        board
            .add(posting(4321, &owner, "vendita", "elettronica", "2026-09-15"))
            .unwrap();

        assert!(matches!(
            board.add_keyword_to_posting(1, &other, "!!"),
            Err(BoardError::NotFound(1))
        ));
        assert!(matches!(
            board.add_keyword_to_posting(4321, &other, "!!"),
            Err(BoardError::Unauthorized(4321))
        ));
        assert!(matches!(
            board.add_keyword_to_posting(4321, &owner, "!!"),
            Err(BoardError::InvalidPosting(_))
        ));

        board
            .add_keyword_to_posting(4321, &owner, "smartphone")
            .unwrap();
        assert_eq!(board.search_by_keyword("smartphone").len(), 1);
    }

    // Snapshots are detached from the board.
    #[test]
    fn snapshots_are_independent() {
        let mut board = Board::new();
        let owner = giovanni();
        board
            .add(posting(1, &owner, "vendita", "tv", "2026-09-15"))
            .unwrap();

        let mut postings = board.snapshot_postings();
        let mut ids = board.snapshot_ids();
        postings.clear();
        ids.insert(99);
        postings.push(posting(50, &owner, "vendita", "x", "2026-09-15"));

        assert_eq!(board.len(), 1);
        assert!(!board.contains_id(99));
        assert!(board.get(50).is_none());
    }

    // Traversal follows insertion order and can also be used via `&board`.
    #[test]
    fn traverse_follows_insertion_order() {
        let mut board = Board::new();
        let owner = giovanni();
        for id in [5, 3, 9] {
            board
                .add(posting(id, &owner, "vendita", "tv", "2026-09-15"))
                .unwrap();
        }
        let ids: Vec<u32> = (&board).into_iter().map(Posting::id).collect();
        assert_eq!(ids, [5, 3, 9]);
    }

    // Save then load reproduces the board.
    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("annunci.txt");

        let mut board = Board::new();
        let owner = giovanni();
        board
            .add(posting(1, &owner, "vendita", "elettronica, TV", "2026-01-20"))
            .unwrap();
        board
            .add(posting(2, &owner, "acquisto", "sport", "2026-01-20"))
            .unwrap();
        board.save(&path).unwrap();

        let mut reloaded = Board::new();
        reloaded.load(&path).unwrap();

        assert_eq!(reloaded.snapshot_ids(), board.snapshot_ids());
        for (a, b) in board.traverse().zip(reloaded.traverse()) {
            assert_eq!(a.owner(), b.owner());
            assert_eq!(a.title(), b.title());
            assert_eq!(format!("{:.2}", a.price()), format!("{:.2}", b.price()));
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.keywords(), b.keywords());
            assert_eq!(a.expiry(), b.expiry());
        }
    }

    // A failing load leaves the previous state in place.
    #[test]
    fn failed_load_keeps_previous_state() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("annunci.txt");
        fs::write(
            &path,
            "1;anna@example.com;anna;Bici;80.00;acquisto;sport;null\n\
             1;anna@example.com;anna;Sci;90.00;acquisto;sport;null\n",
        )
        .unwrap();

        let mut board = Board::new();
        board
            .add(posting(42, &giovanni(), "vendita", "tv", "2026-09-15"))
            .unwrap();

        let err = board.load(&path).unwrap_err();
        assert!(matches!(err, BoardError::DuplicatePosting(1)));
        let ids: Vec<u32> = board.traverse().map(Posting::id).collect();
        assert_eq!(ids, [42]);
        assert_pool_consistent(&board);
    }

    // Loading replaces whatever the board held before.
    #[test]
    fn load_replaces_existing_postings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("annunci.txt");
        fs::write(&path, "8;anna@example.com;anna;Bici;80.00;acquisto;sport;null\n").unwrap();

        let mut board = Board::new();
        board
            .add(posting(42, &giovanni(), "vendita", "tv", "2026-09-15"))
            .unwrap();
        board.load(&path).unwrap();

        let ids: Vec<u32> = board.traverse().map(Posting::id).collect();
        assert_eq!(ids, [8]);
        assert!(!board.contains_id(42));
    }
}
