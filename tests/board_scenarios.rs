// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! End-to-end board scenarios through the public API.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use bacheca::{Board, BoardError, Kind, Posting, PostingDraft, User};
use chrono::NaiveDate;
use tempfile::TempDir;

fn user(address: &str, name: &str) -> Arc<User> {
    Arc::new(User::new(address, name).unwrap())
}

fn draft(owner: &Arc<User>, title: &str, price: f64, kind: &str, keywords: &str) -> PostingDraft {
    PostingDraft {
        owner: Some(Arc::clone(owner)),
        title: title.into(),
        price,
        kind: kind.into(),
        keywords: keywords.into(),
        expiry: Some("2026-01-20".into()),
    }
}

fn ids(postings: &[Posting]) -> Vec<u32> {
    postings.iter().map(Posting::id).collect()
}

// Keyword search over two sell postings sharing one keyword.
#[test]
fn tv_and_fridge_search() {
    let owner = user("giovanni.neri@example.com", "giovanniNeri");
    let mut board = Board::new();
    let tv = Posting::new(draft(&owner, "TV", 150.0, "sell", "elettronica, TV")).unwrap();
    let fridge = Posting::new(draft(&owner, "Frigo", 200.0, "sell", "elettronica, cucina")).unwrap();
    let tv_id = tv.id();
    board.add(tv).unwrap();
    board.add(fridge).unwrap();

    assert_eq!(ids(&board.search_by_keyword("TV")), [tv_id]);
    assert_eq!(board.search_by_keyword("elettronica").len(), 2);
    assert!(board.search_by_keyword("gaming").is_empty());
}

// A buy posting returns exactly the overlapping sell posting.
#[test]
fn buy_posting_suggests_overlapping_sell() {
    let seller = user("carlo.verdi@example.com", "carloVerdi");
    let buyer = user("giovanni.neri@example.com", "giovanniNeri");
    let mut board = Board::new();
    board
        .add(Posting::with_id(1, draft(&seller, "Laptop", 900.0, "sell", "informatica")).unwrap())
        .unwrap();
    board
        .add(Posting::with_id(2, draft(&seller, "Pentola", 30.0, "sell", "cucina")).unwrap())
        .unwrap();

    let matches = board
        .add(
            Posting::with_id(
                3,
                draft(&buyer, "Cerco PC", 500.0, "buy", "informatica, tecnologia"),
            )
            .unwrap(),
        )
        .unwrap();

    assert_eq!(ids(&matches), [1]);
}

// Only the owner can remove a posting; the id pool follows.
#[test]
fn unauthorized_then_authorized_remove() {
    let a = user("anna@example.com", "anna");
    let b = user("bruno@example.com", "bruno");
    let mut board = Board::new();
    board
        .add(Posting::with_id(4321, draft(&a, "Smartphone", 279.0, "sell", "elettronica")).unwrap())
        .unwrap();

    assert!(matches!(
        board.remove(4321, &b),
        Err(BoardError::Unauthorized(4321))
    ));
    assert!(board.contains_id(4321));

    board.remove(4321, &a).unwrap();
    assert!(board.get(4321).is_none());
    assert!(!board.snapshot_ids().contains(&4321));
    assert!(board.search_by_keyword("elettronica").is_empty());
}

// A file mixing both record generations loads into equivalent postings.
#[test]
fn mixed_generation_file_loads() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("annunci.txt");
    fs::write(
        &path,
        "17;[email= anna@example.com, nome= anna];Bici;80,50;acquisto;sport;null\n\
         18;carlo.verdi@example.com;carloVerdi;TV;150.00;vendita;elettronica, TV;2026-01-20\n",
    )
    .unwrap();

    let mut board = Board::new();
    board.load(&path).unwrap();

    let anna = user("anna@example.com", "anna");
    let carlo = user("carlo.verdi@example.com", "carloVerdi");
    let expected = [
        Posting::with_id(17, draft(&anna, "Bici", 80.5, "acquisto", "sport")).unwrap(),
        Posting::with_id(18, draft(&carlo, "TV", 150.0, "vendita", "elettronica, TV")).unwrap(),
    ];

    let loaded: Vec<&Posting> = board.traverse().collect();
    assert_eq!(loaded.len(), expected.len());
    for (got, want) in loaded.into_iter().zip(&expected) {
        assert_eq!(got.id(), want.id());
        assert_eq!(got.owner(), want.owner());
        assert_eq!(got.title(), want.title());
        assert_eq!(got.price(), want.price());
        assert_eq!(got.kind(), want.kind());
        assert_eq!(got.keywords(), want.keywords());
        assert_eq!(got.expiry(), want.expiry());
    }
    assert_eq!(board.get(17).unwrap().kind(), Kind::Buy);
    assert_eq!(board.get(17).unwrap().expiry(), None);
    assert_eq!(board.snapshot_ids(), HashSet::from([17, 18]));
}

// Saving and reloading keeps every stored field; cleanup is idempotent afterwards.
#[test]
fn save_load_then_clean() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("annunci.txt");
    let owner = user("giovanni.neri@example.com", "giovanniNeri");

    let mut board = Board::new();
    board
        .add(Posting::with_id(1, draft(&owner, "TV", 150.0, "sell", "elettronica, TV")).unwrap())
        .unwrap();
    board
        .add(Posting::with_id(2, draft(&owner, "Bici", 80.0, "buy", "sport")).unwrap())
        .unwrap();
    board.save(&path).unwrap();

    let mut reloaded = Board::open(&path).unwrap();
    assert_eq!(reloaded.snapshot_ids(), board.snapshot_ids());

    let after_expiry = NaiveDate::from_ymd_opt(2026, 1, 21).unwrap();
    assert!(reloaded.clean_expired_on(after_expiry));
    assert!(!reloaded.clean_expired_on(after_expiry));
    let remaining: Vec<u32> = reloaded.traverse().map(Posting::id).collect();
    assert_eq!(remaining, [2]);
}

// Sub-cent prices are settled at construction, so a saved board always reopens.
#[test]
fn fractional_prices_keep_the_file_loadable() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("annunci.txt");
    let owner = user("anna@example.com", "anna");

    assert!(matches!(
        Posting::with_id(1, draft(&owner, "Bici", 0.004, "buy", "sport")),
        Err(BoardError::InvalidPosting(_))
    ));

    let mut board = Board::new();
    for (id, price) in [(2, 0.005), (3, 19.999), (4, 1e9)] {
        board
            .add(Posting::with_id(id, draft(&owner, "Bici", price, "buy", "sport")).unwrap())
            .unwrap();
    }
    board.save(&path).unwrap();

    let reloaded = Board::open(&path).unwrap();
    for posting in board.traverse() {
        assert_eq!(reloaded.get(posting.id()).unwrap().price(), posting.price());
    }
    assert_eq!(reloaded.get(3).unwrap().price(), 20.0);
}
