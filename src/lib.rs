// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Classified postings board: validated users and postings, a keyword-searchable board, a
//! flat-file store, and two front ends (terminal and egui desktop).

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod mvu;
pub mod tracing_setup;
pub mod ui;
pub mod utils;

pub use error::{BoardError, Result};
pub use logic::Board;
pub use models::{Kind, Posting, PostingDraft, User};
