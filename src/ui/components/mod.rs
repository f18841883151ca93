// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components structured for MVU-style updates.

pub mod board_table;
pub mod date_picker;
pub mod keywords;
pub mod login;
pub mod posting_form;
pub mod search;
pub mod toggle;

pub use toggle::toggle_switch;
