// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Board aggregate and its flat-file persistence.

pub mod board;
pub mod storage;

pub use board::Board;
