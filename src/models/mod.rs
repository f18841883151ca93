// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types and validation helpers shared between the board and front ends.

pub mod keywords;
pub mod posting;
pub mod user;

pub use keywords::Keywords;
pub use posting::{Kind, Posting, PostingDraft};
pub use user::User;
