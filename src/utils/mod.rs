// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by both front ends.

pub mod normalize_input;

/// Strip control/zero-width characters and collapse whitespace in typed input.
pub use normalize_input::normalize_input;
