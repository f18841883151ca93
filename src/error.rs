// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Structured error type for board, posting, and identity operations.
//!
//! Front ends wrap these in `anyhow` where convenient; the core keeps them typed so callers
//! can match on the failure kind (e.g. treat `Unauthorized` differently from `NotFound`).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure the board core can report.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Malformed address or name when building a [`crate::models::User`].
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// A posting field (or an added keyword) failed validation.
    #[error("invalid posting: {0}")]
    InvalidPosting(String),

    /// The id is already present on the board.
    #[error("posting {0} is already on the board")]
    DuplicatePosting(u32),

    /// No posting with this id exists.
    #[error("posting {0} not found")]
    NotFound(u32),

    /// The requester does not own the posting.
    #[error("not authorized to modify posting {0}")]
    Unauthorized(u32),

    /// Owner string of a legacy 7-field record could not be turned into a user.
    #[error("unrecognized stored owner '{raw}': {reason}")]
    InvalidStoredUser { raw: String, reason: String },

    /// A well-shaped record carried an unparsable id, price, or date.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Reading or writing the board file failed.
    #[error("{action} {path:?} failed: {source}")]
    Persistence {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

impl BoardError {
    pub fn invalid_identity(reason: impl Into<String>) -> Self {
        Self::InvalidIdentity(reason.into())
    }

    pub fn invalid_posting(reason: impl Into<String>) -> Self {
        Self::InvalidPosting(reason.into())
    }

    pub fn invalid_stored_user(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStoredUser {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_record(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Wrap an I/O failure with the action and path that triggered it.
    pub fn persistence(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Persistence {
            action,
            path: path.into(),
            source,
        }
    }
}
