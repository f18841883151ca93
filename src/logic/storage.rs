// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Flat-file board format.
//!
//! One posting per line, `;`-separated:
//!
//! ```text
//! id;ownerAddress;ownerName;title;price;kind;keywords;expiry
//! ```
//!
//! Older files used seven fields, with the owner rendered as a single display string
//! (`[email= x, nome= y]`). Both shapes are read; only the eight-field shape is written.
//! Lines with any other field count are skipped.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{BoardError, Result};
use crate::models::posting::{MAX_ID, parse_expiry};
use crate::models::{Posting, PostingDraft, User};

/// Field separator of the board file.
pub const SEPARATOR: char = ';';

/// Marker written in the expiry column when a posting has none.
const NO_EXPIRY: &str = "null";

const CURRENT_FIELDS: usize = 8;
const LEGACY_FIELDS: usize = 7;

static LEGACY_OWNER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)e-?mail\s*=\s*(.+?)\s*,\s*(?:nome|name)\s*=\s*(.+)")
        .expect("legacy owner pattern is valid")
});

static OWNER_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:e-?mail|nome|name)\s*=\s*").expect("owner label pattern is valid")
});

/// Render one posting as a current-format record (no trailing newline).
pub fn render_record(posting: &Posting) -> String {
    let expiry = posting
        .expiry()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NO_EXPIRY.to_string());

    format!(
        "{id};{address};{name};{title};{price:.2};{kind};{keywords};{expiry}",
        id = posting.id(),
        address = posting.owner().address(),
        name = posting.owner().name(),
        title = posting.title(),
        price = posting.price(),
        kind = posting.kind().as_str(),
        keywords = posting.keywords(),
    )
}

/// Render a whole board, one record per line.
pub fn render_board<'a>(postings: impl IntoIterator<Item = &'a Posting>) -> String {
    let mut out = String::new();
    for posting in postings {
        out.push_str(&render_record(posting));
        out.push('\n');
    }
    out
}

/// Parse board file contents into postings, in file order.
///
/// Owners that appear on several lines share one `Arc<User>`. Duplicate ids are not
/// checked here; the board does that while inserting.
///
/// # Errors
///
/// Propagates the first record that fails to parse or validate.
pub fn parse_board(contents: &str) -> Result<Vec<Posting>> {
    let mut owners: HashMap<User, Arc<User>> = HashMap::new();
    let mut postings = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        let line_no = idx + 1;
        if let Some(posting) = parse_record(line_no, line, &mut owners)? {
            postings.push(posting);
        }
    }

    Ok(postings)
}

/// Parse a single line. Returns `Ok(None)` for lines that are skipped by field count.
fn parse_record(
    line_no: usize,
    line: &str,
    owners: &mut HashMap<User, Arc<User>>,
) -> Result<Option<Posting>> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();

    let (id, owner, rest) = match fields.as_slice() {
        [id, address, name, rest @ ..] if fields.len() == CURRENT_FIELDS => {
            let owner = User::new(address.trim(), name.trim())?;
            (*id, owner, rest)
        }
        [id, owner, rest @ ..] if fields.len() == LEGACY_FIELDS => {
            (*id, parse_legacy_owner(owner)?, rest)
        }
        _ => {
            debug!(
                line = line_no,
                fields = fields.len(),
                "skipping record with unexpected field count"
            );
            return Ok(None);
        }
    };

    let [title, price, kind, keywords, expiry] = rest else {
        return Ok(None);
    };

    let id = parse_id(line_no, id)?;
    let price = parse_price(line_no, price)?;
    let expiry = parse_stored_expiry(line_no, expiry)?;
    let owner = owners
        .entry(owner.clone())
        .or_insert_with(|| Arc::new(owner))
        .clone();

    let draft = PostingDraft {
        owner: Some(owner),
        title: title.trim().to_string(),
        price,
        kind: kind.trim().to_string(),
        keywords: keywords.trim().to_string(),
        expiry,
    };

    Posting::with_id(id, draft).map(Some)
}

fn parse_id(line_no: usize, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(BoardError::malformed_record(line_no, "id must be positive")),
        Ok(id) if id > MAX_ID => Err(BoardError::malformed_record(
            line_no,
            format!("id {id} out of range"),
        )),
        Ok(id) => Ok(id),
        Err(err) => Err(BoardError::malformed_record(
            line_no,
            format!("invalid id '{}': {err}", raw.trim()),
        )),
    }
}

/// Prices are written with `.`, but older files may use a decimal comma.
fn parse_price(line_no: usize, raw: &str) -> Result<f64> {
    let normalized = raw.trim().replace(',', ".");
    normalized.parse::<f64>().map_err(|err| {
        BoardError::malformed_record(line_no, format!("invalid price '{}': {err}", raw.trim()))
    })
}

fn parse_stored_expiry(line_no: usize, raw: &str) -> Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(NO_EXPIRY) {
        return Ok(None);
    }
    if parse_expiry(raw).is_none() {
        return Err(BoardError::malformed_record(
            line_no,
            format!("invalid expiry date '{raw}'"),
        ));
    }
    Ok(Some(raw.to_string()))
}

/// Recover a user from the owner column of a seven-field record.
///
/// Tries `email=<address>, nome=<name>` extraction first (labels are case-insensitive and
/// `name=` is accepted too), then falls back to splitting on the first comma once brackets and
/// labels are stripped.
///
/// # Errors
///
/// Returns [`BoardError::InvalidStoredUser`] when neither strategy yields a valid user.
pub fn parse_legacy_owner(raw: &str) -> Result<User> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardError::invalid_stored_user(raw, "empty owner"));
    }
    let inner = strip_owner_wrapper(trimmed);

    if let Some(caps) = LEGACY_OWNER_RE.captures(inner)
        && let (Some(address), Some(name)) = (caps.get(1), caps.get(2))
    {
        let name = name.as_str().trim().trim_end_matches(']').trim();
        if let Ok(user) = User::new(address.as_str().trim(), name) {
            return Ok(user);
        }
    }

    let cleaned = OWNER_LABEL_RE.replace_all(inner, "").replace(['[', ']'], "");
    match cleaned.split_once(',') {
        Some((address, name)) => User::new(address.trim(), name.trim())
            .map_err(|err| BoardError::invalid_stored_user(raw, err.to_string())),
        None => Err(BoardError::invalid_stored_user(
            raw,
            "expected 'email=<address>, nome=<name>'",
        )),
    }
}

/// Drop an optional `Utente` prefix and one pair of surrounding brackets.
fn strip_owner_wrapper(raw: &str) -> &str {
    let without_prefix = raw.strip_prefix("Utente").unwrap_or(raw).trim();
    without_prefix
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(without_prefix)
}

/// Read and parse a board file.
///
/// # Errors
///
/// [`BoardError::Persistence`] when the file cannot be read, or the first record error.
pub fn read_postings(path: &Path) -> Result<Vec<Posting>> {
    let contents = fs::read_to_string(path)
        .map_err(|err| BoardError::persistence("reading board file", path, err))?;
    let postings = parse_board(&contents)?;
    info!(path = %path.display(), count = postings.len(), "board file read");
    Ok(postings)
}

/// Truncate and rewrite `path` with the given postings.
///
/// Parent directories are created if missing.
///
/// # Errors
///
/// [`BoardError::Persistence`] wrapping the underlying I/O failure.
pub fn write_postings<'a>(
    path: &Path,
    postings: impl IntoIterator<Item = &'a Posting>,
) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|err| BoardError::persistence("creating board directory", parent, err))?;
    }

    let contents = render_board(postings);
    fs::write(path, contents.as_bytes())
        .map_err(|err| BoardError::persistence("writing board file", path, err))?;
    info!(path = %path.display(), "board file written");
    Ok(())
}
