// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel for the desktop front end.
//!
//! The model owns the board. File I/O never runs inside `update`: it is described by a
//! [`Command`] and executed by [`run_command`] on a worker, which answers with a [`Msg`].

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::DEFAULT_BOARD_FILE;
use crate::logic::{Board, storage};
use crate::models::{Posting, User};
use crate::ui::components::board_table::BoardTableMsg;
use crate::ui::components::keywords::{self, KeywordsModel, KeywordsMsg, KeywordsRequest};
use crate::ui::components::login::{self, LoginModel, LoginMsg, LoginOutcome};
use crate::ui::components::posting_form::{self, PostingFormModel, PostingFormMsg};
use crate::ui::components::search::{self, SearchModel, SearchMsg};

/// Top-level application state.
pub struct AppModel {
    /// Postings shown and edited by the GUI.
    pub board: Board,
    /// File every successful mutation is saved to.
    pub board_path: PathBuf,
    /// Logged-in user; `None` shows the login view.
    pub session: Option<Arc<User>>,
    pub login: LoginModel,
    pub form: PostingFormModel,
    pub search: SearchModel,
    pub keywords: KeywordsModel,
    /// Sell postings suggested after the last buy posting was added.
    pub suggestions: Vec<Posting>,
    /// Purge expired postings on every tick.
    pub auto_clean: bool,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(board: Board, board_path: PathBuf) -> Self {
        Self {
            board,
            board_path,
            session: None,
            login: LoginModel::default(),
            form: PostingFormModel::default(),
            search: SearchModel::default(),
            keywords: KeywordsModel::default(),
            suggestions: Vec::new(),
            auto_clean: false,
            status: None,
            error: None,
            pending_commands: 0,
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(Board::new(), PathBuf::from(DEFAULT_BOARD_FILE))
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    Login(LoginMsg),
    Logout,
    Form(PostingFormMsg),
    Table(BoardTableMsg),
    Keywords(KeywordsMsg),
    Search(SearchMsg),
    /// Remove expired sell postings as of the given day.
    CleanExpired(NaiveDate),
    /// Periodic refresh carrying the current local date.
    Tick(NaiveDate),
    SetAutoClean(bool),
    OpenBoardRequested,
    BoardFilePicked(Option<PathBuf>),
    BoardLoaded {
        path: PathBuf,
        result: Result<Board, String>,
    },
    SaveCompleted(Result<PathBuf, String>),
    DismissSuggestions,
    DismissError,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    PickBoardFile,
    LoadBoard(PathBuf),
    /// Write an owned snapshot so the worker never touches the live board.
    SaveBoard {
        path: PathBuf,
        postings: Vec<Posting>,
    },
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Login(m) => match login::update(&mut model.login, m) {
            Some(LoginOutcome::LoggedIn(user)) => {
                info!(address = user.address(), "gui session started");
                surface_event(model, format!("Logged in as {}.", user.name()), false);
                model.session = Some(Arc::new(user));
            }
            Some(LoginOutcome::Rejected(message)) => surface_event(model, message, true),
            None => {}
        },
        Msg::Logout => {
            model.session = None;
            model.search = SearchModel::default();
            model.keywords = KeywordsModel::default();
            model.suggestions.clear();
            surface_event(model, "Logged out.".to_string(), false);
        }
        Msg::Form(PostingFormMsg::Submit) => submit_posting(model, cmds),
        Msg::Form(m) => posting_form::update(&mut model.form, m),
        Msg::Table(BoardTableMsg::Remove(id)) => remove_posting(model, id, cmds),
        Msg::Table(BoardTableMsg::AddKeywords(id)) => {
            keywords::update(&mut model.keywords, KeywordsMsg::OpenFor(id));
        }
        Msg::Keywords(m) => {
            if let Some(request) = keywords::update(&mut model.keywords, m) {
                add_keywords(model, request, cmds);
            }
        }
        Msg::Search(m) => search::update(&mut model.search, m, &model.board),
        Msg::CleanExpired(today) => {
            if model.board.clean_expired_on(today) {
                after_mutation(model, cmds);
                surface_event(model, "Expired postings removed.".to_string(), false);
            } else {
                surface_event(model, "No expired postings.".to_string(), false);
            }
        }
        Msg::Tick(today) => {
            if model.auto_clean && model.board.clean_expired_on(today) {
                after_mutation(model, cmds);
                surface_event(model, "Expired postings removed.".to_string(), false);
            }
        }
        Msg::SetAutoClean(on) => model.auto_clean = on,
        Msg::OpenBoardRequested => cmds.push(Command::PickBoardFile),
        Msg::BoardFilePicked(Some(path)) => cmds.push(Command::LoadBoard(path)),
        Msg::BoardFilePicked(None) => surface_event(model, "Open cancelled.".to_string(), false),
        Msg::BoardLoaded { path, result } => match result {
            Ok(board) => {
                model.board = board;
                search::refresh(&mut model.search, &model.board);
                model.suggestions.clear();
                let message = format!(
                    "Loaded {} posting(s) from {}",
                    model.board.len(),
                    path.display()
                );
                surface_event(model, message, false);
                model.board_path = path;
            }
            Err(err) => surface_event(
                model,
                format!("Failed to open {}:\n\n{err}", path.display()),
                true,
            ),
        },
        Msg::SaveCompleted(result) => match result {
            Ok(path) => {
                model.status = Some(format!("Board saved: {}", path.display()));
            }
            Err(err) => surface_event(model, format!("Failed to save board:\n\n{err}"), true),
        },
        Msg::DismissSuggestions => model.suggestions.clear(),
        Msg::DismissError => model.error = None,
    }
}

/// Execute a command and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::PickBoardFile => {
            let file = rfd::FileDialog::new()
                .set_title("Open board file")
                .add_filter("Board file", &["txt"])
                .pick_file();
            Msg::BoardFilePicked(file)
        }
        Command::LoadBoard(path) => {
            let result = Board::open(&path).map_err(|err| err.to_string());
            Msg::BoardLoaded { path, result }
        }
        Command::SaveBoard { path, postings } => {
            let res = storage::write_postings(&path, &postings).map(|()| path);
            Msg::SaveCompleted(res.map_err(|err| err.to_string()))
        }
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

/// Refresh derived views and queue a save of the current postings.
fn after_mutation(model: &mut AppModel, cmds: &mut Vec<Command>) {
    search::refresh(&mut model.search, &model.board);
    cmds.push(Command::SaveBoard {
        path: model.board_path.clone(),
        postings: model.board.snapshot_postings(),
    });
}

fn submit_posting(model: &mut AppModel, cmds: &mut Vec<Command>) {
    let Some(owner) = model.session.clone() else {
        surface_event(model, "Please log in first.".to_string(), true);
        return;
    };

    let draft = match posting_form::to_draft(&model.form, owner) {
        Ok(draft) => draft,
        Err(err) => return surface_event(model, err, true),
    };
    let posting = match Posting::new(draft) {
        Ok(posting) => posting,
        Err(err) => return surface_event(model, err.to_string(), true),
    };

    let id = posting.id();
    match model.board.add(posting) {
        Ok(matches) => {
            posting_form::clear(&mut model.form);
            model.suggestions = matches;
            after_mutation(model, cmds);
            surface_event(model, format!("Posting {id} added."), false);
        }
        Err(err) => {
            warn!(id, %err, "posting rejected");
            surface_event(model, err.to_string(), true);
        }
    }
}

fn remove_posting(model: &mut AppModel, id: u32, cmds: &mut Vec<Command>) {
    let Some(user) = model.session.clone() else {
        return surface_event(model, "Please log in first.".to_string(), true);
    };
    match model.board.remove(id, &user) {
        Ok(_) => {
            after_mutation(model, cmds);
            surface_event(model, format!("Posting {id} removed."), false);
        }
        Err(err) => surface_event(model, err.to_string(), true),
    }
}

/// Add each requested word, summarizing successes and per-word failures.
fn add_keywords(model: &mut AppModel, request: KeywordsRequest, cmds: &mut Vec<Command>) {
    let Some(user) = model.session.clone() else {
        return surface_event(model, "Please log in first.".to_string(), true);
    };
    let KeywordsRequest { posting_id, words } = request;

    let mut added = 0usize;
    let mut failures = Vec::new();
    for word in &words {
        match model.board.add_keyword_to_posting(posting_id, &user, word) {
            Ok(()) => added += 1,
            Err(err) => failures.push(format!("'{word}': {err}")),
        }
    }

    if added > 0 {
        after_mutation(model, cmds);
    }

    match (added, failures.is_empty()) {
        (0, true) => surface_event(model, "No keywords entered.".to_string(), false),
        (a, true) => surface_event(model, format!("Added {a} keyword(s)."), false),
        (a, false) => surface_event(
            model,
            format!("Added {a} keyword(s); skipped:\n{}", failures.join("\n")),
            true,
        ),
    }
}
