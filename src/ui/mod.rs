// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the postings board.
//! Handles layout, the periodic tick, and wiring to the persistence worker.

pub mod components;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use eframe::egui;

use crate::logic::Board;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::{board_table, keywords, login, posting_form, search, toggle_switch};

/// How often the board view refreshes and, with auto-clean on, purges expired postings.
const TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Stateful egui application around the board model.
pub struct BachecaApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
    last_tick: Instant,
}

impl BachecaApp {
    pub fn new(board: Board, board_path: PathBuf) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        // One worker so saves reach the disk in the order they were queued.
        std::thread::spawn(move || {
            for cmd in cmd_rx.iter() {
                let msg = mvu::run_command(cmd);
                if msg_tx.send(msg).is_err() {
                    break;
                }
            }
        });

        Self {
            model: AppModel::new(board, board_path),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
            last_tick: Instant::now(),
        }
    }
}

impl eframe::App for BachecaApp {
    /// Drives a single UI frame.
    ///
    /// Drains worker replies, emits a tick every [`TICK_INTERVAL`], applies queued messages to
    /// the model (forwarding resulting commands to the worker), then renders either the login
    /// view or the board view.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command worker.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            self.last_tick = Instant::now();
            self.inbox.push(Msg::Tick(Local::now().date_naive()));
        }
        ctx.request_repaint_after(TICK_INTERVAL);

        self.process_inbox();

        if self.model.session.is_none() {
            self.render_status_panel(ctx);
            self.render_error_modal(ctx);
            egui::CentralPanel::default().show(ctx, |ui| {
                let msgs = login::view(ui, &self.model.login);
                self.inbox.extend(msgs.into_iter().map(Msg::Login));
            });
            return;
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Bacheca");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                    ui.separator();
                    self.render_session_controls(ui);
                    ui.separator();
                    self.render_board_controls(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);
        self.render_suggestions(ctx);
        let kw_msgs = keywords::view(ctx, &self.model.keywords);
        self.inbox.extend(kw_msgs.into_iter().map(Msg::Keywords));

        self.render_status_panel(ctx);

        egui::SidePanel::left("posting_form_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                let msgs = posting_form::view(ui, &self.model.form);
                self.inbox.extend(msgs.into_iter().map(Msg::Form));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            let msgs = search::view(ui, &self.model.search);
            self.inbox.extend(msgs.into_iter().map(Msg::Search));
            ui.add_space(12.0);

            ui.label(
                egui::RichText::new(format!("{} posting(s)", self.model.board.len())).strong(),
            );
            ui.add_space(4.0);
            egui::ScrollArea::both().show(ui, |ui| {
                if let Some(user) = self.model.session.clone() {
                    let msgs = board_table::view(ui, &self.model.board, &user);
                    self.inbox.extend(msgs.into_iter().map(Msg::Table));
                }
            });
        });
    }
}

impl BachecaApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Apply queued messages until exhausted, sending produced commands to the worker.
    fn process_inbox(&mut self) {
        let mut msgs = std::mem::take(&mut self.inbox);
        msgs.reverse();
        while let Some(msg) = msgs.pop() {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// Logged-in user and the logout button.
    fn render_session_controls(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(format!("{} Log out", egui_phosphor::regular::SIGN_OUT))
            .clicked()
        {
            self.inbox.push(Msg::Logout);
        }
        if let Some(user) = &self.model.session {
            ui.label(format!("{} {}", egui_phosphor::regular::USER, user.name()))
                .on_hover_text(user.address());
        }
    }

    /// Open, clean, and auto-clean controls.
    fn render_board_controls(&mut self, ui: &mut egui::Ui) {
        let mut auto_clean = self.model.auto_clean;
        if toggle_switch(ui, &mut auto_clean, "Auto-clean")
            .on_hover_text("Remove expired sell postings automatically")
            .changed()
        {
            self.inbox.push(Msg::SetAutoClean(auto_clean));
        }

        if ui
            .button(format!("{} Clean expired", egui_phosphor::regular::BROOM))
            .clicked()
        {
            self.inbox
                .push(Msg::CleanExpired(Local::now().date_naive()));
        }

        if ui
            .button(format!("{} Open board…", egui_phosphor::regular::FOLDER_OPEN))
            .on_hover_text(self.model.board_path.display().to_string())
            .clicked()
        {
            self.inbox.push(Msg::OpenBoardRequested);
        }
    }

    /// "You might like" window listing sell postings matching the last buy posting.
    fn render_suggestions(&mut self, ctx: &egui::Context) {
        if self.model.suggestions.is_empty() {
            return;
        }
        egui::Window::new("You might like")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 48.0))
            .show(ctx, |ui| {
                for posting in &self.model.suggestions {
                    ui.label(format!(
                        "#{} {} - {:.2} ({})",
                        posting.id(),
                        posting.title(),
                        posting.price(),
                        posting.keywords()
                    ));
                }
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    self.inbox.push(Msg::DismissSuggestions);
                }
            });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    fn render_status_panel(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0));
                }
            });
        }
    }
}
