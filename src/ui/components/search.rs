// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Keyword search bar and results panel.

use std::collections::HashSet;

use eframe::egui;

use crate::logic::Board;
use crate::models::Posting;
use crate::models::keywords::query_terms;

#[derive(Clone, Default, Debug)]
pub struct SearchModel {
    /// Text in the search box.
    pub query: String,
    /// Query the current results belong to; `None` when no search is shown.
    active_query: Option<String>,
    results: Vec<Posting>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchMsg {
    QueryChanged(String),
    Run,
    Clear,
}

impl SearchModel {
    pub fn results(&self) -> &[Posting] {
        &self.results
    }

    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }
}

/// Apply a message, running searches against `board`.
pub fn update(model: &mut SearchModel, msg: SearchMsg, board: &Board) {
    match msg {
        SearchMsg::QueryChanged(text) => model.query = text,
        SearchMsg::Run => {
            model.results = board.search_by_keyword(&model.query);
            model.active_query = Some(model.query.clone());
        }
        SearchMsg::Clear => *model = SearchModel::default(),
    }
}

/// Re-run the active query after the board changed.
pub fn refresh(model: &mut SearchModel, board: &Board) {
    if let Some(query) = &model.active_query {
        model.results = board.search_by_keyword(query);
    }
}

/// Render the search bar and, when a search is active, its results.
pub fn view(ui: &mut egui::Ui, model: &SearchModel) -> Vec<SearchMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.label(egui_phosphor::regular::MAGNIFYING_GLASS);
        let mut query = model.query.clone();
        let resp = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search keywords, e.g. tv, cucina")
                .desired_width(280.0),
        );
        if resp.changed() {
            msgs.push(SearchMsg::QueryChanged(query));
        }
        if resp.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter)) {
            msgs.push(SearchMsg::Run);
        }
        if ui.button("Search").clicked() {
            msgs.push(SearchMsg::Run);
        }
        if model.active_query.is_some() && ui.button("Clear").clicked() {
            msgs.push(SearchMsg::Clear);
        }
    });

    let Some(active) = &model.active_query else {
        return msgs;
    };

    ui.add_space(6.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            egui::RichText::new(format!("{} result(s) for \"{active}\"", model.results.len()))
                .strong(),
        );
        let terms = query_terms(active);
        for posting in &model.results {
            render_result(ui, posting, &terms);
        }
    });

    msgs
}

/// One result line; keywords matching the query are highlighted.
fn render_result(ui: &mut egui::Ui, posting: &Posting, terms: &HashSet<String>) {
    ui.horizontal_wrapped(|ui| {
        ui.label(format!(
            "#{} [{}] {} - {:.2}",
            posting.id(),
            posting.kind().label(),
            posting.title(),
            posting.price()
        ));
        for keyword in posting.keywords().items() {
            let text = egui::RichText::new(keyword.as_str());
            let text = if terms.contains(&keyword.to_lowercase()) {
                text.strong()
                    .background_color(ui.visuals().selection.bg_fill)
            } else {
                text.color(egui::Color32::from_gray(110))
            };
            ui.label(text);
        }
    });
}
