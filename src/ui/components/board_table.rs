// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Board listing. Rows owned by the logged-in user get remove and add-keyword actions.

use eframe::egui;

use crate::logic::Board;
use crate::models::User;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardTableMsg {
    Remove(u32),
    AddKeywords(u32),
}

/// Render every posting in board order.
pub fn view(ui: &mut egui::Ui, board: &Board, user: &User) -> Vec<BoardTableMsg> {
    let mut msgs = Vec::new();

    if board.is_empty() {
        ui.label(
            egui::RichText::new("No postings yet.")
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
        return msgs;
    }

    egui::Grid::new("board_grid")
        .num_columns(8)
        .striped(true)
        .spacing(egui::vec2(12.0, 6.0))
        .show(ui, |ui| {
            for header in ["Id", "Title", "Price", "Kind", "Keywords", "Expires", "Owner", ""] {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();

            for posting in board {
                ui.label(posting.id().to_string());
                ui.label(posting.title());
                ui.label(format!("{:.2}", posting.price()));
                ui.label(posting.kind().label());
                ui.label(posting.keywords().to_string());
                ui.label(
                    posting
                        .expiry()
                        .map(|date| date.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".into()),
                );
                ui.label(posting.owner().name())
                    .on_hover_text(posting.owner().address());

                if posting.is_owned_by(user) {
                    ui.horizontal(|ui| {
                        if ui
                            .button(egui_phosphor::regular::TAG_SIMPLE)
                            .on_hover_text("Add keyword(s)")
                            .clicked()
                        {
                            msgs.push(BoardTableMsg::AddKeywords(posting.id()));
                        }
                        if ui
                            .button(
                                egui::RichText::new(egui_phosphor::regular::TRASH_SIMPLE)
                                    .color(egui::Color32::from_gray(140)),
                            )
                            .on_hover_text("Remove posting")
                            .clicked()
                        {
                            msgs.push(BoardTableMsg::Remove(posting.id()));
                        }
                    });
                } else {
                    ui.label("");
                }
                ui.end_row();
            }
        });

    msgs
}
