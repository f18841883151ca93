// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! New-posting form. Holds raw text until submit, then builds a [`PostingDraft`].

use std::sync::Arc;

use eframe::egui;

use crate::models::{Kind, PostingDraft, User};
use crate::ui::components::date_picker::{self, DateModel, DateMsg};
use crate::utils::normalize_input;

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct PostingFormModel {
    pub title: String,
    /// Price as typed; `,` is accepted as decimal separator.
    pub price: String,
    pub kind: Kind,
    pub keywords: String,
    pub expiry: DateModel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostingFormMsg {
    TitleChanged(String),
    PriceChanged(String),
    KindChanged(Kind),
    KeywordsChanged(String),
    Expiry(DateMsg),
    Submit,
    Clear,
}

/// Apply a field message. `Submit` is handled by the caller, which owns the board.
pub fn update(model: &mut PostingFormModel, msg: PostingFormMsg) {
    match msg {
        PostingFormMsg::TitleChanged(text) => model.title = text,
        PostingFormMsg::PriceChanged(text) => model.price = text,
        PostingFormMsg::KindChanged(kind) => model.kind = kind,
        PostingFormMsg::KeywordsChanged(text) => model.keywords = text,
        PostingFormMsg::Expiry(m) => date_picker::update(&mut model.expiry, m),
        PostingFormMsg::Submit => {}
        PostingFormMsg::Clear => clear(model),
    }
}

/// Reset the text fields, keeping the selected kind for the next entry.
pub fn clear(model: &mut PostingFormModel) {
    *model = PostingFormModel {
        kind: model.kind,
        ..Default::default()
    };
}

/// Build a draft owned by `owner` from the typed fields.
///
/// Only the price is parsed here; every other rule is left to posting validation so both
/// front ends report the same messages.
pub fn to_draft(model: &PostingFormModel, owner: Arc<User>) -> Result<PostingDraft, String> {
    let raw_price = normalize_input(&model.price).replace(',', ".");
    let price = raw_price
        .parse::<f64>()
        .map_err(|_| "Price must be a number.".to_string())?;

    let expiry = match model.kind {
        Kind::Sell => Some(model.expiry.as_expiry()),
        Kind::Buy => None,
    };

    Ok(PostingDraft {
        owner: Some(owner),
        title: normalize_input(&model.title),
        price,
        kind: model.kind.as_str().to_string(),
        keywords: normalize_input(&model.keywords),
        expiry,
    })
}

/// Render the form and return any triggered messages.
pub fn view(ui: &mut egui::Ui, model: &PostingFormModel) -> Vec<PostingFormMsg> {
    let mut msgs = Vec::new();

    ui.heading("New posting");
    ui.add_space(6.0);

    egui::Grid::new("posting_form_grid")
        .num_columns(2)
        .spacing(egui::vec2(8.0, 10.0))
        .show(ui, |ui| {
            ui.label("Kind");
            let mut kind = model.kind;
            ui.horizontal(|ui| {
                ui.selectable_value(
                    &mut kind,
                    Kind::Buy,
                    format!("{} Buy", egui_phosphor::regular::SHOPPING_CART),
                );
                ui.selectable_value(
                    &mut kind,
                    Kind::Sell,
                    format!("{} Sell", egui_phosphor::regular::TAG),
                );
            });
            if kind != model.kind {
                msgs.push(PostingFormMsg::KindChanged(kind));
            }
            ui.end_row();

            ui.label("Title");
            let mut title = model.title.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut title).hint_text("e.g., Smartphone"))
                .changed()
            {
                msgs.push(PostingFormMsg::TitleChanged(title));
            }
            ui.end_row();

            ui.label("Price");
            let mut price = model.price.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut price).hint_text("e.g., 279,00"))
                .changed()
            {
                msgs.push(PostingFormMsg::PriceChanged(price));
            }
            ui.end_row();

            ui.label("Keywords");
            let mut keywords = model.keywords.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut keywords)
                        .hint_text("e.g., elettronica, touchscreen"),
                )
                .changed()
            {
                msgs.push(PostingFormMsg::KeywordsChanged(keywords));
            }
            ui.end_row();

            if model.kind == Kind::Sell {
                ui.label("Expires");
                let date_msgs = date_picker::view(&model.expiry, ui);
                msgs.extend(date_msgs.into_iter().map(PostingFormMsg::Expiry));
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui
            .button(format!("{} Publish", egui_phosphor::regular::PAPER_PLANE_TILT))
            .clicked()
        {
            msgs.push(PostingFormMsg::Submit);
        }
        if ui.button("Clear").clicked() {
            msgs.push(PostingFormMsg::Clear);
        }
    });

    msgs
}
