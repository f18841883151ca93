// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! "Add keyword(s)" dialog for an existing posting.

use eframe::egui;

/// Dialog state: which posting is targeted and the raw comma-separated input.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct KeywordsModel {
    target: Option<u32>,
    input: String,
}

/// Messages emitted by the keywords dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeywordsMsg {
    OpenFor(u32),
    Close,
    InputChanged(String),
    Submit,
}

/// Words the user asked to add to `posting_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordsRequest {
    pub posting_id: u32,
    pub words: Vec<String>,
}

impl KeywordsModel {
    /// Posting currently targeted by the open dialog.
    pub fn target(&self) -> Option<u32> {
        self.target
    }
}

/// Apply a message. `Submit` closes the dialog and hands back the split words.
pub fn update(model: &mut KeywordsModel, msg: KeywordsMsg) -> Option<KeywordsRequest> {
    match msg {
        KeywordsMsg::OpenFor(id) => {
            model.target = Some(id);
            model.input.clear();
            None
        }
        KeywordsMsg::Close => {
            *model = KeywordsModel::default();
            None
        }
        KeywordsMsg::InputChanged(text) => {
            model.input = text;
            None
        }
        KeywordsMsg::Submit => {
            let posting_id = model.target?;
            let words = split_words(&model.input);
            *model = KeywordsModel::default();
            Some(KeywordsRequest { posting_id, words })
        }
    }
}

/// Show the dialog when a posting is targeted.
pub fn view(ctx: &egui::Context, model: &KeywordsModel) -> Vec<KeywordsMsg> {
    let mut msgs = Vec::new();
    let Some(id) = model.target else {
        return msgs;
    };
    let mut input = model.input.clone();

    egui::Window::new(format!("Add keyword(s) to posting {id}"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Keyword(s)");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut input).hint_text("e.g., usato or usato, offerta"),
            );
            if resp.changed() {
                msgs.push(KeywordsMsg::InputChanged(input.clone()));
            }
            if resp.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter)) {
                msgs.push(KeywordsMsg::Submit);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    msgs.push(KeywordsMsg::Submit);
                }
                if ui.button("Cancel").clicked() {
                    msgs.push(KeywordsMsg::Close);
                }
            });
        });

    msgs
}

/// Split comma-separated input, dropping empty entries.
fn split_words(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Submitting returns the split words for the targeted posting and closes the dialog.
    #[test]
    fn submit_returns_request() {
        let mut model = KeywordsModel::default();
        update(&mut model, KeywordsMsg::OpenFor(42));
        update(&mut model, KeywordsMsg::InputChanged("usato, , offerta ".into()));

        let request = update(&mut model, KeywordsMsg::Submit).unwrap();

        assert_eq!(request.posting_id, 42);
        assert_eq!(request.words, ["usato", "offerta"]);
        assert_eq!(model.target(), None);
    }

    // Submitting with no open dialog does nothing.
    #[test]
    fn submit_without_target_is_ignored() {
        let mut model = KeywordsModel::default();
        assert!(update(&mut model, KeywordsMsg::Submit).is_none());
    }

    // Closing discards the typed input.
    #[test]
    fn close_resets_dialog() {
        let mut model = KeywordsModel::default();
        update(&mut model, KeywordsMsg::OpenFor(1));
        update(&mut model, KeywordsMsg::InputChanged("tv".into()));
        update(&mut model, KeywordsMsg::Close);
        assert_eq!(model, KeywordsModel::default());
    }
}
