// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Login form: collects name and address and validates them into a [`User`].

use eframe::egui;

use crate::models::User;
use crate::utils::normalize_input;

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct LoginModel {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginMsg {
    NameChanged(String),
    AddressChanged(String),
    Submit,
}

/// Result of a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn(User),
    Rejected(String),
}

/// Apply a message; only `Submit` produces an outcome.
pub fn update(model: &mut LoginModel, msg: LoginMsg) -> Option<LoginOutcome> {
    match msg {
        LoginMsg::NameChanged(text) => {
            model.name = text;
            None
        }
        LoginMsg::AddressChanged(text) => {
            model.address = text;
            None
        }
        LoginMsg::Submit => {
            let outcome = match User::new(
                normalize_input(&model.address),
                normalize_input(&model.name),
            ) {
                Ok(user) => {
                    *model = LoginModel::default();
                    LoginOutcome::LoggedIn(user)
                }
                Err(err) => LoginOutcome::Rejected(err.to_string()),
            };
            Some(outcome)
        }
    }
}

/// Render the centered login card.
pub fn view(ui: &mut egui::Ui, model: &LoginModel) -> Vec<LoginMsg> {
    let mut msgs = Vec::new();

    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.heading(format!("{} Bacheca", egui_phosphor::regular::PUSH_PIN));
        ui.add_space(16.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_max_width(360.0);
            egui::Grid::new("login_grid")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 10.0))
                .show(ui, |ui| {
                    ui.label("Name");
                    let mut name = model.name.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut name).hint_text("e.g., giovanniNeri"))
                        .changed()
                    {
                        msgs.push(LoginMsg::NameChanged(name));
                    }
                    ui.end_row();

                    ui.label("Email");
                    let mut address = model.address.clone();
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut address)
                            .hint_text("e.g., giovanni.neri@example.com"),
                    );
                    if resp.changed() {
                        msgs.push(LoginMsg::AddressChanged(address));
                    }
                    if resp.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter)) {
                        msgs.push(LoginMsg::Submit);
                    }
                    ui.end_row();
                });

            ui.add_space(8.0);
            if ui
                .button(format!("{} Log in", egui_phosphor::regular::SIGN_IN))
                .clicked()
            {
                msgs.push(LoginMsg::Submit);
            }
        });
    });

    msgs
}
