// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Expiry date picker in MVU-style model/update/view.

use chrono::{Days, Local, NaiveDate};
use eframe::egui;
use egui_extras::DatePickerButton;

/// Default distance between today and a new sell posting's expiry.
const DEFAULT_VALIDITY_DAYS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateModel {
    /// Selected calendar date (local).
    pub date: NaiveDate,
}

impl Default for DateModel {
    fn default() -> Self {
        Self {
            date: default_expiry(Local::now().date_naive()),
        }
    }
}

impl DateModel {
    /// Stored form of the selected date, as accepted by posting validation.
    pub fn as_expiry(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateMsg {
    /// Pick a specific date.
    SetDate(NaiveDate),
    /// Jump back to the default validity window starting today.
    ResetToDefault,
}

/// Apply a message to the date model.
pub fn update(model: &mut DateModel, msg: DateMsg) {
    match msg {
        DateMsg::SetDate(date) => model.date = date,
        DateMsg::ResetToDefault => model.date = default_expiry(Local::now().date_naive()),
    }
}

/// Render the picker and return any triggered messages.
pub fn view(model: &DateModel, ui: &mut egui::Ui) -> Vec<DateMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        let mut date = model.date;
        if ui
            .add(
                DatePickerButton::new(&mut date)
                    .id_salt("expiry_picker")
                    .show_icon(true),
            )
            .changed()
        {
            msgs.push(DateMsg::SetDate(date));
        }

        ui.add_space(8.0);
        if ui
            .button(format!(
                "{} {} days",
                egui_phosphor::regular::CALENDAR_PLUS,
                DEFAULT_VALIDITY_DAYS
            ))
            .on_hover_text("Expire this posting one month from today")
            .clicked()
        {
            msgs.push(DateMsg::ResetToDefault);
        }
    });

    msgs
}

fn default_expiry(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(DEFAULT_VALIDITY_DAYS))
        .unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    // New pickers start one validity window after today.
    #[test]
    fn default_date_is_in_the_future() {
        let picker = DateModel::default();
        assert!(picker.date > Local::now().date_naive());
    }

    // The default window is added in calendar days.
    #[test]
    fn default_expiry_adds_validity_window() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
        assert_eq!(
            default_expiry(today),
            NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()
        );
    }

    // Selected dates render in the stored expiry format.
    #[test]
    fn set_date_updates_expiry_string() {
        let mut picker = DateModel::default();
        update(
            &mut picker,
            DateMsg::SetDate(NaiveDate::from_ymd_opt(2026, 9, 5).unwrap()),
        );
        assert_eq!(picker.as_expiry(), "2026-09-05");
    }
}
