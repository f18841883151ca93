// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Labeled on/off switch used for the auto-clean setting.

use eframe::egui;

/// Draw a switch followed by `label`. Clicking flips `on` and marks the response changed.
pub fn toggle_switch(ui: &mut egui::Ui, on: &mut bool, label: &str) -> egui::Response {
    let height = ui.spacing().interact_size.y.max(18.0);
    let size = egui::vec2(height * 1.8, height);
    let (rect, mut response) = ui.allocate_exact_size(size, egui::Sense::click());
    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let t = ui.ctx().animate_bool(response.id, *on);
        let visuals = ui.style().interact_selectable(&response, *on);
        let off_fill = ui.visuals().widgets.inactive.bg_fill;
        let fill = off_fill.lerp_to_gamma(ui.visuals().selection.bg_fill, t);
        let radius = rect.height() / 2.0;

        ui.painter().rect_filled(rect, radius, fill);
        let knob_x = egui::lerp((rect.left() + radius)..=(rect.right() - radius), t);
        ui.painter().circle(
            egui::pos2(knob_x, rect.center().y),
            radius * 0.75,
            visuals.bg_fill,
            visuals.fg_stroke,
        );
    }

    ui.label(label);
    response
}
