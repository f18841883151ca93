// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Desktop entry point wiring egui/eframe to the board UI.

use std::path::PathBuf;

use eframe::egui;
use egui_phosphor::Variant;

use crate::logic::Board;
use crate::ui::BachecaApp;

/// Run the desktop application on `board` until the window closes.
pub fn run(board: Board, board_path: PathBuf) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bacheca",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(BachecaApp::new(board, board_path)))
        }),
    )
}
