//! Full-window overlay shown while the sandboxed preview window is up.

use eframe::egui::{self, RichText};

pub const CLOSE_PREVIEW_LABEL: &str = "Close Preview";

/// Draw the overlay. Returns `true` when the user pressed the close control.
///
/// The close button is the only way out; Escape and clicks on the backdrop
/// leave the preview open.
pub fn show_preview_overlay(ctx: &egui::Context, source_len: usize) -> bool {
    let mut close_clicked = false;

    egui::Modal::new(egui::Id::new("preview_overlay")).show(ctx, |ui| {
        ui.set_width(360.0);
        ui.heading("Preview");
        ui.separator();
        ui.label("The page is rendered in a separate, sandboxed window.");
        ui.label(RichText::new(format!("{} bytes of markup", source_len)).weak());
        ui.add_space(8.0);
        if ui.button(CLOSE_PREVIEW_LABEL).clicked() {
            close_clicked = true;
        }
    });

    close_clicked
}
