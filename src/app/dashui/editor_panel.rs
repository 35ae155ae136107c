//! Source editor bound to the workspace's source buffer.

use crate::app::dashui::app::ThemeChoice;
use crate::app::markup_syntax::html_syntax;
use crate::app::workspace::Workspace;
use eframe::egui::{self, Color32, RichText, ScrollArea};
use egui_code_editor::{CodeEditor, ColorTheme};

pub const COPY_LABEL: &str = "Copy";
pub const PREVIEW_LABEL: &str = "Preview";

/// Height kept free below the editor for the action row.
const ACTION_ROW_HEIGHT: f32 = 48.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditorPanelResponse {
    pub copy_clicked: bool,
    pub preview_clicked: bool,
}

pub fn show_editor_panel(
    ui: &mut egui::Ui,
    workspace: &mut Workspace,
    theme: ThemeChoice,
) -> EditorPanelResponse {
    let mut response = EditorPanelResponse::default();

    if let Some(failure) = workspace.last_failure() {
        ui.colored_label(
            Color32::from_rgb(220, 50, 50),
            format!("Generation failed: {}", failure),
        );
        ui.separator();
    }

    let read_only = workspace.is_read_only();
    let available_height = (ui.available_height() - ACTION_ROW_HEIGHT).max(120.0);
    let rows = (available_height / 20.0).max(10.0) as usize;
    let code_theme = if theme == ThemeChoice::Latte {
        ColorTheme::GITHUB_LIGHT
    } else {
        ColorTheme::GITHUB_DARK
    };

    // The editor works on a copy; a change replaces the whole buffer.
    let mut buffer = workspace.source().to_string();
    ui.add_enabled_ui(!read_only, |ui| {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height(available_height)
            .id_salt("source_editor_scroll")
            .show(ui, |ui| {
                CodeEditor::default()
                    .id_source("source_editor")
                    .with_rows(rows)
                    .with_fontsize(14.0)
                    .with_theme(code_theme)
                    .with_syntax(html_syntax())
                    .with_numlines(true)
                    .show(ui, &mut buffer);
            });
    });
    if !read_only && buffer != workspace.source() {
        workspace.edit_source(Some(buffer));
    }

    if !workspace.source().is_empty() {
        ui.separator();
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(RichText::new(PREVIEW_LABEL).size(15.0)).clicked() {
                response.preview_clicked = true;
            }
            if ui.button(RichText::new(COPY_LABEL).size(15.0)).clicked() {
                response.copy_clicked = true;
            }
        });
    }

    response
}
