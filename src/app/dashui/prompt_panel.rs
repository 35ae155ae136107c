//! Left-hand panel: stack selector, prompt text area and the generate control.

use crate::app::stack_choice::StackChoice;
use crate::app::workspace::Workspace;
use eframe::egui::{self, RichText};

pub const STACK_PLACEHOLDER: &str = "Choose a tech stack...";
pub const PROMPT_HINT: &str = "Ex. Create a landing, blog, or portfolio website...";
pub const GENERATE_LABEL: &str = "Generate Code";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PromptPanelResponse {
    pub generate_clicked: bool,
}

pub fn show_prompt_panel(ui: &mut egui::Ui, workspace: &mut Workspace) -> PromptPanelResponse {
    let mut response = PromptPanelResponse::default();

    ui.horizontal(|ui| {
        ui.heading("Choose a Stack");

        let mut selected = workspace.stack();
        let selected_text = if selected.is_selected() {
            selected.label()
        } else {
            STACK_PLACEHOLDER
        };
        egui::ComboBox::from_id_salt("stack_selector")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for option in StackChoice::OPTIONS {
                    ui.selectable_value(&mut selected, option, option.label());
                }
            });
        if selected != workspace.stack() {
            workspace.select_stack(selected);
        }
    });

    ui.add_space(16.0);

    let mut prompt = workspace.prompt().to_string();
    let edit = ui.add(
        egui::TextEdit::multiline(&mut prompt)
            .id_salt("prompt_input")
            .hint_text(PROMPT_HINT)
            .desired_rows(10)
            .desired_width(f32::INFINITY),
    );
    if edit.changed() {
        workspace.set_prompt(prompt);
    }

    ui.add_space(16.0);

    ui.horizontal(|ui| {
        // Stays enabled while a request is pending; a newer request supersedes it.
        if ui
            .button(RichText::new(GENERATE_LABEL).strong().size(16.0))
            .clicked()
        {
            response.generate_clicked = true;
        }
        if workspace.is_generating() {
            ui.spinner();
            ui.label("Generating...");
        }
    });

    response
}
