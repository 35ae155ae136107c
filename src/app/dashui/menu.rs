use crate::app::dashui::app::ThemeChoice;
use eframe::egui;
use egui::RichText;

#[derive(Debug, PartialEq)]
pub enum MenuAction {
    None,
    ThemeChanged,
    Quit,
}

pub fn build_menu(ui: &mut egui::Ui, theme: &mut ThemeChoice) -> MenuAction {
    let mut menu_action = MenuAction::None;
    let original_theme = *theme;

    ui.menu_button("Prompt Site", |ui| {
        if ui.button("Quit").clicked() {
            menu_action = MenuAction::Quit;
        }
    });

    ui.menu_button(RichText::new("🎨").size(18.0), |ui| {
        for choice in ThemeChoice::ALL {
            if ui
                .selectable_label(*theme == choice, choice.to_string())
                .clicked()
            {
                *theme = choice;
            }
        }
    });

    if *theme != original_theme && menu_action == MenuAction::None {
        menu_action = MenuAction::ThemeChanged;
    }

    menu_action
}
