use super::editor_panel::{show_editor_panel, EditorPanelResponse};
use super::menu::{self, MenuAction};
use super::preview_overlay::show_preview_overlay;
use super::prompt_panel::show_prompt_panel;
use crate::app::generation::GenerationCoordinator;
use crate::app::preview::PreviewOverlay;
use crate::app::workspace::Workspace;
use crate::{log_info, trace_debug};
use eframe::egui;
use std::time::Duration;

/// How often to wake up while waiting on a reply or watching the preview window.
const BACKGROUND_POLL_INTERVAL: Duration = Duration::from_millis(150);

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Debug, Default)]
pub enum ThemeChoice {
    Latte,
    Frappe,
    Macchiato,
    #[default]
    Mocha,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 4] = [
        ThemeChoice::Latte,
        ThemeChoice::Frappe,
        ThemeChoice::Macchiato,
        ThemeChoice::Mocha,
    ];
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Latte => write!(f, "Latte"),
            ThemeChoice::Frappe => write!(f, "Frappe"),
            ThemeChoice::Macchiato => write!(f, "Macchiato"),
            ThemeChoice::Mocha => write!(f, "Mocha"),
        }
    }
}

/// Settings that survive restarts. Generated code is deliberately not among them.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct UiPreferences {
    pub theme: ThemeChoice,
}

pub struct PromptSiteApp {
    pub preferences: UiPreferences,
    workspace: Workspace,
    coordinator: GenerationCoordinator,
    preview: PreviewOverlay,
}

impl PromptSiteApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        coordinator: GenerationCoordinator,
        preview: PreviewOverlay,
    ) -> Self {
        let preferences: UiPreferences = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::from_parts(preferences, coordinator, preview)
    }

    pub fn from_parts(
        preferences: UiPreferences,
        coordinator: GenerationCoordinator,
        preview: PreviewOverlay,
    ) -> Self {
        Self {
            preferences,
            workspace: Workspace::new(),
            coordinator,
            preview,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    /// Generate control pressed.
    pub fn generate(&mut self) {
        if self.coordinator.generate(&mut self.workspace).is_none() {
            trace_debug!("Generate pressed with an empty prompt; nothing sent");
        }
    }

    pub fn open_preview(&mut self) -> bool {
        self.preview.open(&mut self.workspace)
    }

    pub fn close_preview(&mut self) {
        self.preview.close(&mut self.workspace);
    }

    /// Pull in finished requests and reconcile the preview window.
    pub fn process_background_events(&mut self) {
        self.coordinator.poll(&mut self.workspace);
        self.preview.sync(&mut self.workspace);
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        match self.preferences.theme {
            ThemeChoice::Latte => catppuccin_egui::set_theme(ctx, catppuccin_egui::LATTE),
            ThemeChoice::Frappe => catppuccin_egui::set_theme(ctx, catppuccin_egui::FRAPPE),
            ThemeChoice::Macchiato => catppuccin_egui::set_theme(ctx, catppuccin_egui::MACCHIATO),
            ThemeChoice::Mocha => catppuccin_egui::set_theme(ctx, catppuccin_egui::MOCHA),
        }
    }
}

impl eframe::App for PromptSiteApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.preferences);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);
        self.process_background_events();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                match menu::build_menu(ui, &mut self.preferences.theme) {
                    MenuAction::ThemeChanged => {
                        log_info!("Theme changed to {}", self.preferences.theme);
                    }
                    MenuAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                    MenuAction::None => {}
                }
            });
        });

        let mut generate_clicked = false;
        egui::SidePanel::left("prompt_panel")
            .resizable(true)
            .default_width(ctx.screen_rect().width() * 0.45)
            .min_width(280.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                generate_clicked = show_prompt_panel(ui, &mut self.workspace).generate_clicked;
            });

        let mut editor_response = EditorPanelResponse::default();
        egui::CentralPanel::default().show(ctx, |ui| {
            editor_response = show_editor_panel(ui, &mut self.workspace, self.preferences.theme);
        });

        if generate_clicked {
            self.generate();
        }
        if editor_response.copy_clicked {
            ctx.copy_text(self.workspace.source().to_string());
            log_info!("Copied {} bytes of source", self.workspace.source().len());
        }
        if editor_response.preview_clicked {
            self.open_preview();
        }

        if self.workspace.is_preview_visible()
            && show_preview_overlay(ctx, self.workspace.source().len())
        {
            self.close_preview();
        }

        if self.workspace.is_generating() || self.workspace.is_preview_open() {
            ctx.request_repaint_after(BACKGROUND_POLL_INTERVAL);
        }
    }
}
