//! Desktop user interface for the prompt-to-preview workflow.
//!
//! The window is split in two: [`prompt_panel`] on the left collects the stack
//! choice and the description, [`editor_panel`] in the centre shows the source
//! buffer in a code editor. While the preview is open, [`preview_overlay`] covers
//! the window and offers the close action.
//!
//! Panels never mutate state directly. They read the
//! [`Workspace`](crate::app::workspace::Workspace) and report what the user did;
//! [`app::PromptSiteApp`] turns those reports into workspace transitions.

pub mod app;
pub mod editor_panel;
pub mod menu;
pub mod preview_overlay;
pub mod prompt_panel;

pub use app::{PromptSiteApp, ThemeChoice, UiPreferences};
