//! Prompt Site - describe a website, get the markup, preview it.
//!
//! Prompt Site is a desktop front-end for a remote code generation service. The
//! user picks a technology stack, describes the site in plain language and
//! presses generate; the returned markup lands in an editable source buffer and
//! can be rendered in a sandboxed preview window.
//!
//! # Architecture Overview
//!
//! - **State** ([`app::workspace`]): a single [`app::workspace::Workspace`] value
//!   with one transition per user action. Readiness is monotonic, the preview is
//!   gated on non-blank source, and replies are matched to request tokens so a
//!   stale reply never overwrites newer state.
//! - **Generation** ([`app::generation`]): `POST /api/v1/ai/generate-code` through
//!   [`app::generation::HttpGenerationClient`], run off the UI thread by
//!   [`app::generation::GenerationCoordinator`].
//! - **Preview** ([`app::preview`], [`app::webview`]): the markup is rendered in a
//!   separate webview process inside a sandboxed frame.
//! - **UI** ([`app::dashui`]): egui panels that read the workspace and report actions.

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
pub use app::PromptSiteApp;

/// Branch and commit the binary was built from.
pub fn build_info() -> String {
    format!("{}@{}", env!("GIT_BRANCH"), env!("GIT_COMMIT"))
}
