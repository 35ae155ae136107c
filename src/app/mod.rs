//! Core application modules for Prompt Site.
//!
//! # Module Organization
//!
//! ## Workflow
//! - [`workspace`] - the prompt-to-preview state machine
//! - [`generation`] - HTTP client, reply cleanup and the background request coordinator
//! - [`preview`] - keeps the preview flag and the preview window in step
//!
//! ## Supporting pieces
//! - [`config`] - backend URL and request timeout
//! - [`stack_choice`] - the offered technology stacks
//! - [`markup_syntax`] - highlighting for the source editor
//! - [`webview`] - the sandboxed preview process
//! - [`dashui`] - the egui front-end

pub mod config;
pub mod dashui;
pub mod generation;
pub mod markup_syntax;
pub mod preview;
pub mod stack_choice;
pub mod webview;
pub mod workspace;

pub use dashui::app::PromptSiteApp;
