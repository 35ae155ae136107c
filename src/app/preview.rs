//! Preview overlay controller.
//!
//! Keeps the workspace's preview flag and the actual preview window in step.
//! The window is an external [`PreviewSurface`]; closing it counts as the user's
//! close action, and a source change while the preview is visible re-presents
//! the new document.

use crate::app::webview::build_preview_document;
use crate::app::workspace::Workspace;
use crate::{log_error, log_info, trace_debug};

pub const PREVIEW_TITLE: &str = "Preview";

/// Somewhere a preview document can be shown.
pub trait PreviewSurface {
    /// Show `document`, replacing whatever was shown before.
    fn present(&mut self, document: String, title: &str) -> anyhow::Result<()>;
    /// Stop showing anything. Safe to call when nothing is shown.
    fn dismiss(&mut self);
    /// Whether the last presented document is still on screen.
    fn is_showing(&mut self) -> bool;
}

pub struct PreviewOverlay {
    surface: Box<dyn PreviewSurface>,
    /// Source text currently on the surface.
    presented: Option<String>,
}

impl PreviewOverlay {
    pub fn new(surface: Box<dyn PreviewSurface>) -> Self {
        Self {
            surface,
            presented: None,
        }
    }

    /// Source text currently shown, if any.
    pub fn presented_source(&self) -> Option<&str> {
        self.presented.as_deref()
    }

    /// Explicit open action. Returns `false` when the source is blank.
    pub fn open(&mut self, workspace: &mut Workspace) -> bool {
        if !workspace.open_preview() {
            trace_debug!("Preview requested with blank source; ignoring");
            return false;
        }
        log_info!("Preview opened");
        self.sync(workspace);
        workspace.is_preview_open()
    }

    /// Explicit close action. Allowed from any state.
    pub fn close(&mut self, workspace: &mut Workspace) {
        if self.presented.take().is_some() {
            self.surface.dismiss();
        }
        if workspace.is_preview_open() {
            log_info!("Preview closed");
        }
        workspace.close_preview();
    }

    /// Bring the surface in line with the workspace. Called once per frame.
    pub fn sync(&mut self, workspace: &mut Workspace) {
        if !workspace.is_preview_open() {
            if self.presented.take().is_some() {
                self.surface.dismiss();
            }
            return;
        }

        // The user closed the preview window itself.
        if self.presented.is_some() && !self.surface.is_showing() {
            self.presented = None;
            log_info!("Preview window closed by user");
            workspace.close_preview();
            return;
        }

        if !workspace.is_preview_visible() {
            if self.presented.take().is_some() {
                trace_debug!("Source went blank; hiding preview window");
                self.surface.dismiss();
            }
            return;
        }

        if self.presented.as_deref() == Some(workspace.source()) {
            return;
        }

        let source = workspace.source().to_string();
        match self
            .surface
            .present(build_preview_document(&source), PREVIEW_TITLE)
        {
            Ok(()) => {
                trace_debug!("Presented {} bytes in preview", source.len());
                self.presented = Some(source);
            }
            Err(e) => {
                log_error!("Preview could not be shown: {}", e);
                self.presented = None;
                workspace.close_preview();
            }
        }
    }
}
