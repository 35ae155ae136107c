//! Sandboxed preview window.
//!
//! Generated markup is rendered in a separate process: the main executable is
//! re-launched with `--preview`, reads the preview document from stdin and shows
//! it in a wry webview. No initialization script, IPC handler or custom protocol
//! is registered, so the page has no way back into the application. Inside that
//! window the markup sits in an `<iframe sandbox="allow-scripts">`, which gives it
//! an opaque origin and blocks top-level navigation and popups.

use std::env;
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};

use anyhow::{anyhow, Context};
use tao::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};
use wry::WebViewBuilder;

use crate::app::preview::{PreviewSurface, PREVIEW_TITLE};

pub const PREVIEW_FLAG: &str = "--preview";
const TITLE_FLAG: &str = "--title";

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap generated markup in a host page that renders it inside a sandboxed frame.
pub fn build_preview_document(source: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>Preview</title>\n",
            "<style>html,body{{margin:0;height:100%;background:#fff}}",
            "iframe{{display:block;border:0;width:100%;height:100%}}</style>\n",
            "</head>\n",
            "<body>\n",
            "<iframe sandbox=\"allow-scripts\" referrerpolicy=\"no-referrer\" srcdoc=\"{}\"></iframe>\n",
            "</body>\n",
            "</html>\n"
        ),
        escape_attribute(source)
    )
}

/// Launch the preview process and stream `document` to its stdin.
pub fn spawn_preview_process(document: String, title: &str) -> std::io::Result<Child> {
    let current_exe = env::current_exe()?;

    let mut child = Command::new(current_exe)
        .arg(PREVIEW_FLAG)
        .arg(TITLE_FLAG)
        .arg(title)
        .stdin(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // Written off the UI thread; the pipe closes when `stdin` drops.
        std::thread::spawn(move || {
            if let Err(e) = stdin.write_all(document.as_bytes()) {
                tracing::warn!("Failed to hand document to preview process: {}", e);
            }
        });
    }

    tracing::info!("Spawned preview process (pid {})", child.id());
    Ok(child)
}

/// Returns the window title when the process was launched as a preview window.
pub fn parse_preview_args(args: &[String]) -> Option<String> {
    if !args.iter().any(|arg| arg == PREVIEW_FLAG) {
        return None;
    }

    let title = args
        .windows(2)
        .find(|pair| pair[0] == TITLE_FLAG)
        .map(|pair| pair[1].clone())
        .unwrap_or_else(|| PREVIEW_TITLE.to_string());

    Some(title)
}

/// Read the preview document handed over by the parent process.
pub fn read_preview_document() -> anyhow::Result<String> {
    let mut document = String::new();
    std::io::stdin()
        .read_to_string(&mut document)
        .context("Failed to read preview document from stdin")?;
    Ok(document)
}

/// Show `document` in a webview window until the user closes it.
pub fn run_preview_window(document: String, title: String) -> anyhow::Result<()> {
    tracing::info!(
        "Opening preview window '{}' ({} bytes)",
        title,
        document.len()
    );

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(&title)
        .with_inner_size(LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)
        .context("Failed to create preview window")?;

    let builder = WebViewBuilder::new().with_html(document);

    #[cfg(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    ))]
    let _webview = builder.build(&window)?;

    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    )))]
    let _webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .ok_or_else(|| anyhow!("Preview window has no GTK container"))?;
        builder.build_gtk(vbox)?
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        if let Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } = event
        {
            tracing::info!("Preview window closed");
            *control_flow = ControlFlow::Exit;
        }
    });
}

/// [`PreviewSurface`] backed by a child preview process.
#[derive(Default)]
pub struct WebviewProcessSurface {
    child: Option<Child>,
}

impl WebviewProcessSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewSurface for WebviewProcessSurface {
    fn present(&mut self, document: String, title: &str) -> anyhow::Result<()> {
        self.dismiss();
        let child = spawn_preview_process(document, title)
            .map_err(|e| anyhow!("Failed to launch preview window: {}", e))?;
        self.child = Some(child);
        Ok(())
    }

    fn dismiss(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                tracing::debug!("Preview process already gone: {}", e);
            }
            let _ = child.wait();
        }
    }

    fn is_showing(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                tracing::debug!("Preview process exited with {}", status);
                self.child = None;
                false
            }
            Err(e) => {
                tracing::warn!("Failed to query preview process: {}", e);
                self.child = None;
                false
            }
        }
    }
}

impl Drop for WebviewProcessSurface {
    fn drop(&mut self) {
        self.dismiss();
    }
}
