#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::sync::Arc;

use promptsite::app::config::GeneratorConfig;
use promptsite::app::generation::{GenerationCoordinator, HttpGenerationClient};
use promptsite::app::preview::PreviewOverlay;
use promptsite::app::webview::{self, WebviewProcessSurface};
use tracing_subscriber::prelude::*;

const DEFAULT_LOG_FILTER: &str = "promptsite=info,eframe=info,egui=warn,wgpu=warn,wry=warn,tao=warn,reqwest=warn,hyper=warn";

fn log_dir() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "", "promptsite").map(|dirs| dirs.data_dir().join("logs"))
}

fn init_logging(log_name: &str) {
    let Some(log_dir) = log_dir() else {
        eprintln!("No data directory available; logging disabled");
        return;
    };
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join(log_name);

    let file = match std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // RUST_LOG wins over the built-in defaults
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(move || file.try_clone().expect("Failed to clone file handle"))
            .with_ansi(false), // No ANSI colors in file
    );

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    // Bridge log crate events to tracing (for eframe, egui, wgpu, etc.)
    // This must be done AFTER setting the tracing subscriber
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log-to-tracing bridge: {}", e);
    }

    tracing::info!("Logging initialized to: {:?}", log_path);
}

fn setup_panic_handler() {
    // Install a panic handler that writes to a crash log file
    // This catches panics even if normal logging hasn't been initialized yet
    std::panic::set_hook(Box::new(|panic_info| {
        let crash_msg = format!(
            "Prompt Site crashed!\n\
             Panic occurred at: {}\n\
             Details: {}\n\
             Backtrace:\n{:?}\n",
            panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string()),
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
                .unwrap_or("unknown panic"),
            std::backtrace::Backtrace::force_capture()
        );

        if let Some(log_dir) = log_dir() {
            let _ = std::fs::create_dir_all(&log_dir);
            let crash_log_path = log_dir.join("crash.log");

            if let Ok(mut file) = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&crash_log_path)
            {
                use std::io::Write;
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "\n=== CRASH at {} ===\n{}", timestamp, crash_msg);
            }

            eprintln!("\n{}", crash_msg);
            eprintln!("Crash log written to: {:?}", crash_log_path);
        } else {
            eprintln!("\n{}", crash_msg);
        }
    }));
}

fn run_preview(title: String) -> anyhow::Result<()> {
    let document = webview::read_preview_document()?;
    webview::run_preview_window(document, title)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic handler BEFORE anything else to catch early crashes
    setup_panic_handler();

    let args: Vec<String> = std::env::args().collect();

    if let Some(title) = webview::parse_preview_args(&args) {
        init_logging("preview.log");
        tracing::info!("Preview args detected, entering preview mode");
        run_preview(title)?;
        return Ok(());
    }

    init_logging("promptsite.log");
    tracing::info!("promptsite {} starting", promptsite::build_info());

    let config = GeneratorConfig::load();
    tracing::info!(
        "Generation backend: {} (timeout {:?})",
        config.backend_url,
        config.request_timeout
    );

    let client = HttpGenerationClient::new(&config)?;
    let coordinator = GenerationCoordinator::new(Arc::new(client));
    let preview = PreviewOverlay::new(Box::new(WebviewProcessSurface::new()));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Prompt Site")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Prompt Site",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(promptsite::PromptSiteApp::new(
                cc,
                coordinator,
                preview,
            )))
        }),
    )?;

    Ok(())
}
