//! Generation backend configuration.
//!
//! The backend base URL is fixed at build time through `PROMPTSITE_BACKEND_URL`.
//! A per-user `config.toml` in the platform config directory may override the
//! base URL and the request timeout:
//!
//! ```toml
//! backend_url = "https://generator.example.com"
//! request_timeout_secs = 90
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::app::generation::GenerationError;

/// Base URL used when nothing was configured at build time.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Path of the code generation endpoint relative to the backend base URL.
pub const GENERATE_CODE_PATH: &str = "api/v1/ai/generate-code";

/// Upper bound on a single generation request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub backend_url: String,
    pub request_timeout: Duration,
}

/// On-disk overrides. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    backend_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

impl GeneratorConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Configuration baked in at compile time.
    pub fn from_build_env() -> Self {
        let backend_url = option_env!("PROMPTSITE_BACKEND_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL);
        Self::new(backend_url)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build-time configuration with the per-user config file applied on top.
    pub fn load() -> Self {
        let config = Self::from_build_env();
        match default_config_path() {
            Some(path) => config.with_file_overrides(&path),
            None => {
                tracing::debug!("No platform config directory; using build-time configuration");
                config
            }
        }
    }

    /// Apply overrides from a TOML file. A missing or unreadable file leaves the
    /// configuration unchanged.
    pub fn with_file_overrides(mut self, path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config file at {:?}", path);
            return self;
        }

        let overrides = match std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| toml::from_str::<ConfigFile>(&text).map_err(anyhow::Error::from))
        {
            Ok(overrides) => overrides,
            Err(e) => {
                tracing::warn!("Ignoring config file {:?}: {}", path, e);
                return self;
            }
        };

        if let Some(url) = overrides.backend_url.filter(|url| !url.trim().is_empty()) {
            tracing::info!("Backend URL overridden by {:?}", path);
            self.backend_url = url;
        }
        if let Some(secs) = overrides.request_timeout_secs.filter(|secs| *secs > 0) {
            self.request_timeout = Duration::from_secs(secs);
        }
        self
    }

    /// Full URL of the code generation endpoint.
    pub fn endpoint_url(&self) -> Result<Url, GenerationError> {
        let mut base = self.backend_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|base| base.join(GENERATE_CODE_PATH))
            .map_err(|e| {
                GenerationError::InvalidEndpoint(format!("{}: {}", self.backend_url, e))
            })
    }
}

/// `config.toml` inside the platform config directory, if one exists.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "", "promptsite")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
