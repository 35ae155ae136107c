//! HTTP client for the remote code generation service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::config::GeneratorConfig;
use crate::trace_debug;

/// Why a generation request produced no markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The configured backend URL cannot be turned into an endpoint.
    InvalidEndpoint(String),
    /// No reply arrived within the request timeout.
    Timeout,
    /// The backend could not be reached.
    Connect(String),
    /// Any other transport failure.
    Network(String),
    /// The backend answered with a non-success status.
    Status { status: u16, body: String },
    /// The reply body was not `{ "response": string }`.
    MalformedResponse(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::InvalidEndpoint(reason) => {
                write!(f, "Invalid generation endpoint: {}", reason)
            }
            GenerationError::Timeout => {
                write!(f, "Request timeout - the generation service took too long to respond")
            }
            GenerationError::Connect(reason) => {
                write!(f, "Connection error - unable to reach the generation service: {}", reason)
            }
            GenerationError::Network(reason) => write!(f, "Network error: {}", reason),
            GenerationError::Status { status, body } => match status {
                500..=599 => write!(f, "Server error ({}): {}", status, body),
                _ => write!(f, "HTTP error {}: {}", status, body),
            },
            GenerationError::MalformedResponse(reason) => {
                write!(f, "Failed to parse generation response: {}", reason)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout
        } else if e.is_connect() {
            GenerationError::Connect(e.to_string())
        } else if e.is_decode() {
            GenerationError::MalformedResponse(e.to_string())
        } else {
            GenerationError::Network(e.to_string())
        }
    }
}

/// Request body for the generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateCodeRequest {
    pub prompt: String,
}

/// Success body of the generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateCodeResponse {
    pub response: String,
}

/// Anything that turns a composed prompt into raw generated text.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// `POST <backend>/api/v1/ai/generate-code` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    client: Client,
    endpoint: Result<Url, GenerationError>,
}

impl HttpGenerationClient {
    pub fn new(config: &GeneratorConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        // An unusable URL surfaces on the first request rather than at startup.
        let endpoint = config.endpoint_url();
        if let Err(e) = &endpoint {
            tracing::warn!("{}", e);
        }

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref().ok()
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let endpoint = self.endpoint.clone()?;
        trace_debug!("POST {} ({} prompt bytes)", endpoint, prompt.len());

        let response = self
            .client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(&GenerateCodeRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateCodeResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        Ok(parsed.response)
    }
}
