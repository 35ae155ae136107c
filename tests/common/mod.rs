//! Shared fixtures: a mock generation backend served by axum, scripted
//! generation services, and an in-memory preview surface.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use promptsite::app::config::GeneratorConfig;
use promptsite::app::generation::{GenerationError, GenerationService, HttpGenerationClient};
use promptsite::app::preview::PreviewSurface;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Generous upper bound for a reply from a local mock.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A generation endpoint on 127.0.0.1 that answers every request with a fixed
/// status and body. The server lives as long as this value.
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    _runtime: tokio::runtime::Runtime,
}

impl MockBackend {
    pub fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO)
    }

    /// Like [`MockBackend::start`], but every reply is held back for `delay`.
    pub fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("mock backend runtime");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            delay,
            requests: Arc::clone(&requests),
        };

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");

        let app = Router::new()
            .route("/api/v1/ai/generate-code", post(handle_generate))
            .with_state(state);
        runtime.spawn(async move {
            axum::serve(listener, app).await.expect("mock backend server");
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            _runtime: runtime,
        }
    }

    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.base_url.clone()).with_request_timeout(REPLY_TIMEOUT)
    }

    pub fn client(&self) -> HttpGenerationClient {
        HttpGenerationClient::new(&self.config()).expect("http client")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn handle_generate(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let body_json = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            content_type,
            body: body_json,
        });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Replies after a per-prompt delay. Prompts containing "slow" take longer.
pub struct ScriptedService {
    pub calls: AtomicUsize,
    pub slow_delay: Duration,
    pub fast_delay: Duration,
}

impl ScriptedService {
    pub fn new(slow_delay: Duration, fast_delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            slow_delay,
            fast_delay,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("fail") {
            tokio::time::sleep(self.fast_delay).await;
            return Err(GenerationError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        let delay = if prompt.contains("slow") {
            self.slow_delay
        } else {
            self.fast_delay
        };
        tokio::time::sleep(delay).await;
        Ok(format!("```html<p>{}</p>```", prompt))
    }
}

/// What the in-memory preview surface has been asked to do.
#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub presented: Vec<String>,
    pub dismissed: usize,
    pub showing: bool,
    pub fail_next_present: bool,
}

pub struct RecordingSurface(pub Rc<RefCell<SurfaceLog>>);

impl RecordingSurface {
    pub fn new() -> (Self, Rc<RefCell<SurfaceLog>>) {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        (Self(Rc::clone(&log)), log)
    }
}

impl PreviewSurface for RecordingSurface {
    fn present(&mut self, document: String, _title: &str) -> anyhow::Result<()> {
        let mut log = self.0.borrow_mut();
        if log.fail_next_present {
            log.fail_next_present = false;
            anyhow::bail!("no display available");
        }
        log.presented.push(document);
        log.showing = true;
        Ok(())
    }

    fn dismiss(&mut self) {
        let mut log = self.0.borrow_mut();
        log.dismissed += 1;
        log.showing = false;
    }

    fn is_showing(&mut self) -> bool {
        self.0.borrow().showing
    }
}
