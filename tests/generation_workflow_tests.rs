//! End-to-end generation tests against a local mock backend.
//!
//! These exercise the real HTTP client, the background coordinator and the
//! workspace together; only the backend is faked.

mod common;

use common::{MockBackend, RecordingSurface, ScriptedService, REPLY_TIMEOUT};
use pretty_assertions::assert_eq;
use promptsite::app::config::GeneratorConfig;
use promptsite::app::dashui::UiPreferences;
use promptsite::app::generation::{GenerationCoordinator, GenerationError, HttpGenerationClient};
use promptsite::app::preview::PreviewOverlay;
use promptsite::app::stack_choice::StackChoice;
use promptsite::app::workspace::{ReplyOutcome, Workspace};
use promptsite::PromptSiteApp;
use std::sync::Arc;
use std::time::Duration;

fn coordinator_for(backend: &MockBackend) -> GenerationCoordinator {
    GenerationCoordinator::new(Arc::new(backend.client()))
}

#[test]
fn test_generate_posts_composed_prompt_and_applies_sanitized_reply() {
    let backend = MockBackend::start(200, r#"{"response":"```html<h1>Hi</h1>```"}"#);
    let mut coordinator = coordinator_for(&backend);

    let mut workspace = Workspace::new();
    workspace.select_stack(StackChoice::HtmlTailwind);
    workspace.set_prompt("Create a landing page");

    let token = coordinator.generate(&mut workspace);
    assert!(token.is_some());
    assert!(workspace.is_generating());
    assert!(workspace.is_read_only());

    let outcome = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert_eq!(outcome, Some(ReplyOutcome::Applied));
    assert_eq!(workspace.source(), "<h1>Hi</h1>");
    assert!(!workspace.is_read_only());
    assert!(!workspace.is_generating());

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body,
        serde_json::json!({"prompt": "Create a landing page using HTML + TailwindCSS"})
    );
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
}

#[test]
fn test_server_error_leaves_workspace_empty_and_read_only() {
    let backend = MockBackend::start(500, "upstream exploded");
    let mut coordinator = coordinator_for(&backend);

    let mut workspace = Workspace::new();
    workspace.select_stack(StackChoice::HtmlCss);
    workspace.set_prompt("Blog");
    coordinator.generate(&mut workspace);

    let outcome = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    match outcome {
        Some(ReplyOutcome::Failed(GenerationError::Status { status, body })) => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected a 500 status failure, got {:?}", other),
    }
    assert_eq!(workspace.source(), "");
    assert!(workspace.is_read_only());
    assert!(!workspace.is_generating());
    assert!(workspace.last_failure().is_some());
}

#[test]
fn test_slow_backend_times_out_as_failure() {
    let backend = MockBackend::start_with_delay(
        200,
        r#"{"response":"<p>too late</p>"}"#,
        Duration::from_secs(3),
    );
    let config = backend
        .config()
        .with_request_timeout(Duration::from_millis(200));
    let client = HttpGenerationClient::new(&config).expect("client");
    let mut coordinator = GenerationCoordinator::new(Arc::new(client));

    let mut workspace = Workspace::new();
    workspace.select_stack(StackChoice::HtmlCss);
    workspace.set_prompt("Portfolio");
    coordinator.generate(&mut workspace);

    let outcome = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert_eq!(
        outcome,
        Some(ReplyOutcome::Failed(GenerationError::Timeout))
    );
    assert_eq!(workspace.source(), "");
    assert!(workspace.is_read_only());
    assert!(!workspace.is_generating());
    assert_eq!(workspace.last_failure(), Some(&GenerationError::Timeout));
    assert_eq!(backend.requests().len(), 1);
}

#[test]
fn test_reply_without_response_field_is_malformed() {
    let backend = MockBackend::start(200, r#"{"message":"ok"}"#);
    let mut coordinator = coordinator_for(&backend);

    let mut workspace = Workspace::new();
    workspace.set_prompt("Portfolio");
    coordinator.generate(&mut workspace);

    let outcome = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert!(matches!(
        outcome,
        Some(ReplyOutcome::Failed(GenerationError::MalformedResponse(_)))
    ));
    assert_eq!(workspace.source(), "");
    assert!(workspace.is_read_only());
}

#[test]
fn test_unreachable_backend_is_reported_as_failure() {
    // Bind then drop a listener so the port is almost certainly closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("address").port()
    };
    let config = GeneratorConfig::new(format!("http://127.0.0.1:{}", port))
        .with_request_timeout(REPLY_TIMEOUT);
    let client = HttpGenerationClient::new(&config).expect("client");
    let mut coordinator = GenerationCoordinator::new(Arc::new(client));

    let mut workspace = Workspace::new();
    workspace.set_prompt("Anything");
    coordinator.generate(&mut workspace);

    let outcome = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert!(
        matches!(outcome, Some(ReplyOutcome::Failed(_))),
        "expected a failure, got {:?}",
        outcome
    );
    assert!(workspace.is_read_only());
    assert!(!workspace.is_generating());
}

#[test]
fn test_invalid_base_url_fails_on_first_request() {
    let config = GeneratorConfig::new("not a url");
    let client = HttpGenerationClient::new(&config).expect("client");
    assert!(client.endpoint().is_none());

    let mut coordinator = GenerationCoordinator::new(Arc::new(client));
    let mut workspace = Workspace::new();
    workspace.set_prompt("Anything");
    coordinator.generate(&mut workspace);

    let outcome = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert!(matches!(
        outcome,
        Some(ReplyOutcome::Failed(GenerationError::InvalidEndpoint(_)))
    ));
}

#[test]
fn test_empty_prompt_sends_nothing() {
    let backend = MockBackend::start(200, r#"{"response":"<p>never</p>"}"#);
    let mut coordinator = coordinator_for(&backend);

    let mut workspace = Workspace::new();
    workspace.select_stack(StackChoice::HtmlCssJs);
    assert_eq!(coordinator.generate(&mut workspace), None);
    assert_eq!(coordinator.in_flight(), 0);
    assert!(!workspace.is_generating());

    std::thread::sleep(Duration::from_millis(100));
    assert!(backend.requests().is_empty());
}

#[test]
fn test_only_the_newest_reply_is_applied() {
    let service = Arc::new(ScriptedService::new(
        Duration::from_millis(400),
        Duration::from_millis(10),
    ));
    let mut coordinator = GenerationCoordinator::new(service.clone());

    let mut workspace = Workspace::new();
    workspace.set_prompt("slow page");
    let first = coordinator.generate(&mut workspace).expect("first token");
    workspace.set_prompt("quick page");
    let second = coordinator.generate(&mut workspace).expect("second token");
    assert_ne!(first, second);
    assert_eq!(coordinator.in_flight(), 2);

    // The fast second request lands first and wins.
    let outcome = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert_eq!(outcome, Some(ReplyOutcome::Applied));
    assert_eq!(workspace.source(), "<p>quick page using </p>");

    // The slow first reply arrives later and must not overwrite anything.
    let outcome = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert_eq!(outcome, Some(ReplyOutcome::Discarded));
    assert_eq!(workspace.source(), "<p>quick page using </p>");
    assert!(!workspace.is_read_only());
    assert_eq!(coordinator.in_flight(), 0);
    assert_eq!(service.calls(), 2);
}

#[test]
fn test_stale_failure_does_not_clobber_newer_success() {
    let service = Arc::new(ScriptedService::new(
        Duration::from_millis(10),
        Duration::from_millis(300),
    ));
    let mut coordinator = GenerationCoordinator::new(service);

    let mut workspace = Workspace::new();
    // "fail" replies after the fast delay (300ms here); "slow" after 10ms.
    workspace.set_prompt("fail");
    coordinator.generate(&mut workspace);
    workspace.set_prompt("slow but newest");
    coordinator.generate(&mut workspace);

    let first = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert_eq!(first, Some(ReplyOutcome::Applied));
    let second = coordinator.wait_for_reply(&mut workspace, REPLY_TIMEOUT);
    assert_eq!(second, Some(ReplyOutcome::Discarded));

    assert_eq!(workspace.source(), "<p>slow but newest using </p>");
    assert!(workspace.last_failure().is_none());
}

#[test]
fn test_app_generate_and_background_processing() {
    let backend = MockBackend::start(200, r#"{"response":"```html<main>Shop</main>```"}"#);
    let (surface, surface_log) = RecordingSurface::new();
    let mut app = PromptSiteApp::from_parts(
        UiPreferences::default(),
        coordinator_for(&backend),
        PreviewOverlay::new(Box::new(surface)),
    );

    app.workspace_mut().select_stack(StackChoice::HtmlTailwindJs);
    app.workspace_mut().set_prompt("Online shop");
    app.generate();
    assert!(app.workspace().is_generating());

    let deadline = std::time::Instant::now() + REPLY_TIMEOUT;
    while app.workspace().is_generating() && std::time::Instant::now() < deadline {
        app.process_background_events();
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(app.workspace().source(), "<main>Shop</main>");
    assert!(!app.workspace().is_read_only());
    assert_eq!(
        backend.requests()[0].body,
        serde_json::json!({"prompt": "Online shop using HTML + TailwindCSS + JS"})
    );

    assert!(app.open_preview());
    assert_eq!(surface_log.borrow().presented.len(), 1);
    assert!(surface_log.borrow().presented[0].contains("&lt;main&gt;Shop&lt;/main&gt;"));

    app.close_preview();
    assert!(!app.workspace().is_preview_open());
    assert_eq!(app.workspace().source(), "<main>Shop</main>");
}
