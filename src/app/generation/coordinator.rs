//! Runs generation requests in the background and feeds replies back into the
//! [`Workspace`] on the UI thread.
//!
//! egui runs on a blocking thread, so each request gets its own thread with a
//! small tokio runtime. Replies come back through an mpsc channel tagged with
//! the request token; [`GenerationCoordinator::poll`] drains the channel once
//! per frame and lets the workspace decide which replies still matter.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use super::client::{GenerationError, GenerationService};
use crate::app::workspace::{ReplyOutcome, RequestToken, Workspace};
use crate::{log_error, log_info, log_warn};

/// Raw result of one background request.
type GenerationReply = (RequestToken, Result<String, GenerationError>);

pub struct GenerationCoordinator {
    service: Arc<dyn GenerationService>,
    reply_sender: mpsc::Sender<GenerationReply>,
    reply_receiver: mpsc::Receiver<GenerationReply>,
    in_flight: usize,
}

impl GenerationCoordinator {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        let (reply_sender, reply_receiver) = mpsc::channel();
        Self {
            service,
            reply_sender,
            reply_receiver,
            in_flight: 0,
        }
    }

    /// Number of requests sent whose replies have not been polled yet,
    /// including ones that will be discarded as stale.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Handle a press of the generate control.
    ///
    /// Returns the token of the issued request, or `None` when the prompt was
    /// empty and nothing was sent.
    pub fn generate(&mut self, workspace: &mut Workspace) -> Option<RequestToken> {
        let ticket = workspace.begin_generation()?;
        let token = ticket.token;

        log_info!(
            "Issuing generation request {} ({} prompt bytes)",
            token,
            ticket.composed_prompt.len()
        );

        let service = Arc::clone(&self.service);
        let sender = self.reply_sender.clone();
        self.in_flight += 1;

        std::thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(service.generate(&ticket.composed_prompt)),
                Err(e) => Err(GenerationError::Network(format!(
                    "Failed to create tokio runtime: {}",
                    e
                ))),
            };

            // The receiver is gone once the app has shut down.
            let _ = sender.send((token, result));
        });

        Some(token)
    }

    /// Apply every reply that has arrived since the last call.
    pub fn poll(&mut self, workspace: &mut Workspace) -> Vec<ReplyOutcome> {
        let mut outcomes = Vec::new();
        while let Ok((token, result)) = self.reply_receiver.try_recv() {
            outcomes.push(self.apply(workspace, token, result));
        }
        outcomes
    }

    /// Block until one reply arrives or `timeout` elapses.
    ///
    /// Meant for headless callers and tests; the UI uses [`Self::poll`].
    pub fn wait_for_reply(
        &mut self,
        workspace: &mut Workspace,
        timeout: Duration,
    ) -> Option<ReplyOutcome> {
        match self.reply_receiver.recv_timeout(timeout) {
            Ok((token, result)) => Some(self.apply(workspace, token, result)),
            Err(_) => None,
        }
    }

    fn apply(
        &mut self,
        workspace: &mut Workspace,
        token: RequestToken,
        result: Result<String, GenerationError>,
    ) -> ReplyOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        let raw_len = result.as_ref().map(|raw| raw.len()).ok();
        let outcome = workspace.complete_generation(token, result);
        match &outcome {
            ReplyOutcome::Applied => {
                log_info!(
                    "Applied reply {} ({} raw bytes, {} after cleanup)",
                    token,
                    raw_len.unwrap_or_default(),
                    workspace.source().len()
                );
            }
            ReplyOutcome::Failed(e) => {
                log_error!("Generation request {} failed: {}", token, e);
            }
            ReplyOutcome::Discarded => {
                log_warn!("Discarded stale reply {}", token);
            }
        }
        outcome
    }
}
