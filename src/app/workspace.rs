//! The prompt-to-preview state machine.
//!
//! [`Workspace`] owns every piece of user-facing state (prompt, stack choice,
//! source buffer, readiness, preview flag) and exposes one transition per user
//! action. Rendering code reads from it and feeds actions back in; nothing else
//! mutates these fields.
//!
//! Invariants held here:
//! - the editor stays read-only until the first successful reply, and never
//!   becomes read-only again afterwards
//! - the preview can only be opened while the source is non-blank
//! - only the reply to the most recently issued request may touch the source

use crate::app::generation::{sanitize_response, GenerationError};
use crate::app::stack_choice::StackChoice;

/// Identity of one issued generation request. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything needed to send one request, produced by [`Workspace::begin_generation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub token: RequestToken,
    pub composed_prompt: String,
}

/// What happened to a reply handed to [`Workspace::complete_generation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The sanitized reply replaced the source buffer.
    Applied,
    /// The latest request failed; the source buffer was left as is.
    Failed(GenerationError),
    /// A newer request was issued after this one, so the reply was dropped.
    Discarded,
}

/// Append the stack instruction to the user's description.
pub fn compose_prompt(prompt: &str, stack: StackChoice) -> String {
    format!("{} using {}", prompt, stack.label())
}

#[derive(Debug, Clone)]
pub struct Workspace {
    prompt: String,
    stack: StackChoice,
    source: String,
    read_only: bool,
    preview_open: bool,
    issued: u64,
    pending: Option<RequestToken>,
    last_failure: Option<GenerationError>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            stack: StackChoice::Unselected,
            source: String::new(),
            read_only: true,
            preview_open: false,
            issued: 0,
            pending: None,
            last_failure: None,
        }
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt text in full.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn stack(&self) -> StackChoice {
        self.stack
    }

    pub fn select_stack(&mut self, stack: StackChoice) {
        self.stack = stack;
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the editor must refuse edits.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_preview_open(&self) -> bool {
        self.preview_open
    }

    /// The preview is drawn only while it is open and there is something to show.
    pub fn is_preview_visible(&self) -> bool {
        self.preview_open && !self.source.trim().is_empty()
    }

    /// Token of the request whose reply is still awaited, if any.
    pub fn pending_request(&self) -> Option<RequestToken> {
        self.pending
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// Failure of the latest request, cleared when the next request is issued.
    pub fn last_failure(&self) -> Option<&GenerationError> {
        self.last_failure.as_ref()
    }

    /// Apply an edit from the editor.
    ///
    /// The edit replaces the whole buffer. An empty or missing value means the
    /// editor reported no change, and edits are ignored while read-only.
    /// Returns whether the buffer changed.
    pub fn edit_source(&mut self, value: Option<String>) -> bool {
        if self.read_only {
            return false;
        }
        match value {
            Some(text) if !text.is_empty() => {
                let changed = text != self.source;
                self.source = text;
                changed
            }
            _ => false,
        }
    }

    /// Start a generation request.
    ///
    /// With an empty prompt nothing changes and `None` is returned. Otherwise
    /// the source buffer is cleared, a fresh token is issued and the composed
    /// prompt is returned for sending.
    pub fn begin_generation(&mut self) -> Option<GenerationTicket> {
        if self.prompt.is_empty() {
            return None;
        }

        self.issued += 1;
        let token = RequestToken(self.issued);
        self.source.clear();
        self.pending = Some(token);
        self.last_failure = None;

        Some(GenerationTicket {
            token,
            composed_prompt: compose_prompt(&self.prompt, self.stack),
        })
    }

    /// Hand a reply for `token` to the workspace.
    ///
    /// Replies to anything but the latest issued request are discarded.
    pub fn complete_generation(
        &mut self,
        token: RequestToken,
        reply: Result<String, GenerationError>,
    ) -> ReplyOutcome {
        if token.0 != self.issued {
            return ReplyOutcome::Discarded;
        }
        self.pending = None;

        match reply {
            Ok(raw) => {
                self.source = sanitize_response(&raw);
                self.read_only = false;
                ReplyOutcome::Applied
            }
            Err(e) => {
                self.last_failure = Some(e.clone());
                ReplyOutcome::Failed(e)
            }
        }
    }

    /// Open the preview. A no-op returning `false` while the source is blank.
    pub fn open_preview(&mut self) -> bool {
        if self.source.trim().is_empty() {
            return false;
        }
        self.preview_open = true;
        true
    }

    /// Close the preview. Allowed from any state; never touches the source.
    pub fn close_preview(&mut self) {
        self.preview_open = false;
    }
}
