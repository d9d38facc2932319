use crate::api::Analysis;
use crate::error::{SentiscopeError, SentiscopeResult};

/// Where the current submission stands. A fresh session is `Idle`; an edit
/// after a terminal phase returns to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// The request lifecycle controller: input draft, phase, and at most one of
/// result/error. All transitions go through the three methods below so the
/// invariants hold no matter which surface (TUI, one-shot CLI) drives them.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    input: String,
    phase: Phase,
    result: Option<Analysis>,
    error: Option<String>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn result(&self) -> Option<&Analysis> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the draft text. Editing after an outcome discards the stale
    /// result or error immediately, before any resubmission. Editing while a
    /// request is outstanding only updates the draft; the in-flight call is
    /// neither cancelled nor re-targeted.
    pub fn set_input(&mut self, text: String) {
        self.input = text;
        if matches!(self.phase, Phase::Succeeded | Phase::Failed) {
            self.phase = Phase::Idle;
            self.result = None;
            self.error = None;
        }
    }

    /// Try to start a submission. Returns the payload to dispatch when the
    /// guards pass. The loading guard comes first: while a request is
    /// outstanding, submit is a no-op and nothing is dispatched. An empty
    /// trimmed draft fails locally with the fixed validation message and
    /// also dispatches nothing.
    ///
    /// The returned payload is the raw draft as typed, not the trimmed form
    /// the guard inspected.
    pub fn submit(&mut self) -> Option<String> {
        if self.phase == Phase::Loading {
            return None;
        }
        if self.input.trim().is_empty() {
            self.result = None;
            self.error = Some(SentiscopeError::Validation.to_string());
            self.phase = Phase::Failed;
            return None;
        }
        self.result = None;
        self.error = None;
        self.phase = Phase::Loading;
        Some(self.input.clone())
    }

    /// Apply the single terminal outcome of the outstanding call. Both
    /// branches leave `Loading`, so the spinner cannot stick regardless of
    /// how the call ended.
    pub fn resolve(&mut self, outcome: SentiscopeResult<Analysis>) {
        match outcome {
            Ok(analysis) => {
                self.error = None;
                self.result = Some(analysis);
                self.phase = Phase::Succeeded;
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err.to_string());
                self.phase = Phase::Failed;
            }
        }
    }
}
