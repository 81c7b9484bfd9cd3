// src/context.rs

//! Per-task execution handle.
//!
//! A [`TaskContext`] is created fresh for every executed task and exposes to
//! the task's action:
//! - [`log`](TaskContext::log): append a line to the captured output
//! - [`error`](TaskContext::error): soft failure; the action keeps running
//! - [`fatal`](TaskContext::fatal): hard failure; ends the action
//! - [`skip`](TaskContext::skip): voluntary non-execution; ends the action
//! - [`cmd`](TaskContext::cmd): run an external command wired to the sink
//! - [`output`](TaskContext::output): the sink itself, for tee-ing

use std::fmt;

use tracing::{debug, warn};

use crate::exec::Cmd;
use crate::output::OutputSink;
use crate::types::TaskStatus;

/// Early-termination signal returned through [`ActionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// The action failed hard; remaining action code must not run.
    Fail,
    /// The action opted out; the task is recorded as Skipped.
    Skip,
}

/// What a task action returns.
///
/// `Ok(())` means the action ran to completion (the task still fails if
/// [`TaskContext::error`] was called along the way). `Err(Interrupt)` ends
/// the action early and is produced by [`TaskContext::fatal`] and
/// [`TaskContext::skip`]; propagate it with `?` or `return`.
pub type ActionResult = Result<(), Interrupt>;

/// Failure description accepted by `error` and `fatal`: a message plus an
/// optional underlying cause.
///
/// Strings and error values convert into it, so actions can pass either
/// without any runtime type inspection on the engine side.
pub struct FailureDetail {
    message: String,
    cause: Option<anyhow::Error>,
}

impl FailureDetail {
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            // Alternate form renders the whole source chain.
            Some(cause) => write!(f, "{cause:#}"),
            None => f.write_str(&self.message),
        }
    }
}

impl fmt::Debug for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureDetail")
            .field("message", &self.message)
            .field("has_cause", &self.cause.is_some())
            .finish()
    }
}

impl From<&str> for FailureDetail {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

impl From<String> for FailureDetail {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl From<anyhow::Error> for FailureDetail {
    fn from(cause: anyhow::Error) -> Self {
        Self {
            message: cause.to_string(),
            cause: Some(cause),
        }
    }
}

impl<E: std::error::Error + Send + Sync + 'static> From<E> for FailureDetail {
    fn from(cause: E) -> Self {
        Self {
            message: cause.to_string(),
            cause: Some(anyhow::Error::new(cause)),
        }
    }
}

/// Per-task execution handle passed to the task's action.
#[derive(Debug)]
pub struct TaskContext {
    name: String,
    sink: OutputSink,
    failed: bool,
    skipped: bool,
}

impl TaskContext {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink: OutputSink::new(),
            failed: false,
            skipped: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a line to this task's captured output. Never fails.
    pub fn log(&mut self, message: impl fmt::Display) {
        let line = message.to_string();
        debug!(task = %self.name, "{line}");
        self.sink.push_line(&line);
    }

    /// Record a recoverable failure and keep running.
    ///
    /// The task's result becomes Failed, but the action continues, so one
    /// action can report several independent problems before returning.
    /// Not-yet-started dependents of this task will end up NotRun.
    pub fn error(&mut self, detail: impl Into<FailureDetail>) {
        let detail = detail.into();
        warn!(task = %self.name, "task error: {detail}");
        self.failed = true;
        self.sink.push_line(&format!("Error: {detail}"));
    }

    /// Record a hard failure and end the action.
    ///
    /// Equivalent to [`error`](Self::error) plus early termination: the
    /// returned value is always `Err(Interrupt::Fail)` and must be
    /// propagated with `?` or `return` so no further action code runs.
    #[must_use = "propagate the returned value with `?` or `return` to end the action"]
    pub fn fatal(&mut self, detail: impl Into<FailureDetail>) -> ActionResult {
        let detail = detail.into();
        warn!(task = %self.name, "task fatal: {detail}");
        self.failed = true;
        self.sink.push_line(&format!("Fatal: {detail}"));
        Err(Interrupt::Fail)
    }

    /// Mark the task Skipped and end the action.
    ///
    /// A skipped task does not count against the run's verdict and does not
    /// block dependents. The returned value is always
    /// `Err(Interrupt::Skip)`; propagate it with `?` or `return`.
    #[must_use = "propagate the returned value with `?` or `return` to end the action"]
    pub fn skip(&mut self, reason: impl Into<String>) -> ActionResult {
        let reason = reason.into();
        debug!(task = %self.name, "task skipped: {reason}");
        self.skipped = true;
        self.sink.push_line(&format!("Skip: {reason}"));
        Err(Interrupt::Skip)
    }

    /// Build an external command wired to this task's output sink.
    pub fn cmd<I, S>(&self, program: impl Into<String>, args: I) -> Cmd
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Cmd::new(self.name.clone(), program, args, self.sink.clone())
    }

    /// A cloneable handle to this task's captured output.
    ///
    /// Useful for tee-ing command output into both the capture buffer and a
    /// caller-owned writer; see [`Tee`](crate::output::Tee).
    pub fn output(&self) -> OutputSink {
        self.sink.clone()
    }

    /// Terminal status once the action has returned. Failed wins over
    /// Skipped wins over Passed.
    pub(crate) fn status(&self) -> TaskStatus {
        if self.failed {
            TaskStatus::Failed
        } else if self.skipped {
            TaskStatus::Skipped
        } else {
            TaskStatus::Passed
        }
    }

    pub(crate) fn into_output(self) -> String {
        self.sink.contents()
    }
}
