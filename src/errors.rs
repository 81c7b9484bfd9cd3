// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

/// Configuration errors.
///
/// All of these are detected before any task executes: a run that returns a
/// `FlowError` has run zero tasks.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("task name must not be empty")]
    EmptyTaskName,

    #[error("task '{0}' is already registered")]
    DuplicateTask(String),

    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error("task '{0}' has a dependency handle that was not registered with this flow")]
    ForeignDependency(String),

    #[error("the default task handle was not registered with this flow")]
    ForeignDefault,

    #[error("cycle detected in task graph involving task '{0}'")]
    DependencyCycle(String),

    #[error("no tasks requested and no default task configured")]
    NoDefaultTask,
}

/// Failure of a single external command run by a task action.
///
/// Launch failures and non-zero exits are reported uniformly as "the command
/// failed"; interpreting specific exit codes is up to the calling action.
#[derive(Error, Debug)]
pub enum CmdError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command '{program}' failed: {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
    },
}

pub type Result<T> = std::result::Result<T, FlowError>;
