// src/lib.rs

//! flowdag: a task orchestration engine.
//!
//! Declare named tasks, wire them into a dependency graph, and run a
//! requested subset exactly once each, in dependency order, with per-task
//! pass/fail/skip status and captured output.
//!
//! This wires together:
//! - task definition and registration ([`task`], [`registry`])
//! - dependency planning with cycle detection ([`dag`])
//! - the per-task execution handle ([`context`], [`output`])
//! - external command execution ([`exec`])
//! - the sequential engine and run report ([`engine`])
//! - the CLI-facing driver ([`driver`], [`cli`], [`logging`])
//!
//! ```
//! use flowdag::{Flow, Task};
//!
//! let mut flow = Flow::new();
//!
//! let hi = flow.register(Task::new("hi").usage("Greetings").action(|ctx| {
//!     ctx.log("hello world");
//!     Ok(())
//! }))?;
//!
//! let all = flow.register(Task::new("all").deps([hi]))?;
//! flow.set_default(all);
//!
//! // Empty request: the default task and its dependencies run.
//! let summary = flow.run::<&str>(&[])?;
//! assert!(!summary.failed());
//! assert_eq!(summary.result("hi").unwrap().output, "hello world\n");
//! # Ok::<(), flowdag::FlowError>(())
//! ```

pub mod cli;
pub mod context;
pub mod dag;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod output;
pub mod registry;
pub mod task;
pub mod types;

pub use context::{ActionResult, FailureDetail, Interrupt, TaskContext};
pub use engine::{Flow, RunSummary, TaskResult};
pub use errors::{CmdError, FlowError};
pub use exec::Cmd;
pub use output::{OutputSink, Tee};
pub use task::{Task, TaskId};
pub use types::{RunStatus, TaskStatus};
