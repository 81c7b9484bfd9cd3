// src/engine/mod.rs

//! The flow engine.
//!
//! [`Flow`] owns the task registry and the default-task setting. One run
//! turns a list of requested task names into an execution plan, executes
//! the plan sequentially (each task at most once, dependencies first), and
//! returns a [`RunSummary`] with one [`TaskResult`] per planned task.
//!
//! A `Flow` is a plain value: construct one per pipeline (or per test),
//! register tasks, then run it as many times as needed. Nothing is
//! process-global.

pub mod report;
pub mod runner;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::info;

use crate::dag::ExecutionPlan;
use crate::errors::FlowError;
use crate::registry::Registry;
use crate::task::{Task, TaskId};
use crate::types::{RunStatus, TaskName, TaskStatus};

pub use report::write_report;

/// Outcome of one task within one run.
#[derive(Debug)]
pub struct TaskResult {
    pub name: TaskName,
    pub status: TaskStatus,
    pub elapsed: Duration,
    /// Captured log/command output, in the order it was produced.
    pub output: String,
}

/// Aggregate outcome of one [`Flow::run`] invocation.
///
/// Results are in plan (execution) order and are created fresh per run;
/// nothing persists between runs.
#[derive(Debug)]
pub struct RunSummary {
    results: Vec<TaskResult>,
    elapsed: Duration,
}

impl RunSummary {
    /// Per-task results in plan order.
    pub fn results(&self) -> &[TaskResult] {
        &self.results
    }

    /// Result of a single task, if it was part of the plan.
    pub fn result(&self, name: &str) -> Option<&TaskResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Failed if any task failed; Skipped and NotRun tasks do not count
    /// against the verdict.
    pub fn status(&self) -> RunStatus {
        if self.results.iter().any(|r| r.status == TaskStatus::Failed) {
            RunStatus::Failed
        } else {
            RunStatus::Passed
        }
    }

    pub fn failed(&self) -> bool {
        self.status() == RunStatus::Failed
    }

    /// Wall-clock time for the whole run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// The task orchestration engine.
#[derive(Debug, Default)]
pub struct Flow {
    registry: Registry,
    default: Option<TaskId>,
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a task; the returned handle is usable in other
    /// tasks' dependency lists and in [`set_default`](Self::set_default).
    pub fn register(&mut self, task: Task) -> Result<TaskId, FlowError> {
        self.registry.register(task)
    }

    /// The task to run when `run` is called with no requested names.
    pub fn set_default(&mut self, id: TaskId) {
        self.default = Some(id);
    }

    /// Registered tasks, in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.registry.iter().map(|(_, task)| task)
    }

    /// Execute the requested tasks (or the default) and their transitive
    /// dependencies, each exactly once, in dependency order.
    ///
    /// Configuration errors (unknown name, cycle, no default) are returned
    /// before any task runs. Task failures are not an `Err`: they are
    /// recorded in the summary, and [`RunSummary::failed`] reports the
    /// overall verdict.
    pub fn run<S: AsRef<str>>(&self, requested: &[S]) -> Result<RunSummary, FlowError> {
        let roots = self.resolve_requested(requested)?;
        let plan = ExecutionPlan::compute(&self.registry, &roots)?;

        info!(tasks = plan.len(), "starting run");
        let started = Instant::now();
        let results = runner::execute_plan(&self.registry, &plan);
        let summary = RunSummary {
            results,
            elapsed: started.elapsed(),
        };
        info!(
            status = ?summary.status(),
            elapsed = ?summary.elapsed(),
            "run finished"
        );
        Ok(summary)
    }

    /// Resolve requested names to handles; empty means the default task.
    ///
    /// Duplicate requests collapse to the first occurrence, keeping request
    /// order as the tie-break across unrelated roots.
    fn resolve_requested<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<TaskId>, FlowError> {
        if requested.is_empty() {
            let default = self.default.ok_or(FlowError::NoDefaultTask)?;
            if !self.registry.contains(default) {
                return Err(FlowError::ForeignDefault);
            }
            return Ok(vec![default]);
        }

        let mut roots = Vec::new();
        let mut seen: HashSet<TaskId> = HashSet::new();
        for name in requested {
            let name = name.as_ref();
            let id = self
                .registry
                .lookup(name)
                .ok_or_else(|| FlowError::UnknownTask(name.to_string()))?;
            if seen.insert(id) {
                roots.push(id);
            }
        }
        Ok(roots)
    }
}
