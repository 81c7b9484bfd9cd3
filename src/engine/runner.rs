// src/engine/runner.rs

//! Sequential plan execution.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::context::{Interrupt, TaskContext};
use crate::dag::ExecutionPlan;
use crate::registry::Registry;
use crate::task::Task;
use crate::types::TaskStatus;

use super::TaskResult;

/// Execute the plan in order, one task at a time.
///
/// A task's action runs only if every direct dependency ended Passed or
/// Skipped; otherwise the task is recorded NotRun without executing, which
/// propagates transitively because NotRun itself blocks dependents. The
/// plan places dependencies first, so every dependency already holds a
/// terminal status when a task is reached.
pub(crate) fn execute_plan(registry: &Registry, plan: &ExecutionPlan) -> Vec<TaskResult> {
    // Indexed like the registry arena; None = not reached yet.
    let mut statuses: Vec<Option<TaskStatus>> = vec![None; registry.len()];
    let mut results = Vec::with_capacity(plan.len());

    for &id in plan.tasks() {
        let task = registry.get(id);

        let blocking_dep = task.deps.iter().copied().find(|dep| match statuses[dep.0] {
            Some(status) => !status.unblocks_dependents(),
            None => {
                warn!(
                    task = %task.name,
                    dep = %registry.get(*dep).name,
                    "dependency has no terminal status; treating as blocking"
                );
                true
            }
        });

        let result = match blocking_dep {
            Some(dep) => {
                info!(
                    task = %task.name,
                    blocked_on = %registry.get(dep).name,
                    "dependency did not pass; recording NotRun"
                );
                TaskResult {
                    name: task.name.clone(),
                    status: TaskStatus::NotRun,
                    elapsed: Duration::ZERO,
                    output: String::new(),
                }
            }
            None => run_task(task),
        };

        statuses[id.0] = Some(result.status);
        results.push(result);
    }

    results
}

/// Run a single task's action to completion or early termination.
fn run_task(task: &Task) -> TaskResult {
    info!(task = %task.name, "task started");
    let mut ctx = TaskContext::new(task.name.clone());
    let started = Instant::now();

    if let Some(action) = &task.action {
        match action(&mut ctx) {
            Ok(()) => {}
            Err(Interrupt::Fail) => {
                debug!(task = %task.name, "action ended early via fatal")
            }
            Err(Interrupt::Skip) => {
                debug!(task = %task.name, "action ended early via skip")
            }
        }
    }

    let elapsed = started.elapsed();
    let status = ctx.status();
    info!(task = %task.name, status = %status, ?elapsed, "task finished");

    TaskResult {
        name: task.name.clone(),
        status,
        elapsed,
        output: ctx.into_output(),
    }
}
