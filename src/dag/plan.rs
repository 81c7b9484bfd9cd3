// src/dag/plan.rs

//! Execution plan computation.
//!
//! A plan is the order in which tasks run for one request:
//! - every requested task and its transitive dependencies, each at most once,
//!   even when reached via multiple paths
//! - every dependency strictly before its dependents
//! - tie-break among unrelated tasks: request order across requested roots,
//!   declaration order within a task's dependency list
//!
//! Cycles are a configuration error detected here, before any task runs.

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::FlowError;
use crate::registry::Registry;
use crate::task::TaskId;

/// Ordered, deduplicated sequence of tasks covering the requested roots and
/// their transitive dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    order: Vec<TaskId>,
}

impl ExecutionPlan {
    /// Compute the plan for the given requested roots.
    pub fn compute(registry: &Registry, requested: &[TaskId]) -> Result<Self, FlowError> {
        ensure_acyclic(registry)?;

        let mut order = Vec::new();
        let mut placed: HashSet<TaskId> = HashSet::new();

        for &root in requested {
            visit(registry, root, &mut order, &mut placed);
        }

        debug!(tasks = order.len(), "execution plan computed");
        Ok(Self { order })
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> &[TaskId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Post-order walk: dependencies first, then the task itself.
///
/// `placed` doubles as the dedup set, so a shared dependency gets one slot
/// in the plan and every dependent observes that single result. Recursion
/// depth is bounded by the longest dependency chain; the graph is known to
/// be acyclic by the time this runs.
fn visit(
    registry: &Registry,
    id: TaskId,
    order: &mut Vec<TaskId>,
    placed: &mut HashSet<TaskId>,
) {
    if placed.contains(&id) {
        return;
    }
    for &dep in &registry.get(id).deps {
        visit(registry, dep, order, placed);
    }
    if placed.insert(id) {
        order.push(id);
    }
}

/// Reject registries whose dependency relation contains a cycle.
///
/// Edge direction: dep -> task, so for `build.deps = [clean]` we add the
/// edge `clean -> build`. A topological sort fails exactly when there is a
/// cycle. The handle-based registration API cannot express a cycle (a task
/// can only depend on already-registered tasks), so this is a guard on the
/// registry's internal invariant rather than a user-facing hot path.
fn ensure_acyclic(registry: &Registry) -> Result<(), FlowError> {
    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();

    for (id, task) in registry.iter() {
        graph.add_node(id.0);
        for dep in &task.deps {
            graph.add_edge(dep.0, id.0, ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let name = registry.get(TaskId(cycle.node_id())).name().to_string();
            Err(FlowError::DependencyCycle(name))
        }
    }
}
