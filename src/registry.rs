// src/registry.rs

//! Arena of registered tasks with a name index.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::FlowError;
use crate::task::{Task, TaskId};

/// Owns every registered task.
///
/// Append-only while the flow is being configured; the engine only reads it
/// during execution. Insertion order is preserved so listings match
/// registration order.
#[derive(Debug, Default)]
pub struct Registry {
    tasks: Vec<Task>,
    index: HashMap<String, TaskId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a task, returning its handle.
    pub fn register(&mut self, task: Task) -> Result<TaskId, FlowError> {
        if task.name.is_empty() {
            return Err(FlowError::EmptyTaskName);
        }
        if self.index.contains_key(&task.name) {
            return Err(FlowError::DuplicateTask(task.name));
        }
        for dep in &task.deps {
            // Handles can only come from `register`, so an out-of-range
            // index means the handle belongs to a different flow.
            if dep.0 >= self.tasks.len() {
                return Err(FlowError::ForeignDependency(task.name));
            }
        }

        let id = TaskId(self.tasks.len());
        debug!(task = %task.name, deps = task.deps.len(), "task registered");
        self.index.insert(task.name.clone(), id);
        self.tasks.push(task);
        Ok(id)
    }

    /// Resolve a task name to its handle.
    pub fn lookup(&self, name: &str) -> Option<TaskId> {
        self.index.get(name).copied()
    }

    /// Whether the handle was issued by this registry.
    pub fn contains(&self, id: TaskId) -> bool {
        id.0 < self.tasks.len()
    }

    pub fn get(&self, id: TaskId) -> &Task {
        &self.tasks[id.0]
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.tasks.iter().enumerate().map(|(i, t)| (TaskId(i), t))
    }

    /// Insert without dependency-handle validation, so unit tests can build
    /// graphs (including cyclic ones) that the public API rejects by
    /// construction.
    #[cfg(test)]
    pub(crate) fn register_unchecked(&mut self, task: Task) -> TaskId {
        let id = TaskId(self.tasks.len());
        self.index.insert(task.name.clone(), id);
        self.tasks.push(task);
        id
    }
}
