// src/task.rs

//! Task definition and the registration handle.

use std::fmt;

use crate::context::{ActionResult, TaskContext};

/// Opaque handle to a registered task.
///
/// An index into the owning flow's registry arena, never an ownership
/// pointer, so the logical dependency graph can be checked for cycles
/// without any cyclic ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub(crate) usize);

/// Executable body of a task.
pub type Action = Box<dyn Fn(&mut TaskContext) -> ActionResult>;

/// A named unit of work.
///
/// Built with [`Task::new`] plus the builder methods, then registered with
/// [`Flow::register`](crate::Flow::register):
///
/// ```
/// use flowdag::{Flow, Task};
///
/// let mut flow = Flow::new();
/// let clean = flow.register(Task::new("clean").usage("remove build artifacts"))?;
/// flow.register(
///     Task::new("build")
///         .usage("compile everything")
///         .deps([clean])
///         .action(|ctx| {
///             ctx.log("building");
///             Ok(())
///         }),
/// )?;
/// # Ok::<(), flowdag::FlowError>(())
/// ```
pub struct Task {
    pub(crate) name: String,
    pub(crate) usage: String,
    pub(crate) action: Option<Action>,
    pub(crate) deps: Vec<TaskId>,
}

impl Task {
    /// Start defining a task with the given name.
    ///
    /// The name must be non-empty and unique within the flow; both are
    /// checked at registration time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: String::new(),
            action: None,
            deps: Vec::new(),
        }
    }

    /// One-line description shown in task listings.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Tasks that must reach a terminal status before this one runs.
    ///
    /// Declaration order is preserved; it is the tie-break used when the
    /// execution plan orders otherwise-unrelated dependencies.
    pub fn deps(mut self, deps: impl IntoIterator<Item = TaskId>) -> Self {
        self.deps.extend(deps);
        self
    }

    /// The action to execute when the task runs.
    ///
    /// A task without an action is a pure grouping node: its only effect is
    /// running its dependencies.
    pub fn action(
        mut self,
        action: impl Fn(&mut TaskContext) -> ActionResult + 'static,
    ) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct dependencies, in declaration order.
    pub fn dependencies(&self) -> &[TaskId] {
        &self.deps
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("deps", &self.deps)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
