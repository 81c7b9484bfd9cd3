use std::sync::{Arc, Mutex};

use tracing::debug;

use flowdag::{Task, TaskContext};

/// Shared record of task executions, in the order actions actually ran.
///
/// The sequential analogue of a fake executor: tests hand each task an
/// action that records its name here, then assert on the order (and on
/// which actions ran at all) afterwards.
#[derive(Debug, Clone, Default)]
pub struct RunProbe {
    executed: Arc<Mutex<Vec<String>>>,
}

impl RunProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        debug!(task = %name, "probe recorded execution");
        self.executed.lock().unwrap().push(name.to_string());
    }

    /// Names of tasks whose actions ran, in execution order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

/// A task whose action only records that it ran.
///
/// Extend it with the usual builder methods:
/// `recording_task("build", &probe).deps([clean])`.
pub fn recording_task(name: &str, probe: &RunProbe) -> Task {
    let probe = probe.clone();
    let recorded = name.to_string();
    Task::new(name).action(move |_ctx: &mut TaskContext| {
        probe.record(&recorded);
        Ok(())
    })
}
