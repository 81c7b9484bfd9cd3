// src/engine/report.rs

//! Human-readable run report.
//!
//! Rendered in plan (execution) order, one section per task: a
//! `===== TASK  <name>` header with the captured output, then a status line
//! with the task's duration. Status lines are printed for every planned
//! task (including NotRun); output bodies are shown for every task when
//! verbose, and only for failed tasks otherwise. A final line gives the
//! overall verdict and total duration.

use std::io::{self, Write};
use std::time::Duration;

use crate::engine::RunSummary;
use crate::types::{RunStatus, TaskStatus};

pub fn write_report(
    out: &mut impl Write,
    summary: &RunSummary,
    verbose: bool,
) -> io::Result<()> {
    for result in summary.results() {
        let show_output = verbose || result.status == TaskStatus::Failed;
        if show_output && !result.output.is_empty() {
            writeln!(out, "===== TASK  {}", result.name)?;
            out.write_all(result.output.as_bytes())?;
        }
        writeln!(
            out,
            "----- {}: {} ({})",
            result.status,
            result.name,
            fmt_duration(result.elapsed)
        )?;
    }

    match summary.status() {
        RunStatus::Passed => writeln!(out, "ok      {}", fmt_duration(summary.elapsed())),
        RunStatus::Failed => writeln!(out, "failed  {}", fmt_duration(summary.elapsed())),
    }
}

fn fmt_duration(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}
