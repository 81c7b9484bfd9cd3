// src/driver.rs

//! Top-level driver: turn parsed CLI arguments into a run and an exit code.
//!
//! [`run_with`] contains the driver semantics against caller-supplied
//! writers so it can be tested without touching the real stdout/stderr;
//! [`main`] is the thin IO shell a pipeline binary calls.

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::error;

use crate::cli::CliArgs;
use crate::engine::{report, Flow};

/// Run the flow for the given arguments and translate the outcome into a
/// process exit code.
pub fn main(flow: &Flow, args: &CliArgs) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    if run_with(flow, args, &mut stdout, &mut stderr) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Driver core: returns `true` when the process should exit successfully.
///
/// - Requested task names come from the positional arguments; an empty list
///   means the flow's default task.
/// - `--list` writes the registered tasks to `out` and succeeds.
/// - Configuration errors (unknown task, dependency cycle, no default task)
///   write the error plus the task listing to `err_out` and fail without
///   running any task.
/// - Otherwise the run report goes to `out` and the overall verdict decides
///   the result.
pub fn run_with(
    flow: &Flow,
    args: &CliArgs,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> bool {
    if args.list {
        return match write_task_list(out, flow) {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "failed to write task listing");
                false
            }
        };
    }

    match flow.run(&args.tasks) {
        Ok(summary) => {
            if let Err(err) = report::write_report(out, &summary, args.verbose) {
                error!(error = %err, "failed to write run report");
                return false;
            }
            !summary.failed()
        }
        Err(err) => {
            let _ = writeln!(err_out, "error: {err}");
            let _ = writeln!(err_out, "Tasks:");
            let _ = write_task_list(err_out, flow);
            false
        }
    }
}

/// Write the registered tasks in registration order, names aligned.
pub fn write_task_list(out: &mut impl Write, flow: &Flow) -> io::Result<()> {
    let width = flow
        .tasks()
        .map(|task| task.name().len())
        .max()
        .unwrap_or(0);

    for task in flow.tasks() {
        let line = format!("  {:<width$}  {}", task.name(), task.usage);
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
