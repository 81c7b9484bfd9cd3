// src/exec/cmd.rs

//! Synchronous external command runner.

use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::errors::CmdError;
use crate::output::OutputSink;

/// One external command, bound to a task's output sink.
///
/// Built via [`TaskContext::cmd`](crate::TaskContext::cmd). Both pipes are
/// streamed line-by-line into the sink, so output from the process appears
/// in the task's captured output in the order it was produced and lines
/// from the two pipes are never mixed mid-line. `run` returns an error on
/// launch failure and on non-zero exit, uniformly.
pub struct Cmd {
    task: String,
    program: String,
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stdout: Option<Box<dyn Write + Send>>,
    sink: OutputSink,
}

impl Cmd {
    pub(crate) fn new<I, S>(
        task: String,
        program: impl Into<String>,
        args: I,
        sink: OutputSink,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            task,
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            dir: None,
            envs: Vec::new(),
            stdout: None,
            sink,
        }
    }

    /// Working directory for the process.
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Add one environment variable for the process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Divert stdout to the given writer instead of the task output.
    ///
    /// Stderr still goes to the task output. Use
    /// [`Tee`](crate::output::Tee) to capture and record at the same time.
    pub fn stdout(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stdout = Some(Box::new(writer));
        self
    }

    /// Spawn the process, stream its output, and wait for it to exit.
    pub fn run(mut self) -> Result<(), CmdError> {
        debug!(
            task = %self.task,
            program = %self.program,
            args = ?self.args,
            "running command"
        );

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }
        command.stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| CmdError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        // Drain stderr on a helper thread so neither pipe can fill up and
        // block the process while we read the other one.
        let stderr_reader = child.stderr.take().map(|stderr| {
            let mut sink = self.sink.clone();
            let task = self.task.clone();
            thread::spawn(move || copy_lines(stderr, &mut sink, &task))
        });

        if let Some(stdout) = child.stdout.take() {
            match self.stdout.as_mut() {
                Some(writer) => copy_lines(stdout, writer, &self.task),
                None => copy_lines(stdout, &mut self.sink.clone(), &self.task),
            }
        }

        if let Some(handle) = stderr_reader {
            if handle.join().is_err() {
                warn!(task = %self.task, "stderr reader thread panicked");
            }
        }

        let status = child.wait().map_err(|source| CmdError::Wait {
            program: self.program.clone(),
            source,
        })?;

        debug!(
            task = %self.task,
            program = %self.program,
            code = status.code(),
            success = status.success(),
            "command exited"
        );

        if !status.success() {
            return Err(CmdError::ExitStatus {
                program: self.program,
                status,
            });
        }
        Ok(())
    }
}

/// Copy a pipe into a writer one line at a time, so concurrent writers into
/// a shared sink never interleave mid-line.
fn copy_lines(reader: impl Read, out: &mut impl Write, task: &str) {
    for line in BufReader::new(reader).lines() {
        match line {
            Ok(line) => {
                if let Err(err) = writeln!(out, "{line}") {
                    warn!(task = %task, error = %err, "failed to record command output");
                    break;
                }
            }
            Err(err) => {
                warn!(task = %task, error = %err, "failed to read command output");
                break;
            }
        }
    }
}
