// src/output.rs

//! Captured task output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable handle to a task's captured output buffer.
///
/// Every clone writes into the same buffer. The mutex exists so the command
/// runner's stderr drain thread can append whole lines while the task's
/// action keeps its own handle; the engine itself stays sequential.
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current captured contents, lossily decoded.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Append one line, adding the trailing newline if missing.
    pub(crate) fn push_line(&self, line: &str) {
        let mut buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(line.as_bytes());
        if !line.ends_with('\n') {
            buf.push(b'\n');
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that duplicates every write to two underlying writers.
///
/// Lets an action capture a command's stdout for inspection while still
/// recording it in the task output:
///
/// ```no_run
/// use flowdag::output::{OutputSink, Tee};
/// # use flowdag::Flow;
/// # use flowdag::Task;
/// # let mut flow = Flow::new();
/// # flow.register(Task::new("status").action(|ctx| {
/// let porcelain = OutputSink::new();
/// let cmd = ctx
///     .cmd("git", ["status", "--porcelain"])
///     .stdout(Tee::new(ctx.output(), porcelain.clone()));
/// if let Err(err) = cmd.run() {
///     return ctx.fatal(err);
/// }
/// if !porcelain.contents().is_empty() {
///     ctx.error("working tree is dirty");
/// }
/// # Ok(())
/// # })).unwrap();
/// ```
#[derive(Debug)]
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.first.write_all(data)?;
        self.second.write_all(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}
