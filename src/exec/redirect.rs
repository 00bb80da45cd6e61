//! Per-operation routing of child stdout / stderr

use std::path::{Path, PathBuf};

use crate::report::{Event, Stream};
use crate::vocab::{Operation, OutputMode};

/// Destination of one child stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTarget {
    Console,
    File(PathBuf),
}

impl StreamTarget {
    pub fn is_console(&self) -> bool {
        matches!(self, StreamTarget::Console)
    }
}

/// Stream routing for a single subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub stdout: StreamTarget,
    pub stderr: StreamTarget,
}

impl Redirection {
    /// Both streams inherited from this process
    #[cfg(test)]
    pub fn console() -> Self {
        Self {
            stdout: StreamTarget::Console,
            stderr: StreamTarget::Console,
        }
    }

    /// Apply `mode` for `operation`, capturing into
    /// `<std_output_dir>/<op>StdOut.txt` and `<op>StdErr.txt`
    pub fn for_operation(mode: OutputMode, std_output_dir: &Path, operation: Operation) -> Self {
        let stem = operation.file_stem();
        let stdout = if mode.stdout_to_console() {
            StreamTarget::Console
        } else {
            StreamTarget::File(std_output_dir.join(format!("{}StdOut.txt", stem)))
        };
        let stderr = if mode.stderr_to_console() {
            StreamTarget::Console
        } else {
            StreamTarget::File(std_output_dir.join(format!("{}StdErr.txt", stem)))
        };
        Self { stdout, stderr }
    }

    /// True when nothing from the child reaches the terminal
    pub fn fully_captured(&self) -> bool {
        !self.stdout.is_console() && !self.stderr.is_console()
    }

    /// Status events describing where each stream goes
    pub fn events(&self) -> Vec<Event> {
        [(Stream::Stdout, &self.stdout), (Stream::Stderr, &self.stderr)]
            .into_iter()
            .map(|(stream, target)| match target {
                StreamTarget::Console => Event::StreamToConsole(stream),
                StreamTarget::File(path) => Event::StreamToFile(stream, path.clone()),
            })
            .collect()
    }
}
