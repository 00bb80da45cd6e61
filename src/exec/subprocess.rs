//! Blocking subprocess execution with stream redirection

use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use super::redirect::{Redirection, StreamTarget};

/// A command line to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl ProcessSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-like rendering for verbose output
    pub fn display(&self) -> String {
        let mut parts = vec![quote(&self.program.display().to_string())];
        parts.extend(self.args.iter().map(|a| quote(a)));
        parts.join(" ")
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.contains(char::is_whitespace) {
        format!("\"{}\"", part)
    } else {
        part.to_string()
    }
}

/// Result of a subprocess execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, `None` when killed by a signal
    pub exit_code: Option<i32>,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code(),
            duration,
        }
    }
}

/// Spawns external processes and waits for them
pub trait ProcessRunner {
    fn run(&mut self, spec: &ProcessSpec, redirection: &Redirection) -> Result<CommandResult>;
}

/// Runs processes on the host with `std::process`
#[derive(Debug, Default)]
pub struct SystemRunner;

fn open_target(target: &StreamTarget) -> Result<Stdio> {
    match target {
        StreamTarget::Console => Ok(Stdio::inherit()),
        StreamTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Stdio::from(file))
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&mut self, spec: &ProcessSpec, redirection: &Redirection) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::inherit());
        cmd.stdout(open_target(&redirection.stdout)?);
        cmd.stderr(open_target(&redirection.stderr)?);

        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute {}", spec.program.display()))?;

        Ok(CommandResult::from_status(status, start.elapsed()))
    }
}

/// Runner that records every spawn and replays scripted exit codes, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<(ProcessSpec, Redirection)>,
    /// Exit codes handed out in order; 0 once exhausted
    pub exit_codes: std::collections::VecDeque<i32>,
}

#[cfg(test)]
impl RecordingRunner {
    pub fn with_exit_codes(codes: &[i32]) -> Self {
        Self {
            calls: Vec::new(),
            exit_codes: codes.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl ProcessRunner for RecordingRunner {
    fn run(&mut self, spec: &ProcessSpec, redirection: &Redirection) -> Result<CommandResult> {
        self.calls.push((spec.clone(), redirection.clone()));
        let code = self.exit_codes.pop_front().unwrap_or(0);
        Ok(CommandResult {
            success: code == 0,
            exit_code: Some(code),
            duration: Duration::from_millis(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_spaces() {
        let spec = ProcessSpec::new("cmake")
            .args(["-G", "Ninja Multi-Config"])
            .arg("-S")
            .arg(".");
        assert_eq!(spec.display(), "cmake -G \"Ninja Multi-Config\" -S .");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_to_files() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let out = temp_dir.path().join("out.txt");
        let err = temp_dir.path().join("err.txt");
        let redirection = Redirection {
            stdout: StreamTarget::File(out.clone()),
            stderr: StreamTarget::File(err.clone()),
        };
        let spec = ProcessSpec::new("sh").args(["-c", "echo hello; echo oops 1>&2; exit 3"]);

        let result = SystemRunner.run(&spec, &redirection).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(std::fs::read_to_string(out).unwrap().trim(), "hello");
        assert_eq!(std::fs::read_to_string(err).unwrap().trim(), "oops");
    }

    #[test]
    fn test_system_runner_reports_missing_program() {
        let spec = ProcessSpec::new("definitely-not-a-real-program-cmkop");
        assert!(SystemRunner.run(&spec, &Redirection::console()).is_err());
    }
}
