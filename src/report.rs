//! Status reporting interface
//!
//! Operations and the dispatcher describe what happened as [`Event`]s; how
//! they are rendered is up to the [`Reporter`]. The console rendering lives in
//! `utils::terminal`.

use std::path::PathBuf;
use std::time::Duration;

use crate::vocab::Operation;

/// Child process stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Something worth telling the user about
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An operation is about to start
    Started(Operation),
    /// Stream goes to the console
    StreamToConsole(Stream),
    /// Stream is captured to a file
    StreamToFile(Stream, PathBuf),
    /// External command about to be spawned (verbose only)
    Spawning(String),
    /// Wall time spent in a timed operation
    Elapsed {
        operation: Operation,
        elapsed: Duration,
    },
    /// An operation finished without error
    Completed(Operation),
    /// Deploy/run could not find the built executable
    MissingArtifact(PathBuf),
    /// Deploy copied the executable
    Deployed { from: PathBuf, to: PathBuf },
    /// Clean found no Output Location
    NothingToClean(PathBuf),
    /// Open-in-IDE found no Output Location
    NothingToOpen(PathBuf),
    /// Clean is about to remove a tree
    Cleaning(PathBuf),
    Cleaned(PathBuf),
    /// An entry could not be removed during clean
    CleanSkipped { path: PathBuf, reason: String },
    /// External process exited unsuccessfully
    ProcessFailed {
        operation: Operation,
        exit_code: Option<i32>,
    },
    /// Operation could not be carried out at all
    OperationError { operation: Operation, message: String },
    /// Halt-on-failure stopped the run early
    Halted { remaining: usize },
}

/// Sink for status events
pub trait Reporter {
    fn report(&mut self, event: Event);

    /// Called before a subprocess with both streams captured starts and after
    /// it ends. Console reporters show a spinner in between.
    fn busy(&mut self, _operation: Operation) {}
    fn idle(&mut self) {}
}

/// Reporter that keeps every event, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn report(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(test)]
impl RecordingReporter {
    pub fn contains(&self, predicate: impl Fn(&Event) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}
