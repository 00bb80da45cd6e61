//! Sequential operation dispatcher
//!
//! Runs the validated operation sequence one step at a time. Each step runs
//! to completion before the next one starts. By default a failed step is
//! reported and the sequence carries on; [`FailurePolicy::Halt`] stops at
//! the first failure instead.

use anyhow::Result;

use crate::report::{Event, Reporter};
use crate::vocab::Operation;

/// Why an operation did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingArtifact,
    NothingToClean,
    NothingToOpen,
}

/// Result of one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// External process exited unsuccessfully
    Failed { exit_code: Option<i32> },
    /// The operation could not be carried out (spawn error, I/O error)
    Errored(String),
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. } | Outcome::Errored(_))
    }
}

/// Performs individual operations
pub trait OperationHandler {
    fn perform(&mut self, operation: Operation, reporter: &mut dyn Reporter) -> Result<Outcome>;
}

/// What to do after a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report and move on to the next operation
    #[default]
    Continue,
    /// Stop, skipping the remaining operations
    Halt,
}

/// Dispatcher state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Generating,
    Building,
    Deploying,
    Running,
    Cleaning,
    OpeningIde,
    Finished,
}

impl From<Operation> for DispatchState {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Generate => DispatchState::Generating,
            Operation::Build => DispatchState::Building,
            Operation::Deploy => DispatchState::Deploying,
            Operation::Run => DispatchState::Running,
            Operation::Clean => DispatchState::Cleaning,
            Operation::OpenIde => DispatchState::OpeningIde,
        }
    }
}

/// Per-operation outcomes of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub outcomes: Vec<(Operation, Outcome)>,
    /// Set when halt-on-failure cut the sequence short
    pub halted: bool,
}

impl DispatchSummary {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failure()).count()
    }
}

#[derive(Debug)]
pub struct Dispatcher {
    policy: FailurePolicy,
    state: DispatchState,
}

impl Dispatcher {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            state: DispatchState::Idle,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Run `operations` in order through `handler`
    pub fn dispatch<H: OperationHandler>(
        &mut self,
        operations: &[Operation],
        handler: &mut H,
        reporter: &mut dyn Reporter,
    ) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for (index, &operation) in operations.iter().enumerate() {
            self.state = operation.into();

            let outcome = match handler.perform(operation, reporter) {
                Ok(outcome) => outcome,
                Err(err) => Outcome::Errored(format!("{:#}", err)),
            };

            match &outcome {
                Outcome::Failed { exit_code } => reporter.report(Event::ProcessFailed {
                    operation,
                    exit_code: *exit_code,
                }),
                Outcome::Errored(message) => reporter.report(Event::OperationError {
                    operation,
                    message: message.clone(),
                }),
                Outcome::Succeeded | Outcome::Skipped(_) => {}
            }

            let failed = outcome.is_failure();
            summary.outcomes.push((operation, outcome));

            if failed && self.policy == FailurePolicy::Halt {
                let remaining = operations.len() - index - 1;
                if remaining > 0 {
                    reporter.report(Event::Halted { remaining });
                }
                summary.halted = true;
                break;
            }
        }

        self.state = DispatchState::Finished;
        summary
    }
}
