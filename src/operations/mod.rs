//! Operation implementations
//!
//! Each operation is a thin call into an external process or a single
//! filesystem action. [`Operations`] routes dispatcher requests to them.

mod artifact;
mod clean;
mod cmake_steps;

use std::path::PathBuf;

use anyhow::Result;

use crate::build::cmake::CMakeConfig;
use crate::build::BuildContext;
use crate::dispatch::{OperationHandler, Outcome};
use crate::exec::{ProcessRunner, ProcessSpec, Redirection};
use crate::report::{Event, Reporter};
use crate::utils::paths::ensure_dir;
use crate::utils::tools::require_tool;
use crate::vocab::Operation;

/// Real operation handler for one invocation
pub struct Operations<'a, R: ProcessRunner> {
    ctx: &'a BuildContext,
    runner: R,
    /// Resolved on first use
    cmake: Option<PathBuf>,
}

impl<'a, R: ProcessRunner> Operations<'a, R> {
    pub fn new(ctx: &'a BuildContext, runner: R) -> Self {
        Self {
            ctx,
            runner,
            cmake: None,
        }
    }

    /// Use this CMake executable instead of looking it up on PATH
    #[cfg(test)]
    pub fn with_cmake(mut self, cmake: impl Into<PathBuf>) -> Self {
        self.cmake = Some(cmake.into());
        self
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn cmake_config(&mut self, operation: Operation) -> Result<CMakeConfig> {
        let cmake = match self.cmake.clone() {
            Some(path) => path,
            None => {
                let path = require_tool("cmake", operation.label())?;
                self.cmake = Some(path.clone());
                path
            }
        };

        Ok(CMakeConfig::new(
            cmake,
            self.ctx.source_dir.clone(),
            self.ctx.output_dir.clone(),
        )
        .generator(self.ctx.request.generator)
        .configuration(self.ctx.request.configuration)
        .cache_vars(&self.ctx.cache_vars)
        .jobs(self.ctx.jobs)
        .verbose(self.ctx.verbose))
    }

    /// Spawn `spec` under the invocation's output mode and wait for it
    fn spawn(
        &mut self,
        operation: Operation,
        spec: &ProcessSpec,
        reporter: &mut dyn Reporter,
    ) -> Result<Outcome> {
        let std_output_dir = self.ctx.std_output_dir();
        ensure_dir(&std_output_dir)?;

        let redirection =
            Redirection::for_operation(self.ctx.request.output_mode, &std_output_dir, operation);
        for event in redirection.events() {
            reporter.report(event);
        }
        reporter.report(Event::Spawning(spec.display()));

        let captured = redirection.fully_captured();
        if captured {
            reporter.busy(operation);
        }
        let result = self.runner.run(spec, &redirection);
        if captured {
            reporter.idle();
        }
        let result = result?;

        reporter.report(Event::Elapsed {
            operation,
            elapsed: result.duration,
        });

        if result.success {
            Ok(Outcome::Succeeded)
        } else {
            Ok(Outcome::Failed {
                exit_code: result.exit_code,
            })
        }
    }
}

impl<R: ProcessRunner> OperationHandler for Operations<'_, R> {
    fn perform(&mut self, operation: Operation, reporter: &mut dyn Reporter) -> Result<Outcome> {
        match operation {
            Operation::Generate => self.generate(reporter),
            Operation::Build => self.build(reporter),
            Operation::Deploy => self.deploy(reporter),
            Operation::Run => self.run(reporter),
            Operation::Clean => self.clean(reporter),
            Operation::OpenIde => self.open_ide(reporter),
        }
    }
}
