//! Generate, build and open-in-IDE: straight CMake invocations

use anyhow::Result;

use super::Operations;
use crate::dispatch::{Outcome, SkipReason};
use crate::exec::ProcessRunner;
use crate::report::{Event, Reporter};
use crate::vocab::Operation;

impl<R: ProcessRunner> Operations<'_, R> {
    pub(super) fn generate(&mut self, reporter: &mut dyn Reporter) -> Result<Outcome> {
        reporter.report(Event::Started(Operation::Generate));
        let spec = self.cmake_config(Operation::Generate)?.configure();
        let outcome = self.spawn(Operation::Generate, &spec, reporter)?;
        if outcome == Outcome::Succeeded {
            reporter.report(Event::Completed(Operation::Generate));
        }
        Ok(outcome)
    }

    pub(super) fn build(&mut self, reporter: &mut dyn Reporter) -> Result<Outcome> {
        reporter.report(Event::Started(Operation::Build));
        let spec = self.cmake_config(Operation::Build)?.build();
        self.spawn(Operation::Build, &spec, reporter)
    }

    pub(super) fn open_ide(&mut self, reporter: &mut dyn Reporter) -> Result<Outcome> {
        if !self.ctx.output_dir.exists() {
            reporter.report(Event::NothingToOpen(self.ctx.output_dir.clone()));
            return Ok(Outcome::Skipped(SkipReason::NothingToOpen));
        }

        reporter.report(Event::Started(Operation::OpenIde));
        let spec = self.cmake_config(Operation::OpenIde)?.open();
        self.spawn(Operation::OpenIde, &spec, reporter)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::test_support::context;
    use super::*;
    use crate::dispatch::{Dispatcher, FailurePolicy, OperationHandler};
    use crate::exec::subprocess::RecordingRunner;
    use crate::exec::redirect::StreamTarget;
    use crate::report::RecordingReporter;

    #[test]
    fn test_generate_invokes_cmake_with_redirection() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(temp_dir.path(), &["nm", "dbg", "g"]);
        let mut ops = Operations::new(&ctx, RecordingRunner::default()).with_cmake("cmake");
        let mut reporter = RecordingReporter::default();

        let outcome = ops.perform(Operation::Generate, &mut reporter).unwrap();

        assert_eq!(outcome, Outcome::Succeeded);
        let (spec, redirection) = &ops.runner().calls[0];
        assert_eq!(spec.program.to_str(), Some("cmake"));
        assert!(spec.args.contains(&"Ninja Multi-Config".to_string()));
        assert!(spec.args.contains(&"-DCMAKE_BUILD_TYPE=Debug".to_string()));
        assert_eq!(
            redirection.stdout,
            StreamTarget::File(ctx.std_output_dir().join("generateStdOut.txt"))
        );
        assert!(ctx.std_output_dir().is_dir());
        assert!(reporter.contains(|e| matches!(
            e,
            Event::Elapsed {
                operation: Operation::Generate,
                ..
            }
        )));
        assert!(reporter.contains(|e| *e == Event::Completed(Operation::Generate)));
    }

    #[test]
    fn test_build_failure_is_reported_not_raised() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(temp_dir.path(), &["vs", "rel", "b", "oe"]);
        let mut ops = Operations::new(&ctx, RecordingRunner::with_exit_codes(&[1]))
            .with_cmake("cmake");
        let mut reporter = RecordingReporter::default();

        let outcome = ops.perform(Operation::Build, &mut reporter).unwrap();

        assert_eq!(outcome, Outcome::Failed { exit_code: Some(1) });
        let (spec, redirection) = &ops.runner().calls[0];
        assert_eq!(spec.args[0], "--build");
        assert!(spec.args.contains(&"Release".to_string()));
        assert!(redirection.stdout.is_console());
        assert!(redirection.stderr.is_console());
    }

    #[test]
    fn test_open_without_output_location_spawns_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(temp_dir.path(), &["vs", "dbg", "o"]);
        let mut ops = Operations::new(&ctx, RecordingRunner::default()).with_cmake("cmake");
        let mut reporter = RecordingReporter::default();

        let outcome = ops.perform(Operation::OpenIde, &mut reporter).unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::NothingToOpen));
        assert!(ops.runner().calls.is_empty());
        assert!(reporter.contains(|e| matches!(e, Event::NothingToOpen(_))));
    }

    #[test]
    fn test_open_existing_output_location() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(temp_dir.path(), &["vs", "dbg", "o"]);
        std::fs::create_dir_all(&ctx.output_dir).unwrap();
        let mut ops = Operations::new(&ctx, RecordingRunner::default()).with_cmake("cmake");
        let mut reporter = RecordingReporter::default();

        ops.perform(Operation::OpenIde, &mut reporter).unwrap();

        assert_eq!(ops.runner().calls[0].0.args[0], "--open");
    }

    #[test]
    fn test_dispatch_generate_build_generate_build_order() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(temp_dir.path(), &["default", "dbg", "gbgb"]);
        let mut ops = Operations::new(&ctx, RecordingRunner::default()).with_cmake("cmake");
        let mut reporter = RecordingReporter::default();

        Dispatcher::new(FailurePolicy::Continue).dispatch(
            &ctx.request.operations,
            &mut ops,
            &mut reporter,
        );

        let first_args: Vec<&str> = ops
            .runner()
            .calls
            .iter()
            .map(|(spec, _)| spec.args[0].as_str())
            .collect();
        assert_eq!(first_args, vec!["-S", "--build", "-S", "--build"]);
    }
}
