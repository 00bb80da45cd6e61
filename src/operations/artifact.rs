//! Deploy and run: both start by locating the built executable

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::Operations;
use crate::dispatch::{Outcome, SkipReason};
use crate::exec::{ProcessRunner, ProcessSpec};
use crate::report::{Event, Reporter};
use crate::utils::paths::ensure_dir;
use crate::vocab::Operation;

impl<R: ProcessRunner> Operations<'_, R> {
    /// Existing artifact, or report where it was expected
    fn find_artifact(&self, reporter: &mut dyn Reporter) -> Option<PathBuf> {
        let found = self.ctx.locate_artifact();
        if found.is_none() {
            let expected = self
                .ctx
                .artifact_candidates()
                .into_iter()
                .next()
                .unwrap_or_else(|| self.ctx.output_dir.join(&self.ctx.artifact));
            reporter.report(Event::MissingArtifact(expected));
        }
        found
    }

    pub(super) fn deploy(&mut self, reporter: &mut dyn Reporter) -> Result<Outcome> {
        reporter.report(Event::Started(Operation::Deploy));

        let Some(artifact) = self.find_artifact(reporter) else {
            return Ok(Outcome::Skipped(SkipReason::MissingArtifact));
        };

        let deploy_dir = self.ctx.deploy_dir();
        ensure_dir(&deploy_dir)?;
        let target = deploy_dir.join(&self.ctx.artifact);
        fs::copy(&artifact, &target).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                artifact.display(),
                target.display()
            )
        })?;

        reporter.report(Event::Deployed {
            from: artifact,
            to: target,
        });
        Ok(Outcome::Succeeded)
    }

    pub(super) fn run(&mut self, reporter: &mut dyn Reporter) -> Result<Outcome> {
        reporter.report(Event::Started(Operation::Run));

        let Some(artifact) = self.find_artifact(reporter) else {
            return Ok(Outcome::Skipped(SkipReason::MissingArtifact));
        };

        let spec = ProcessSpec::new(artifact).args(self.ctx.run_args.iter().cloned());
        self.spawn(Operation::Run, &spec, reporter)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::test_support::context;
    use super::*;
    use crate::dispatch::OperationHandler;
    use crate::exec::subprocess::RecordingRunner;
    use crate::report::RecordingReporter;

    fn place_artifact(path: &std::path::Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"binary").unwrap();
    }

    #[test]
    fn test_deploy_without_artifact_does_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(temp_dir.path(), &["vs", "rel", "d"]);
        let mut ops = Operations::new(&ctx, RecordingRunner::default());
        let mut reporter = RecordingReporter::default();

        let outcome = ops.perform(Operation::Deploy, &mut reporter).unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingArtifact));
        assert!(ops.runner().calls.is_empty());
        assert!(!ctx.deploy_location.exists());
        assert!(reporter.contains(|e| matches!(e, Event::MissingArtifact(_))));
    }

    #[test]
    fn test_run_without_artifact_spawns_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(temp_dir.path(), &["vs", "rel", "r"]);
        let mut ops = Operations::new(&ctx, RecordingRunner::default());
        let mut reporter = RecordingReporter::default();

        let outcome = ops.perform(Operation::Run, &mut reporter).unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingArtifact));
        assert!(ops.runner().calls.is_empty());
        assert!(!ctx.output_dir.exists());
    }

    #[test]
    fn test_deploy_copies_multi_config_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(temp_dir.path(), &["nm", "dbg", "d"]);
        let built = ctx.artifact_candidates()[0].clone();
        place_artifact(&built);
        let mut ops = Operations::new(&ctx, RecordingRunner::default());
        let mut reporter = RecordingReporter::default();

        let outcome = ops.perform(Operation::Deploy, &mut reporter).unwrap();

        assert_eq!(outcome, Outcome::Succeeded);
        let deployed = ctx.deploy_dir().join(&ctx.artifact);
        assert_eq!(fs::read(&deployed).unwrap(), b"binary");
        assert!(deployed.starts_with(temp_dir.path().join("deploy").join("dbg")));
    }

    #[test]
    fn test_run_single_config_artifact_with_args() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(temp_dir.path(), &["default", "rel", "r", "o"]);
        ctx.run_args = vec!["--level".to_string(), "3".to_string()];
        let built = ctx.artifact_candidates()[1].clone();
        place_artifact(&built);
        let mut ops = Operations::new(&ctx, RecordingRunner::with_exit_codes(&[4]));
        let mut reporter = RecordingReporter::default();

        let outcome = ops.perform(Operation::Run, &mut reporter).unwrap();

        assert_eq!(outcome, Outcome::Failed { exit_code: Some(4) });
        let (spec, redirection) = &ops.runner().calls[0];
        assert_eq!(spec.program, built);
        assert_eq!(spec.args, vec!["--level", "3"]);
        assert!(redirection.stdout.is_console());
        assert!(!redirection.stderr.is_console());
    }
}
