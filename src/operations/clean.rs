//! Clean: remove the Output Location tree

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use super::Operations;
use crate::dispatch::{Outcome, SkipReason};
use crate::exec::ProcessRunner;
use crate::report::{Event, Reporter};
use crate::vocab::Operation;

/// Add the owner write bit
fn make_writable(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.file_type().is_symlink() {
        return Ok(());
    }
    let mut perms = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = perms.mode();
        if mode & 0o200 != 0 {
            return Ok(());
        }
        perms.set_mode(mode | 0o200);
    }
    #[cfg(not(unix))]
    {
        if !perms.readonly() {
            return Ok(());
        }
        perms.set_readonly(false);
    }

    fs::set_permissions(path, perms)
}

/// Entry-by-entry removal after clearing read-only bits. Entries that still
/// refuse to go are reported and skipped.
fn remove_tree_forcefully(root: &Path, reporter: &mut dyn Reporter) {
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let _ = make_writable(entry.path());
    }

    for entry in WalkDir::new(root).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                reporter.report(Event::CleanSkipped {
                    path,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let result = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };

        if let Err(err) = result {
            reporter.report(Event::CleanSkipped {
                path: entry.path().to_path_buf(),
                reason: err.to_string(),
            });
        }
    }
}

impl<R: ProcessRunner> Operations<'_, R> {
    pub(super) fn clean(&mut self, reporter: &mut dyn Reporter) -> Result<Outcome> {
        let output_dir = &self.ctx.output_dir;
        reporter.report(Event::Started(Operation::Clean));
        reporter.report(Event::Cleaning(output_dir.clone()));

        if !output_dir.exists() {
            reporter.report(Event::NothingToClean(output_dir.clone()));
            return Ok(Outcome::Skipped(SkipReason::NothingToClean));
        }

        if fs::remove_dir_all(output_dir).is_err() {
            remove_tree_forcefully(output_dir, reporter);
        }

        if !output_dir.exists() {
            reporter.report(Event::Cleaned(output_dir.clone()));
        }
        Ok(Outcome::Succeeded)
    }
}
