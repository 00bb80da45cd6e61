//! Path utilities for cmkop

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::CmkopConfig;

/// Find the project root and its configuration
///
/// The root is the nearest directory at or above `start` containing
/// cmkop.toml; without one, `start` itself with default settings.
pub fn find_project_root_from(start: &Path) -> Result<(PathBuf, CmkopConfig)> {
    match CmkopConfig::discover(start)? {
        Some(found) => Ok(found),
        None => Ok((start.to_path_buf(), CmkopConfig::default())),
    }
}

/// Load an explicit manifest; its directory is the project root
///
/// The root is canonicalized so a bare `cmkop.toml` still yields a
/// directory with a name.
pub fn load_manifest(path: &Path) -> Result<(PathBuf, CmkopConfig)> {
    let config = CmkopConfig::load_from_path(path)?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let root = parent
        .canonicalize()
        .with_context(|| format!("Failed to resolve project root: {}", parent.display()))?;
    Ok((root, config))
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_defaults_to_start() {
        let temp_dir = TempDir::new().unwrap();
        let (root, config) = find_project_root_from(temp_dir.path()).unwrap();
        assert_eq!(root, temp_dir.path());
        assert!(config.project.artifact.is_none());
    }

    #[test]
    fn test_load_manifest_uses_parent_as_root() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("custom.toml");
        std::fs::write(&manifest, "[project]\nartifact = \"x\"\n").unwrap();

        let (root, config) = load_manifest(&manifest).unwrap();
        assert_eq!(root, temp_dir.path().canonicalize().unwrap());
        assert_eq!(config.project.artifact.as_deref(), Some("x"));
    }

    #[test]
    #[serial_test::serial]
    fn test_bare_manifest_name_keeps_directory_name() {
        use crate::build::{BuildContext, BuildOptions};
        use crate::request::Grammar;

        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("hello_world");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("cmkop.toml"), "[dispatch]\njobs = 2\n").unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(&project).unwrap();
        let loaded = load_manifest(Path::new("cmkop.toml"));
        std::env::set_current_dir(previous).unwrap();

        let (root, config) = loaded.unwrap();
        assert!(root.is_absolute());
        assert_eq!(root.file_name().unwrap(), "hello_world");

        let request = Grammar::multi().parse(&["vs", "rel", "d"]).unwrap();
        let ctx = BuildContext::new(root, &config, request, BuildOptions::default());
        assert!(ctx.artifact.starts_with("hello_world"));
        assert!(ctx.output_dir.ends_with("hello_world/build/vs_rel"));
    }

    #[test]
    fn test_ensure_dir_nested() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
