//! cmkop.toml configuration parsing
//!
//! The file is optional. When present it lives at the project root and
//! supplies the artifact name, the deployment location and per-configuration
//! CMake cache variables.
//!
//! ```toml
//! [project]
//! source_dir = "."
//! build_root = "build"
//! artifact = "hello_world"
//! deploy_location = "C:/deploy"
//!
//! [cache_vars]
//! dbg = ["-DENABLE_ASSERTS=ON"]
//!
//! [dispatch]
//! halt_on_failure = false
//! grammar = "multi"
//! jobs = 8
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::{hints, CmkopError};
use crate::request::GrammarKind;
use crate::vocab::Configuration;

/// File name searched for at the project root
pub const MANIFEST_NAME: &str = "cmkop.toml";

/// Root configuration from cmkop.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmkopConfig {
    #[serde(default)]
    pub project: ProjectConfig,

    /// Extra generate flags per configuration token
    #[serde(default)]
    pub cache_vars: CacheVars,

    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// [project] section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    /// Directory holding the top-level CMakeLists.txt, relative to the root
    pub source_dir: Option<PathBuf>,

    /// Parent of every Output Location
    pub build_root: Option<PathBuf>,

    /// Executable produced by the build
    pub artifact: Option<String>,

    /// Where deploy copies the artifact to
    pub deploy_location: Option<PathBuf>,
}

/// [cache_vars] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheVars {
    #[serde(default)]
    pub dbg: Vec<String>,
    #[serde(default)]
    pub rel: Vec<String>,
    #[serde(default)]
    pub rwd: Vec<String>,
}

impl CacheVars {
    pub fn for_configuration(&self, configuration: Configuration) -> &[String] {
        match configuration {
            Configuration::Debug => &self.dbg,
            Configuration::Release => &self.rel,
            Configuration::RelWithDebInfo => &self.rwd,
        }
    }
}

/// [dispatch] section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchConfig {
    /// Stop at the first failed operation
    #[serde(default)]
    pub halt_on_failure: bool,

    #[serde(default)]
    pub grammar: GrammarKind,

    /// Parallel jobs for `cmake --build`
    pub jobs: Option<usize>,
}

impl CmkopConfig {
    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse cmkop.toml")?;
        if config.dispatch.jobs == Some(0) {
            anyhow::bail!("[dispatch] jobs must be at least 1");
        }
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::parse(&content).map_err(|e| {
            CmkopError::config_error_with_hint(
                path,
                format!("{:#}", e),
                Some(e),
                hints::invalid_manifest(),
            )
            .into()
        })
    }

    /// Search `start` and its parents for cmkop.toml
    ///
    /// Returns the directory containing the manifest together with the
    /// parsed file, or `None` when no manifest exists.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>> {
        let mut dir = start;
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let config = Self::load_from_path(&candidate)?;
                return Ok(Some((dir.to_path_buf(), config)));
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => return Ok(None),
            }
        }
    }
}
