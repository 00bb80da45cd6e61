//! Build context shared by every operation
//!
//! ## Modules
//!
//! - `cmake` - CMake command lines for configure, build and open

pub mod cmake;

use std::path::{Path, PathBuf};

use crate::config::CmkopConfig;
use crate::request::{InvocationRequest, STD_OUTPUT_DIR};

/// Default parent of every Output Location
pub const DEFAULT_BUILD_ROOT: &str = "build";

/// Default deployment root, relative to the project root
pub const DEFAULT_DEPLOY_DIR: &str = "deploy";

/// Settings given on the command line, taking precedence over cmkop.toml
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub deploy_location: Option<PathBuf>,
    pub jobs: Option<usize>,
    /// Arguments forwarded to the executable by the run operation
    pub run_args: Vec<String>,
    pub verbose: bool,
}

/// Everything an operation needs to know about this invocation
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Validated command line
    pub request: InvocationRequest,
    /// `cmake -S` directory
    pub source_dir: PathBuf,
    /// Output Location: `<root>/<build_root>/<generator>_<config>`
    pub output_dir: PathBuf,
    /// Executable file name, platform suffix included
    pub artifact: String,
    /// Deployment root; deploy copies into `<deploy_location>/<config>`
    pub deploy_location: PathBuf,
    /// Extra generate flags for the selected configuration
    pub cache_vars: Vec<String>,
    pub jobs: Option<usize>,
    pub run_args: Vec<String>,
    pub verbose: bool,
}

impl BuildContext {
    /// Resolve paths and settings: CLI > cmkop.toml > defaults
    pub fn new(
        project_root: PathBuf,
        config: &CmkopConfig,
        request: InvocationRequest,
        options: BuildOptions,
    ) -> Self {
        let project = &config.project;

        let source_dir = project_root.join(project.source_dir.as_deref().unwrap_or(Path::new(".")));
        let build_root = project
            .build_root
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_BUILD_ROOT));
        let output_dir = project_root.join(request.output_location(build_root));

        let artifact_name = project
            .artifact
            .clone()
            .unwrap_or_else(|| default_artifact_name(&project_root));
        let artifact = with_exe_suffix(&artifact_name);

        let deploy_location = options
            .deploy_location
            .or_else(|| project.deploy_location.clone())
            .map(|p| project_root.join(p))
            .unwrap_or_else(|| project_root.join(DEFAULT_DEPLOY_DIR));

        let cache_vars = config
            .cache_vars
            .for_configuration(request.configuration)
            .to_vec();

        Self {
            source_dir,
            output_dir,
            artifact,
            deploy_location,
            cache_vars,
            jobs: options.jobs.or(config.dispatch.jobs),
            run_args: options.run_args,
            verbose: options.verbose,
            request,
        }
    }

    /// Directory receiving redirected child output
    pub fn std_output_dir(&self) -> PathBuf {
        self.output_dir.join(STD_OUTPUT_DIR)
    }

    /// Places the built executable may live, most specific first:
    /// `<output>/<Config>/<artifact>` for multi-config generators, then
    /// `<output>/<artifact>` for single-config ones
    pub fn artifact_candidates(&self) -> Vec<PathBuf> {
        vec![
            self.output_dir
                .join(self.request.configuration.cmake_name())
                .join(&self.artifact),
            self.output_dir.join(&self.artifact),
        ]
    }

    /// First existing artifact candidate
    pub fn locate_artifact(&self) -> Option<PathBuf> {
        self.artifact_candidates().into_iter().find(|p| p.is_file())
    }

    /// `<deploy_location>/<config token>`
    pub fn deploy_dir(&self) -> PathBuf {
        self.deploy_location
            .join(self.request.configuration.token())
    }
}

fn default_artifact_name(project_root: &Path) -> String {
    project_root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "app".to_string())
}

fn with_exe_suffix(name: &str) -> String {
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() || name.ends_with(suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}
