//! CMake command lines
//!
//! This module builds the `cmake` invocations for the configure, build and
//! open steps. Running them is left to an [`ProcessRunner`](crate::exec::ProcessRunner).

use std::path::PathBuf;

use crate::exec::ProcessSpec;
use crate::vocab::{Configuration, Generator};

/// CMake configuration builder
#[derive(Debug, Clone)]
pub struct CMakeConfig {
    /// CMake executable
    cmake: PathBuf,
    /// Source directory (where CMakeLists.txt is located)
    source_dir: PathBuf,
    /// Build directory
    build_dir: PathBuf,
    /// Build type
    configuration: Configuration,
    /// Generator flag, `None` for the host default
    generator: Generator,
    /// Extra cache variables, passed through verbatim
    cache_vars: Vec<String>,
    /// Number of parallel jobs
    jobs: Option<usize>,
    /// Verbose build output
    verbose: bool,
}

impl CMakeConfig {
    /// Create a new CMake configuration
    pub fn new(cmake: PathBuf, source_dir: PathBuf, build_dir: PathBuf) -> Self {
        Self {
            cmake,
            source_dir,
            build_dir,
            configuration: Configuration::Release,
            generator: Generator::Default,
            cache_vars: Vec::new(),
            jobs: None,
            verbose: false,
        }
    }

    /// Set the build type
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Set the generator
    pub fn generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    /// Add pass-through cache variables such as `-DFOO=ON`
    pub fn cache_vars(mut self, vars: &[String]) -> Self {
        self.cache_vars.extend(vars.iter().cloned());
        self
    }

    /// Set number of parallel jobs
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// `cmake -S <src> -B <build> [-G <gen>] -DCMAKE_BUILD_TYPE=<cfg> <vars>`
    pub fn configure(&self) -> ProcessSpec {
        let mut spec = ProcessSpec::new(&self.cmake)
            .arg("-S")
            .arg(self.source_dir.display().to_string())
            .arg("-B")
            .arg(self.build_dir.display().to_string());

        if let Some(name) = self.generator.cmake_name() {
            spec = spec.arg("-G").arg(name);
        }

        // Single-config generators ignore --config at build time
        spec = spec.arg(format!(
            "-DCMAKE_BUILD_TYPE={}",
            self.configuration.cmake_name()
        ));

        spec.args(self.cache_vars.iter().cloned())
    }

    /// `cmake --build <build> --config <cfg> [-j N] [--verbose]`
    pub fn build(&self) -> ProcessSpec {
        let mut spec = ProcessSpec::new(&self.cmake)
            .arg("--build")
            .arg(self.build_dir.display().to_string())
            .arg("--config")
            .arg(self.configuration.cmake_name());

        if let Some(jobs) = self.jobs {
            spec = spec.arg("-j").arg(jobs.to_string());
        }

        if self.verbose {
            spec = spec.arg("--verbose");
        }

        spec
    }

    /// `cmake --open <build>`
    pub fn open(&self) -> ProcessSpec {
        ProcessSpec::new(&self.cmake)
            .arg("--open")
            .arg(self.build_dir.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CMakeConfig {
        CMakeConfig::new(
            PathBuf::from("cmake"),
            PathBuf::from("."),
            PathBuf::from("build/nm_dbg"),
        )
    }

    #[test]
    fn test_configure_with_generator_and_vars() {
        let spec = config()
            .generator(Generator::NinjaMulti)
            .configuration(Configuration::Debug)
            .cache_vars(&["-DENABLE_ASSERTS=ON".to_string()])
            .configure();
        assert_eq!(
            spec.args,
            vec![
                "-S",
                ".",
                "-B",
                "build/nm_dbg",
                "-G",
                "Ninja Multi-Config",
                "-DCMAKE_BUILD_TYPE=Debug",
                "-DENABLE_ASSERTS=ON",
            ]
        );
    }

    #[test]
    fn test_default_generator_omits_flag() {
        let spec = config().configure();
        assert!(!spec.args.iter().any(|a| a == "-G"));
        assert!(spec.args.contains(&"-DCMAKE_BUILD_TYPE=Release".to_string()));
    }

    #[test]
    fn test_build_args() {
        let spec = config()
            .configuration(Configuration::RelWithDebInfo)
            .jobs(Some(8))
            .build();
        assert_eq!(
            spec.args,
            vec!["--build", "build/nm_dbg", "--config", "RelWithDebInfo", "-j", "8"]
        );
    }

    #[test]
    fn test_open_args() {
        assert_eq!(config().open().args, vec!["--open", "build/nm_dbg"]);
    }
}
