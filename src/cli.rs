//! CLI argument parsing using clap derive macros
//!
//! Clap handles the flags; the positional tokens are validated by
//! [`Grammar`] so that a bad token prints the matching vocabulary table.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::build::{BuildContext, BuildOptions};
use crate::dispatch::{Dispatcher, FailurePolicy};
use crate::exec::SystemRunner;
use crate::operations::Operations;
use crate::request::{Grammar, GrammarKind};
use crate::utils::paths::{find_project_root_from, load_manifest};
use crate::utils::terminal::{print_error, print_vocabularies, print_warning, ConsoleReporter};

const AFTER_HELP: &str = "\
Generators:      default, vs (Visual Studio 17 2022), nm (Ninja Multi-Config)
Configurations:  dbg (Debug), rel (Release), rwd (RelWithDebInfo)
Operations:      g generate, b build, d deploy, r run, c clean, o open in ide
                 concat multiple OK (ie cgbd), executed left to right
Output modes:    '' both to file (default), o stdout to console,
                 e stderr to console, oe / eo both to console

Example: cmkop nm rel cgbr oe -- --window 800x600";

/// cmkop - one-shot CMake generate/build/deploy/run/clean driver
#[derive(Parser, Debug)]
#[command(name = "cmkop")]
#[command(author, version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// <generator> <config> <ops> [<output-mode>]
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Arguments passed to the executable by the run operation
    #[arg(last = true, value_name = "RUN_ARGS")]
    pub run_args: Vec<String>,

    /// Print each external command before running it
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Stop at the first failed operation and exit with an error
    #[arg(long)]
    pub halt_on_failure: bool,

    /// Accept only `<generator> <config> <op>` with op one of g, b, d, c
    #[arg(long)]
    pub single: bool,

    /// Deployment root; the artifact is copied into <DIR>/<config>
    #[arg(long, value_name = "DIR", env = "CMKOP_DEPLOY_LOCATION")]
    pub deploy_location: Option<PathBuf>,

    /// Number of parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,

    /// Path to cmkop.toml (default: searched upward from the current directory)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let (project_root, config) = match &self.manifest {
            Some(path) => load_manifest(path)?,
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                find_project_root_from(&cwd)?
            }
        };

        let grammar_kind = if self.single {
            GrammarKind::Single
        } else {
            config.dispatch.grammar
        };

        let request = match Grammar::from_kind(grammar_kind).parse(&self.args) {
            Ok(request) => request,
            Err(usage) => {
                print_vocabularies(&usage.vocabularies());
                print_error(&usage.to_string());
                std::process::exit(1);
            }
        };

        let policy = if self.halt_on_failure || config.dispatch.halt_on_failure {
            FailurePolicy::Halt
        } else {
            FailurePolicy::Continue
        };

        let options = BuildOptions {
            deploy_location: self.deploy_location,
            jobs: self.jobs.map(NonZeroUsize::get),
            run_args: self.run_args,
            verbose: self.verbose,
        };
        let ctx = BuildContext::new(project_root, &config, request, options);

        let mut reporter = ConsoleReporter::new(ctx.verbose);
        let mut operations = Operations::new(&ctx, SystemRunner);
        let summary = Dispatcher::new(policy).dispatch(
            &ctx.request.operations,
            &mut operations,
            &mut reporter,
        );

        if summary.halted {
            std::process::exit(1);
        }

        let failures = summary.failures();
        if failures > 0 {
            print_warning(&format!(
                "{} of {} operation(s) failed",
                failures,
                summary.outcomes.len()
            ));
        }

        Ok(())
    }
}
