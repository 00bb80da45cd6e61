//! cmkop - one-shot CMake driver
//!
//! Validates a short positional command line and runs a sequence of
//! generate / build / deploy / run / clean / open-in-IDE operations against a
//! per-(generator, configuration) build directory.
//!
//! ## Architecture
//!
//! ```text
//! cli → request (grammar) → dispatch → operations → exec (cmake, artifact)
//!                                          ↓
//!                                   report → utils::terminal
//! ```

mod build;
mod cli;
mod config;
mod dispatch;
mod error;
mod exec;
mod operations;
mod report;
mod request;
mod utils;
mod vocab;

use clap::Parser;

use cli::Cli;
use error::CmkopError;
use utils::terminal::print_error;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        match err.downcast_ref::<CmkopError>() {
            Some(cmkop_err) => cmkop_err.display_with_hints(),
            None => print_error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}
