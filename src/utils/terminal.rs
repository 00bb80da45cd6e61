//! Terminal output utilities

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::report::{Event, Reporter, Stream};
use crate::vocab::{Operation, VocabularyKind, VocabularyTable};

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}: {}", style("error").red().bold(), message);
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message);
}

/// Create a spinner progress bar
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print vocabulary tables, each in its own color
pub fn print_vocabularies(tables: &[VocabularyTable]) {
    for table in tables {
        let text = table.to_string();
        let styled = match table.kind {
            VocabularyKind::Generators => style(text).green(),
            VocabularyKind::Configurations | VocabularyKind::OutputModes => style(text).yellow(),
            VocabularyKind::Operations => style(text).blue(),
        };
        print!("{}", styled);
    }
}

/// Color a value green below `low`, yellow below `med`, red otherwise
pub fn low_med_high(value: f64, low: f64, med: f64) -> String {
    let text = format!("{:.2}", value);
    if value < low {
        style(text).green().to_string()
    } else if value < med {
        style(text).yellow().to_string()
    } else {
        style(text).red().to_string()
    }
}

/// `12.34 sec (0.21 min)` with the minutes colored by magnitude
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    format!("{:.2} sec ({} min)", secs, low_med_high(secs / 60.0, 1.0, 10.0))
}

fn capitalized(operation: Operation) -> String {
    let label = operation.label();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Colorized console rendering of status events
#[derive(Default)]
pub struct ConsoleReporter {
    verbose: bool,
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            spinner: None,
        }
    }

    fn println(&self, line: String) {
        match &self.spinner {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: Event) {
        let line = match event {
            Event::Started(op) => {
                let text = match op {
                    Operation::Generate => style("Generating...").green(),
                    Operation::Build => style("Building...").blue(),
                    Operation::Deploy => style("Deploying...").cyan(),
                    Operation::Run => style("Running...").cyan(),
                    Operation::Clean => style("Going to clean...").white(),
                    Operation::OpenIde => style("Opening...").yellow(),
                };
                text.to_string()
            }
            Event::StreamToConsole(Stream::Stdout) => {
                style("std out going to console.").green().to_string()
            }
            Event::StreamToConsole(Stream::Stderr) => {
                style("std err going to console.").red().to_string()
            }
            Event::StreamToFile(Stream::Stdout, path) => {
                format!("Sending stdout to {}", path.display())
            }
            Event::StreamToFile(Stream::Stderr, path) => {
                format!("Sending stderr to {}", path.display())
            }
            Event::Spawning(command) => {
                if !self.verbose {
                    return;
                }
                format!("{} {}", style("Running:").dim(), command)
            }
            Event::Elapsed { operation, elapsed } => {
                format!("{} time: {}", capitalized(operation), format_elapsed(elapsed))
            }
            Event::Completed(op) => format!("{} complete...", op.label()),
            Event::MissingArtifact(path) => {
                style(format!("No exe found at {}", path.display()))
                    .yellow()
                    .to_string()
            }
            Event::Deployed { from, to } => {
                format!("Deployed {} -> {}", from.display(), to.display())
            }
            Event::NothingToClean(path) => {
                format!("Nothing to clean...{} does not exist.", path.display())
            }
            Event::NothingToOpen(path) => {
                format!("Nothing to open...{} does not exist.", path.display())
            }
            Event::Cleaning(path) => format!("Cleaning...{}...", path.display()),
            Event::Cleaned(path) => style(format!("Cleaned...{}", path.display()))
                .yellow()
                .to_string(),
            Event::CleanSkipped { path, reason } => {
                format!("Skipped: {} because:\n {}", path.display(), reason)
            }
            Event::ProcessFailed {
                operation,
                exit_code,
            } => {
                let code = exit_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                style(format!("{} failed (exit code: {})", operation.label(), code))
                    .red()
                    .to_string()
            }
            Event::OperationError { operation, message } => {
                style(format!("{} failed: {}", operation.label(), message))
                    .red()
                    .to_string()
            }
            Event::Halted { remaining } => style(format!(
                "Stopping, {} remaining operation(s) skipped",
                remaining
            ))
            .red()
            .bold()
            .to_string(),
        };
        self.println(line);
    }

    fn busy(&mut self, operation: Operation) {
        if self.spinner.is_none() {
            self.spinner = Some(create_spinner(&format!("{}...", capitalized(operation))));
        }
    }

    fn idle(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}
