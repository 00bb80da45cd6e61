//! Positional argument grammar and the validated invocation request

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::UsageError;
use crate::vocab::{Configuration, Generator, Operation, OutputMode, VocabularyTable};

/// Name of the redirected-output directory inside the Output Location
pub const STD_OUTPUT_DIR: &str = "stdOutput";

/// Which positional grammar is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarKind {
    /// `<generator> <config> <ops> [<output-mode>]`
    #[default]
    Multi,
    /// `<generator> <config> <op>`
    Single,
}

/// Shape of the accepted command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub operations: Vec<Operation>,
    pub multi_operation: bool,
    pub output_mode: bool,
}

impl Grammar {
    pub fn multi() -> Self {
        Self {
            operations: Operation::ALL.to_vec(),
            multi_operation: true,
            output_mode: true,
        }
    }

    pub fn single() -> Self {
        Self {
            operations: vec![
                Operation::Generate,
                Operation::Build,
                Operation::Deploy,
                Operation::Clean,
            ],
            multi_operation: false,
            output_mode: false,
        }
    }

    pub fn from_kind(kind: GrammarKind) -> Self {
        match kind {
            GrammarKind::Multi => Self::multi(),
            GrammarKind::Single => Self::single(),
        }
    }

    fn arg_count_text(&self) -> &'static str {
        if self.output_mode {
            "either 3 or 4"
        } else {
            "exactly 3"
        }
    }

    fn operation_help(&self) -> VocabularyTable {
        VocabularyTable::operations(&self.operations, self.multi_operation)
    }

    fn full_help(&self) -> Vec<VocabularyTable> {
        let mut tables = vec![
            VocabularyTable::generators(),
            VocabularyTable::configurations(),
            self.operation_help(),
        ];
        if self.output_mode {
            tables.push(VocabularyTable::output_modes());
        }
        tables
    }

    fn parse_operations(&self, token: &str) -> Result<Vec<Operation>, UsageError> {
        let bad = || UsageError::Operation {
            token: token.to_string(),
            help: self.operation_help(),
        };

        if token.is_empty() || (!self.multi_operation && token.chars().count() != 1) {
            return Err(bad());
        }

        token
            .chars()
            .map(|c| {
                Operation::from_letter(c)
                    .filter(|op| self.operations.contains(op))
                    .ok_or_else(bad)
            })
            .collect()
    }

    /// Validate positional tokens. Fails on the first bad token; nothing runs
    /// unless every token is accepted.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<InvocationRequest, UsageError> {
        let max = if self.output_mode { 4 } else { 3 };
        if args.len() < 3 || args.len() > max {
            return Err(UsageError::ArgCount {
                expected: self.arg_count_text(),
                got: args.len(),
                help: self.full_help(),
            });
        }

        let gen_token = args[0].as_ref();
        let generator = Generator::from_token(gen_token).ok_or_else(|| UsageError::Generator {
            token: gen_token.to_string(),
        })?;

        let cfg_token = args[1].as_ref();
        let configuration =
            Configuration::from_token(cfg_token).ok_or_else(|| UsageError::Configuration {
                token: cfg_token.to_string(),
            })?;

        let operations = self.parse_operations(args[2].as_ref())?;

        let output_mode = match args.get(3) {
            Some(token) => {
                let token = token.as_ref();
                OutputMode::from_token(token).ok_or_else(|| UsageError::OutputMode {
                    token: token.to_string(),
                })?
            }
            None => OutputMode::default(),
        };

        Ok(InvocationRequest {
            generator,
            configuration,
            operations,
            output_mode,
        })
    }
}

/// Fully validated command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub generator: Generator,
    pub configuration: Configuration,
    /// Executed in order, repeats included
    pub operations: Vec<Operation>,
    pub output_mode: OutputMode,
}

impl InvocationRequest {
    /// `<build_root>/<generator>_<configuration>`
    pub fn output_location(&self, build_root: &Path) -> PathBuf {
        build_root.join(format!(
            "{}_{}",
            self.generator.token(),
            self.configuration.token()
        ))
    }
}
