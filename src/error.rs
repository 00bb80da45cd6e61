//! Error types and helpers for user-friendly error messages
//!
//! Usage errors carry the vocabulary tables the user needs to fix the
//! command line; the rest carry an actionable hint.

use std::path::PathBuf;

use thiserror::Error;

use crate::vocab::VocabularyTable;

/// Rejected command line. Nothing has run when one of these is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Enter {expected} args, got {got}.")]
    ArgCount {
        expected: &'static str,
        got: usize,
        help: Vec<VocabularyTable>,
    },

    #[error("Error - Bad generator arg '{token}'")]
    Generator { token: String },

    #[error("Error - Bad config arg '{token}'")]
    Configuration { token: String },

    #[error("Error - Bad build operation arg '{token}'")]
    Operation {
        token: String,
        help: VocabularyTable,
    },

    #[error("Error - Bad output mode arg '{token}'")]
    OutputMode { token: String },
}

impl UsageError {
    /// Tables to print so the user can self-correct
    pub fn vocabularies(&self) -> Vec<VocabularyTable> {
        match self {
            UsageError::ArgCount { help, .. } => help.clone(),
            UsageError::Generator { .. } => vec![VocabularyTable::generators()],
            UsageError::Configuration { .. } => vec![VocabularyTable::configurations()],
            UsageError::Operation { help, .. } => vec![help.clone()],
            UsageError::OutputMode { .. } => vec![VocabularyTable::output_modes()],
        }
    }
}

/// Application errors with helpful context and suggestions
#[derive(Error, Debug)]
pub enum CmkopError {
    /// Project configuration file errors
    #[error("Configuration error in {}: {message}", path.display())]
    Config {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Tool/executable not found
    #[error("Missing tool: {tool} (required for {required_for})\n{hint}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },
}

impl CmkopError {
    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            CmkopError::Config { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            CmkopError::MissingTool { .. } => {}
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for missing CMake
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake\n\
         • Windows: winget install Kitware.CMake"
    }

    /// Get hint for an invalid cmkop.toml
    pub fn invalid_manifest() -> &'static str {
        "cmkop.toml is invalid. Common issues:\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • [cache_vars] keys must be configuration tokens (dbg, rel, rwd)\n\
         • [dispatch] grammar must be \"multi\" or \"single\""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::VocabularyKind;

    #[test]
    fn test_arg_count_prints_every_table() {
        let err = crate::request::Grammar::multi()
            .parse(&["vs"])
            .unwrap_err();
        let kinds: Vec<_> = err.vocabularies().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                VocabularyKind::Generators,
                VocabularyKind::Configurations,
                VocabularyKind::Operations,
                VocabularyKind::OutputModes,
            ]
        );
    }

    #[test]
    fn test_token_errors_print_only_their_table() {
        let err = UsageError::Configuration {
            token: "debug".to_string(),
        };
        let tables = err.vocabularies();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].kind, VocabularyKind::Configurations);
        assert!(err.to_string().contains("Bad config arg"));
    }
}
