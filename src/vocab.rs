//! Fixed token vocabularies for the positional arguments
//!
//! Every positional token maps to one of the enums below. The tables are
//! immutable and also drive the help output printed on a usage error.

use std::fmt;

/// Project file generator passed to `cmake -G`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    /// Whatever CMake picks for the host
    Default,
    /// Visual Studio 17 2022
    VisualStudio,
    /// Ninja Multi-Config
    NinjaMulti,
}

impl Generator {
    pub const ALL: [Generator; 3] = [
        Generator::Default,
        Generator::VisualStudio,
        Generator::NinjaMulti,
    ];

    /// Short token used on the command line
    pub fn token(self) -> &'static str {
        match self {
            Generator::Default => "default",
            Generator::VisualStudio => "vs",
            Generator::NinjaMulti => "nm",
        }
    }

    /// CMake generator name, `None` for the host default
    pub fn cmake_name(self) -> Option<&'static str> {
        match self {
            Generator::Default => None,
            Generator::VisualStudio => Some("Visual Studio 17 2022"),
            Generator::NinjaMulti => Some("Ninja Multi-Config"),
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.token() == token)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Build configuration shorthand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Configuration {
    Debug,
    Release,
    RelWithDebInfo,
}

impl Configuration {
    pub const ALL: [Configuration; 3] = [
        Configuration::Debug,
        Configuration::Release,
        Configuration::RelWithDebInfo,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Configuration::Debug => "dbg",
            Configuration::Release => "rel",
            Configuration::RelWithDebInfo => "rwd",
        }
    }

    /// Name understood by `CMAKE_BUILD_TYPE` and `cmake --build --config`
    pub fn cmake_name(self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
            Configuration::RelWithDebInfo => "RelWithDebInfo",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.token() == token)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A single step of the operation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Generate,
    Build,
    Deploy,
    Run,
    Clean,
    OpenIde,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Generate,
        Operation::Build,
        Operation::Deploy,
        Operation::Run,
        Operation::Clean,
        Operation::OpenIde,
    ];

    pub fn letter(self) -> char {
        match self {
            Operation::Generate => 'g',
            Operation::Build => 'b',
            Operation::Deploy => 'd',
            Operation::Run => 'r',
            Operation::Clean => 'c',
            Operation::OpenIde => 'o',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Generate => "generate",
            Operation::Build => "build",
            Operation::Deploy => "deploy",
            Operation::Run => "run",
            Operation::Clean => "clean",
            Operation::OpenIde => "open in ide",
        }
    }

    /// Prefix of the `<stem>StdOut.txt` / `<stem>StdErr.txt` capture files
    pub fn file_stem(self) -> &'static str {
        match self {
            Operation::Generate => "generate",
            Operation::Build => "build",
            Operation::Deploy => "deploy",
            Operation::Run => "run",
            Operation::Clean => "clean",
            Operation::OpenIde => "open",
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.letter() == letter)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where child process stdout / stderr end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// Both streams captured to files
    #[default]
    BothToFile,
    StdoutToConsole,
    StderrToConsole,
    BothToConsole,
}

impl OutputMode {
    /// Accepted tokens in table order. `oe` and `eo` are synonyms.
    pub const TOKENS: [(&'static str, OutputMode); 5] = [
        ("", OutputMode::BothToFile),
        ("o", OutputMode::StdoutToConsole),
        ("e", OutputMode::StderrToConsole),
        ("oe", OutputMode::BothToConsole),
        ("eo", OutputMode::BothToConsole),
    ];

    pub fn label(self) -> &'static str {
        match self {
            OutputMode::BothToFile => "both to file",
            OutputMode::StdoutToConsole => "stdout to console",
            OutputMode::StderrToConsole => "stderr to console",
            OutputMode::BothToConsole => "both to console",
        }
    }

    pub fn stdout_to_console(self) -> bool {
        matches!(self, OutputMode::StdoutToConsole | OutputMode::BothToConsole)
    }

    pub fn stderr_to_console(self) -> bool {
        matches!(self, OutputMode::StderrToConsole | OutputMode::BothToConsole)
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, mode)| *mode)
    }
}

/// Which vocabulary a table describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyKind {
    Generators,
    Configurations,
    Operations,
    OutputModes,
}

/// A printable token → label table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyTable {
    pub kind: VocabularyKind,
    pub title: &'static str,
    pub entries: Vec<(String, String)>,
    pub footnote: Option<&'static str>,
}

impl VocabularyTable {
    pub fn generators() -> Self {
        Self {
            kind: VocabularyKind::Generators,
            title: "Available generators are:",
            entries: Generator::ALL
                .iter()
                .map(|g| {
                    let label = g.cmake_name().map(|n| format!("-G {}", n)).unwrap_or_default();
                    (g.token().to_string(), label)
                })
                .collect(),
            footnote: None,
        }
    }

    pub fn configurations() -> Self {
        Self {
            kind: VocabularyKind::Configurations,
            title: "Available configurations are:",
            entries: Configuration::ALL
                .iter()
                .map(|c| (c.token().to_string(), c.cmake_name().to_string()))
                .collect(),
            footnote: None,
        }
    }

    /// Operation table restricted to the letters a grammar accepts
    pub fn operations(allowed: &[Operation], multi: bool) -> Self {
        Self {
            kind: VocabularyKind::Operations,
            title: "Available build operations are:",
            entries: allowed
                .iter()
                .map(|op| (op.letter().to_string(), op.label().to_string()))
                .collect(),
            footnote: multi.then_some("FYI - concat multiple OK (ie cgbd)"),
        }
    }

    pub fn output_modes() -> Self {
        Self {
            kind: VocabularyKind::OutputModes,
            title: "(optional) Available output modes are:",
            entries: OutputMode::TOKENS
                .iter()
                .map(|(t, mode)| (t.to_string(), mode.label().to_string()))
                .collect(),
            footnote: None,
        }
    }
}

impl fmt::Display for VocabularyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (token, label) in &self.entries {
            writeln!(f, "  {:<10} {}", format!("'{}'", token), label)?;
        }
        if let Some(note) = self.footnote {
            writeln!(f, "{}", note)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip_through_lookup() {
        for g in Generator::ALL {
            assert_eq!(Generator::from_token(g.token()), Some(g));
        }
        for c in Configuration::ALL {
            assert_eq!(Configuration::from_token(c.token()), Some(c));
        }
        for op in Operation::ALL {
            assert_eq!(Operation::from_letter(op.letter()), Some(op));
        }
    }

    #[test]
    fn test_unknown_tokens_are_rejected() {
        assert_eq!(Generator::from_token("make"), None);
        assert_eq!(Generator::from_token("VS"), None);
        assert_eq!(Configuration::from_token("debug"), None);
        assert_eq!(Operation::from_letter('x'), None);
        assert_eq!(OutputMode::from_token("oo"), None);
    }

    #[test]
    fn test_oe_and_eo_are_equivalent() {
        let oe = OutputMode::from_token("oe").unwrap();
        let eo = OutputMode::from_token("eo").unwrap();
        assert_eq!(oe, eo);
        assert!(oe.stdout_to_console());
        assert!(oe.stderr_to_console());
    }

    #[test]
    fn test_empty_output_mode_is_both_to_file() {
        let mode = OutputMode::from_token("").unwrap();
        assert_eq!(mode, OutputMode::default());
        assert!(!mode.stdout_to_console());
        assert!(!mode.stderr_to_console());
    }

    #[test]
    fn test_operations_table_lists_allowed_letters_only() {
        let table = VocabularyTable::operations(
            &[Operation::Generate, Operation::Build],
            false,
        );
        let rendered = table.to_string();
        assert!(rendered.contains("'g'"));
        assert!(rendered.contains("'b'"));
        assert!(!rendered.contains("'r'"));
        assert!(!rendered.contains("concat"));
    }

    #[test]
    fn test_generator_table_shows_cmake_flag() {
        let rendered = VocabularyTable::generators().to_string();
        assert!(rendered.contains("-G Ninja Multi-Config"));
        assert!(rendered.contains("'default'"));
    }
}
