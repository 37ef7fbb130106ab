//! Parsing of the line-oriented command language

use thiserror::Error;

/// Only this many tokens of a line are looked at
pub const MAX_TOKENS: usize = 5;

/// A command line with the wrong number of arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("error: usage: {usage}")]
pub struct UsageError {
    /// The expected form of the command
    usage: &'static str,
}

/// One parsed command, borrowing its arguments from the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `add first-name last-name handle`
    Add { first: &'a str, last: &'a str, handle: &'a str },
    /// `friend handle1 handle2`
    Friend(&'a str, &'a str),
    /// `unfriend handle1 handle2`
    Unfriend(&'a str, &'a str),
    /// `print handle`
    Print(&'a str),
    /// `size handle`
    Size(&'a str),
    /// `stats`; `surplus` is set when extra arguments were given
    Stats { surplus: bool },
    /// `init`; `surplus` is set when extra arguments were given
    Init { surplus: bool },
    /// `dump`, the table diagnostic
    Dump,
    /// `quit`
    Quit,
    /// Anything else
    Unknown,
}

impl<'a> Command<'a> {
    /// Parses a line split into whitespace-separated tokens.
    ///
    /// Returns `Ok(None)` for a blank line. Command names are matched
    /// case-insensitively; tokens past [`MAX_TOKENS`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns the usage of a command given the wrong number of arguments.
    pub fn parse(line: &'a str) -> Result<Option<Self>, UsageError> {
        let tokens: Vec<&'a str> = line.split_whitespace().take(MAX_TOKENS).collect();
        let Some((name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let name = name.to_ascii_lowercase();
        let command = match (name.as_str(), args) {
            ("add", &[first, last, handle]) => Self::Add { first, last, handle },
            ("add", _) => return Err(usage("add first-name last-name handle")),
            ("friend", &[a, b]) => Self::Friend(a, b),
            ("friend", _) => return Err(usage("friend handle1 handle2")),
            ("unfriend", &[a, b]) => Self::Unfriend(a, b),
            ("unfriend", _) => return Err(usage("unfriend handle1 handle2")),
            ("print", &[handle]) => Self::Print(handle),
            ("print", _) => return Err(usage("print handle")),
            ("size", &[handle]) => Self::Size(handle),
            ("size", _) => return Err(usage("size handle")),
            ("stats", _) => Self::Stats { surplus: !args.is_empty() },
            ("init", _) => Self::Init { surplus: !args.is_empty() },
            ("dump", _) => Self::Dump,
            ("quit", _) => Self::Quit,
            _ => Self::Unknown,
        };
        Ok(Some(command))
    }

    /// The usage error to report before running a command that ignores
    /// its surplus arguments
    #[must_use]
    pub fn surplus_usage(&self) -> Option<UsageError> {
        match self {
            Self::Stats { surplus: true } => Some(usage("stats")),
            Self::Init { surplus: true } => Some(usage("init")),
            _ => None,
        }
    }

    /// The `+ "name" "arg"...` line echoed for interactive input
    #[must_use]
    pub fn echo(&self) -> String {
        let words: Vec<&str> = match *self {
            Self::Add { first, last, handle } => vec!["add", first, last, handle],
            Self::Friend(a, b) => vec!["friend", a, b],
            Self::Unfriend(a, b) => vec!["unfriend", a, b],
            Self::Print(handle) => vec!["print", handle],
            Self::Size(handle) => vec!["size", handle],
            Self::Stats { .. } => vec!["stats"],
            Self::Init { .. } => vec!["init"],
            Self::Dump => vec!["dump"],
            Self::Quit => vec!["quit"],
            Self::Unknown => Vec::new(),
        };
        let quoted: Vec<String> = words.iter().map(|word| format!("\"{word}\"")).collect();
        format!("+ {}", quoted.join(" "))
    }
}

/// Builds the usage error of a command
fn usage(usage: &'static str) -> UsageError {
    UsageError { usage }
}
