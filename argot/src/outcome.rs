/*!
What a parse produced: either an [`Outcome`] telling the caller what to do
next, or the first [`ParseError`] that was found.
*/

use core::fmt::{self, Display};

use lazy_format::lazy_format;

/// A successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every argument was consumed and bound; there are no commands in play.
    Complete,

    /// Every argument was consumed and bound, and this command was selected.
    /// Nested commands report the innermost one; the full chain is available
    /// from [`Parser::command_path`][crate::Parser::command_path].
    Command(String),

    /// A builtin option like `--help` was found. Parsing stopped there, and
    /// the remaining arguments were not examined.
    Builtin(String),
}

impl Outcome {
    /// The selected command, if any
    #[inline]
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        match self {
            Outcome::Command(command) => Some(command),
            _ => None,
        }
    }

    /// The requested builtin keyword, if any
    #[inline]
    #[must_use]
    pub fn builtin(&self) -> Option<&str> {
        match self {
            Outcome::Builtin(keyword) => Some(keyword),
            _ => None,
        }
    }
}

/// An option, as it was spelled on the command line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionName {
    Short(char),
    Long(String),
}

impl Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionName::Short(short) => write!(f, "-{short}"),
            OptionName::Long(long) => write!(f, "--{long}"),
        }
    }
}

/// The thing that was missing in a [`ParseError::MissingArgument`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Missing {
    /// An option that needs a value didn't get one
    Value { option: OptionName, name: String },

    /// A required positional wasn't given
    Positional(String),

    /// The specification has commands, but none was given
    Command,
}

impl Missing {
    /// The display name of the thing that was missing: the option's or
    /// positional's name, or `command`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Missing::Value { name, .. } | Missing::Positional(name) => name,
            Missing::Command => "command",
        }
    }
}

impl Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Value {
                option: OptionName::Short(short),
                ..
            } => write!(f, "option requires an argument -- '{short}'"),
            Missing::Value { option, .. } => write!(f, "option '{option}' requires an argument"),
            Missing::Positional(name) => write!(f, "missing {name}"),
            Missing::Command => f.write_str("missing command"),
        }
    }
}

fn invalid_option(option: &OptionName) -> impl Display + '_ {
    lazy_format!(match (option) {
        OptionName::Short(short) => "invalid option -- '{short}'",
        OptionName::Long(long) => "unrecognized option '--{long}'",
    })
}

/**
Everything that can go wrong while parsing. Parsing stops at the first error.

The [`Display`] implementation is the one-line diagnostic, without any
program name prefix; see
[`printers::write_parse_error`][crate::printers::write_parse_error] for the
full rendering.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A positional argument was given where a command name was expected,
    /// and it didn't name a command.
    #[error("unrecognized command '{0}'")]
    InvalidCommand(String),

    /// An option that isn't in the specification.
    #[error("{}", invalid_option(.0))]
    InvalidOption(OptionName),

    /// An option or positional refused its value.
    #[error("invalid {name}: '{value}'")]
    InvalidValue { name: String, value: String },

    #[error("{0}")]
    MissingArgument(Missing),

    /// A positional argument was given after all the declared positionals
    /// were filled.
    #[error("extraneous argument '{0}'")]
    ExtraneousArgument(String),
}

impl ParseError {
    /// Whether a diagnostic for this error should suggest `--help`. An
    /// invalid value is specific enough on its own.
    #[inline]
    #[must_use]
    pub fn suggests_help(&self) -> bool {
        !matches!(self, ParseError::InvalidValue { .. })
    }
}
