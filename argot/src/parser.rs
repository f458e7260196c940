/*!
The parsing state machine. A [`Parser`] drives a [`Scanner`] over the
arguments, resolves each token against a [`Specification`], and writes the
values into the bound variables.
*/

use core::ops::ControlFlow;

use argot_scanner::{Letter, OptionKind, Scanner, Token, TokenKind};
use tracing::{debug, trace};

use crate::{
    outcome::{Missing, OptionName, Outcome, ParseError},
    spec::{OptionSpec, Requirement, Specification},
};

/**
A builtin option, like `--help`. Builtins are matched by long keyword only,
before any option of the specification, and stop parsing immediately with
[`Outcome::Builtin`]. Acting on them (printing help text, for instance) is
up to the caller.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin<'a> {
    pub keyword: &'a str,
    pub description: &'a str,
}

impl Builtin<'static> {
    pub const HELP: Self = Self {
        keyword: "help",
        description: "Print this help text",
    };

    pub const USAGE: Self = Self {
        keyword: "usage",
        description: "Print command usage",
    };

    pub const VERSION: Self = Self {
        keyword: "version",
        description: "Print the app version",
    };
}

/**
A [`Parser`] binds a [`Specification`] to a set of builtins. Each call to
[`parse`][Parser::parse] processes one argument list to completion or to
the first error; afterwards, the parser can be asked which commands were
selected and how many positionals were consumed.
*/
#[derive(Debug)]
pub struct Parser<'p, 'a> {
    spec: &'p mut Specification<'a>,
    builtins: &'p [Builtin<'p>],
    positionals: usize,
    path: Vec<String>,
}

impl<'p, 'a> Parser<'p, 'a> {
    #[inline]
    #[must_use]
    pub fn new(spec: &'p mut Specification<'a>, builtins: &'p [Builtin<'p>]) -> Self {
        Self {
            spec,
            builtins,
            positionals: 0,
            path: Vec::new(),
        }
    }

    /**
    Parse a list of arguments, writing values into the bound variables as
    they're found. The list should not include the program name.

    Parsing is fail-fast: the first error is returned, and variables bound
    to arguments before that point have already been written. A builtin
    also stops parsing, without checking for missing arguments.
    */
    pub fn parse<'arg, I>(&mut self, args: I) -> Result<Outcome, ParseError>
    where
        I: IntoIterator<Item = &'arg str>,
    {
        let mut scanner = Scanner::new(args);
        let mut run = Run {
            builtins: self.builtins,
            terminated: false,
            positionals: 0,
            path: Vec::new(),
        };

        let result = run.level(self.spec, &mut scanner);

        self.positionals = run.positionals;
        self.path = run.path;

        match result {
            Ok(ref outcome) => debug!(?outcome, arguments = scanner.consumed(), "parse finished"),
            Err(ref error) => debug!(%error, arguments = scanner.consumed(), "parse failed"),
        }

        result
    }

    /// The number of positional values assigned during the last parse,
    /// including every value collected by a list. Command names and option
    /// values don't count.
    #[inline]
    #[must_use]
    pub fn positionals_consumed(&self) -> usize {
        self.positionals
    }

    /// The chain of commands selected during the last parse, outermost first
    #[inline]
    #[must_use]
    pub fn command_path(&self) -> &[String] {
        &self.path
    }

    /// The innermost command selected during the last parse
    #[inline]
    #[must_use]
    pub fn active_command(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// The specification of the innermost selected command, or the
    /// top-level specification if no command was selected.
    #[must_use]
    pub fn active(&self) -> &Specification<'a> {
        self.path.iter().fold(&*self.spec, |spec, name| {
            spec.command(name).map_or(spec, |command| command.nested())
        })
    }

    /// The help text of the innermost selected command
    #[must_use]
    pub fn active_help(&self) -> Option<&'a str> {
        let mut spec = &*self.spec;
        let mut help = None;

        for name in &self.path {
            let Some(command) = spec.command(name) else {
                break;
            };

            help = Some(command.help());
            spec = command.nested();
        }

        help
    }

    #[inline]
    #[must_use]
    pub fn builtins(&self) -> &'p [Builtin<'p>] {
        self.builtins
    }
}

/// Parse `args` against `spec` in one go. Equivalent to
/// `Parser::new(spec, builtins).parse(args)`.
pub fn parse<'arg>(
    spec: &mut Specification<'_>,
    builtins: &[Builtin<'_>],
    args: impl IntoIterator<Item = &'arg str>,
) -> Result<Outcome, ParseError> {
    Parser::new(spec, builtins).parse(args)
}

/// State for a single call to [`Parser::parse`]
struct Run<'b> {
    builtins: &'b [Builtin<'b>],

    /// Set once `--` is seen; everything after it is positional
    terminated: bool,
    positionals: usize,
    path: Vec<String>,
}

impl Run<'_> {
    /// Parse the remaining arguments against one level of the specification.
    /// Selecting a command hands the rest of the arguments to the command's
    /// nested specification.
    fn level<'arg, I>(
        &mut self,
        spec: &mut Specification<'_>,
        scanner: &mut Scanner<'arg, I>,
    ) -> Result<Outcome, ParseError>
    where
        I: Iterator<Item = &'arg str>,
    {
        let mut cursor = 0;

        while let Some(token) = scanner.next() {
            trace!(raw = token.raw(), kind = ?token.kind(), "token");

            let kind = if self.terminated {
                TokenKind::Positional
            } else {
                token.kind()
            };

            match kind {
                TokenKind::Terminator => self.terminated = true,
                TokenKind::Positional if spec.has_commands() => {
                    let name = token.raw();
                    let command = spec
                        .command_mut(name)
                        .ok_or_else(|| ParseError::InvalidCommand(name.to_owned()))?;

                    debug!(command = name, "command selected");
                    self.path.push(name.to_owned());
                    return self.level(command.nested_mut(), scanner);
                }
                TokenKind::Positional => self.positional(spec, &mut cursor, token.raw())?,
                TokenKind::Option => {
                    if let ControlFlow::Break(outcome) = self.option(spec, token, scanner)? {
                        return Ok(outcome);
                    }
                }
            }
        }

        self.finish(spec, cursor)
    }

    fn positional(
        &mut self,
        spec: &mut Specification<'_>,
        cursor: &mut usize,
        text: &str,
    ) -> Result<(), ParseError> {
        let positional = match spec.positional_mut(*cursor) {
            None => return Err(ParseError::ExtraneousArgument(text.to_owned())),
            Some(positional) if positional.requirement() == Requirement::List => positional,
            Some(positional) => {
                *cursor += 1;
                positional
            }
        };

        let name = positional.name();
        trace!(positional = name, value = text, "assigning");

        positional
            .binding_mut()
            .assign(text)
            .map_err(|_| ParseError::InvalidValue {
                name: name.to_owned(),
                value: text.to_owned(),
            })?;

        self.positionals += 1;
        Ok(())
    }

    fn option<'arg, I>(
        &mut self,
        spec: &mut Specification<'_>,
        token: Token<'arg>,
        scanner: &mut Scanner<'arg, I>,
    ) -> Result<ControlFlow<Outcome>, ParseError>
    where
        I: Iterator<Item = &'arg str>,
    {
        match token.option_kind() {
            Some(OptionKind::Word) => {
                let key = token.key();

                if self.builtins.iter().any(|builtin| builtin.keyword == key) {
                    debug!(builtin = key, "builtin requested");
                    return Ok(ControlFlow::Break(Outcome::Builtin(key.to_owned())));
                }

                let option = spec
                    .long_mut(key)
                    .ok_or_else(|| ParseError::InvalidOption(OptionName::Long(key.to_owned())))?;

                let value = resolve(option, token.value(), scanner, || {
                    OptionName::Long(key.to_owned())
                })?;

                assign(option, value)?;
            }
            Some(OptionKind::Letters) | None => {
                // `-=value` has an empty cluster; the `=` is the offending letter
                if token.key().is_empty() {
                    return Err(ParseError::InvalidOption(OptionName::Short('=')));
                }

                for Letter { letter, is_last } in token.letters() {
                    let option = spec
                        .short_mut(letter)
                        .ok_or(ParseError::InvalidOption(OptionName::Short(letter)))?;

                    let value = if is_last {
                        resolve(option, token.value(), scanner, || OptionName::Short(letter))?
                    } else if option.is_flag() {
                        ""
                    } else {
                        return Err(ParseError::MissingArgument(Missing::Value {
                            option: OptionName::Short(letter),
                            name: option.name().to_owned(),
                        }));
                    };

                    assign(option, value)?;
                }
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Check that everything required at this level was given.
    fn finish(&self, spec: &Specification<'_>, cursor: usize) -> Result<Outcome, ParseError> {
        if spec.has_commands() {
            return Err(ParseError::MissingArgument(Missing::Command));
        }

        if let Some(positional) = spec
            .positionals()
            .skip(cursor)
            .find(|positional| positional.requirement() == Requirement::Required)
        {
            return Err(ParseError::MissingArgument(Missing::Positional(
                positional.name().to_owned(),
            )));
        }

        Ok(match self.path.last() {
            Some(command) => Outcome::Command(command.clone()),
            None => Outcome::Complete,
        })
    }
}

/**
Find the value for an option. A flag uses its attached `=value`, or an empty
value if there isn't one. Any other option uses a non-empty attached value;
failing that, it takes the next argument, but only if that argument is a
positional. `--name=` is the same as `--name`.
*/
fn resolve<'arg, I>(
    option: &OptionSpec<'_>,
    attached: Option<&'arg str>,
    scanner: &mut Scanner<'arg, I>,
    spelled: impl FnOnce() -> OptionName,
) -> Result<&'arg str, ParseError>
where
    I: Iterator<Item = &'arg str>,
{
    match attached {
        Some(value) if option.is_flag() || !value.is_empty() => Ok(value),
        _ if option.is_flag() => Ok(""),
        _ => {
            if scanner.peek_kind() == Some(TokenKind::Positional)
                && let Some(token) = scanner.next()
            {
                return Ok(token.raw());
            }

            Err(ParseError::MissingArgument(Missing::Value {
                option: spelled(),
                name: option.name().to_owned(),
            }))
        }
    }
}

fn assign(option: &mut OptionSpec<'_>, value: &str) -> Result<(), ParseError> {
    let name = option.name();
    trace!(option = name, value, "assigning");

    option
        .binding_mut()
        .assign(value)
        .map_err(|_| ParseError::InvalidValue {
            name: name.to_owned(),
            value: value.to_owned(),
        })
}
