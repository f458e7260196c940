/*!
A small facade that owns the ceremony around one parse: working out the
program name, acting on builtins like `--help`, printing diagnostics, and
telling the caller whether to run the command body or exit.
*/

use std::{
    env,
    ffi::OsStr,
    io::{self, Write as _},
    path::Path,
    process::ExitCode,
};

use tracing::debug;

use crate::{
    parser::{Builtin, Parser},
    printers,
    spec::Specification,
};

/// Metadata about the application, used in help and version output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppInfo<'a> {
    /// Printed at the top of the top-level help text
    pub description: &'a str,

    /// Printed by `--version`
    pub version: &'a str,

    /// Printed at the bottom of the help text
    pub epilogue: &'a str,
}

/// How the process should end, when it ends without running a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A builtin was handled
    Success,

    /// The arguments couldn't be parsed. Reported with exit status 2, so that
    /// it's distinct from a command that ran and failed.
    ParseError,
}

impl Status {
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::ParseError => 2,
        }
    }

    #[inline]
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// What the caller should do after [`App::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Parsing succeeded; run the program, or the given command.
    Execute { command: Option<String> },

    /// A builtin that the app doesn't know how to handle was requested. The
    /// caller is responsible for acting on it.
    Builtin(String),

    /// Everything is already done; exit with this status.
    Exit(Status),
}

impl Dispatch {
    /// The exit code for this dispatch, assuming any command it names ran
    /// successfully.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match *self {
            Dispatch::Exit(status) => status.exit_code(),
            Dispatch::Execute { .. } | Dispatch::Builtin(_) => ExitCode::SUCCESS,
        }
    }
}

/// The builtins an [`App`] has by default
pub const DEFAULT_BUILTINS: &[Builtin<'static>] =
    &[Builtin::HELP, Builtin::USAGE, Builtin::VERSION];

/// Used as the program name when the argument list is empty
const UNKNOWN_EXE: &str = "<app>";

/**
Runs one parse of a full argument list, including the program name, and
renders whatever the user should see.

- `--help`, `--usage` and `--version` print to `stdout` and end in
  [`Status::Success`]. Help and usage describe the innermost command that
  was selected before the builtin.
- If the specification has commands and there are no arguments past the
  program name, the top-level help is printed, also ending in
  [`Status::Success`].
- Parse errors print a diagnostic to `stderr` and end in
  [`Status::ParseError`]. The diagnostic suggests `--help` only if `help`
  is one of the builtins.
*/
#[derive(Debug, Clone)]
pub struct App<'a> {
    info: AppInfo<'a>,
    builtins: &'a [Builtin<'a>],
    usage_on_error: bool,
}

impl<'a> App<'a> {
    #[inline]
    #[must_use]
    pub fn new(info: AppInfo<'a>) -> Self {
        Self {
            info,
            builtins: DEFAULT_BUILTINS,
            usage_on_error: false,
        }
    }

    /// Replace the default builtins.
    #[inline]
    #[must_use]
    pub fn with_builtins(self, builtins: &'a [Builtin<'a>]) -> Self {
        Self { builtins, ..self }
    }

    /// Also print the usage line to `stderr` after a parse error.
    #[inline]
    #[must_use]
    pub fn with_usage_on_error(self, usage_on_error: bool) -> Self {
        Self {
            usage_on_error,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn info(&self) -> &AppInfo<'a> {
        &self.info
    }

    #[inline]
    #[must_use]
    pub fn builtins(&self) -> &'a [Builtin<'a>] {
        self.builtins
    }

    /// Parse `argv`, whose first element is the program name.
    pub fn run<'arg>(
        &self,
        spec: &mut Specification<'_>,
        argv: impl IntoIterator<Item = &'arg str>,
        stdout: &mut impl io::Write,
        stderr: &mut impl io::Write,
    ) -> io::Result<Dispatch> {
        let mut argv = argv.into_iter().peekable();
        let exe = argv.next().map_or(UNKNOWN_EXE, exe_name);

        if spec.has_commands() && argv.peek().is_none() {
            debug!("no arguments, printing help");
            printers::print_help(
                stdout,
                exe,
                &[],
                self.info.description,
                spec,
                self.builtins,
                self.info.epilogue,
            )?;
            stdout.flush()?;

            return Ok(Dispatch::Exit(Status::Success));
        }

        let mut parser = Parser::new(spec, self.builtins);
        let result = parser.parse(argv);
        let path = parser.command_path();

        let dispatch = match result {
            Ok(outcome) => match outcome.builtin() {
                None => Dispatch::Execute {
                    command: outcome.command().map(str::to_owned),
                },
                Some("help") => {
                    let description = parser.active_help().unwrap_or(self.info.description);
                    printers::print_help(
                        stdout,
                        exe,
                        path,
                        description,
                        parser.active(),
                        parser.builtins(),
                        self.info.epilogue,
                    )?;
                    Dispatch::Exit(Status::Success)
                }
                Some("usage") => {
                    printers::print_usage(stdout, exe, path, parser.active())?;
                    Dispatch::Exit(Status::Success)
                }
                Some("version") => {
                    printers::print_version(stdout, self.info.version)?;
                    Dispatch::Exit(Status::Success)
                }
                Some(keyword) => Dispatch::Builtin(keyword.to_owned()),
            },
            Err(error) => {
                let hint = parser
                    .builtins()
                    .iter()
                    .any(|builtin| builtin.keyword == "help");
                printers::write_parse_error(stderr, exe, path, &error, hint)?;

                if self.usage_on_error {
                    printers::print_usage(stderr, exe, path, parser.active())?;
                }

                Dispatch::Exit(Status::ParseError)
            }
        };

        debug!(?dispatch, "dispatch");
        stdout.flush()?;
        stderr.flush()?;

        Ok(dispatch)
    }

    /// Parse the arguments of the current process, printing to the process's
    /// stdout and stderr. Arguments that aren't valid unicode are converted
    /// lossily.
    pub fn run_env(&self, spec: &mut Specification<'_>) -> io::Result<Dispatch> {
        let argv: Vec<String> = env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        self.run(
            spec,
            argv.iter().map(String::as_str),
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )
    }
}

/// The file name part of the program path
fn exe_name(arg: &str) -> &str {
    Path::new(arg)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(arg)
}
