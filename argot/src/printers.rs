/*!
Rendering for everything the command line user sees: diagnostics, help
text, the one-line usage summary, and the version.

Everything here writes to an [`io::Write`], so callers decide whether it
ends up on stdout, stderr, or in a buffer.
*/

use std::{
    fmt::Display,
    io::{self, Write as _},
    iter,
};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{
    Tags,
    outcome::ParseError,
    parser::Builtin,
    spec::{OptionSpec, PositionalSpec, Requirement, Specification},
};

/// Descriptions are wrapped to fit in this many columns
const LINE_WIDTH: usize = 80;

/// The program name followed by the selected commands, like `git remote add`
pub fn invocation<'a>(exe: &'a str, path: &'a [String]) -> impl Display + 'a {
    lazy_format!("{exe}{commands}", commands = lazy_format!(" {command}" for command in path))
}

/**
Write a diagnostic for a parse error:

```text
calc add: extraneous argument '5'
Try 'calc add --help' for more information.
```

The second line is only written if `hint` is set and the error
[suggests help][ParseError::suggests_help].
*/
pub fn write_parse_error(
    out: &mut impl io::Write,
    exe: &str,
    path: &[String],
    error: &ParseError,
    hint: bool,
) -> io::Result<()> {
    let invocation = invocation(exe, path);
    writeln!(out, "{invocation}: {error}")?;

    if hint && error.suggests_help() {
        writeln!(out, "Try '{invocation} --help' for more information.")?;
    }

    Ok(())
}

/*
Overall structure:

DESCRIPTION

Usage:
  exe command [OPTIONS] <ARG> [LIST...]

Arguments:
  <ARG>       help

Options:
  -f, --foo <FOO>    help
      --help         Print this help text

Commands:
  name    help

EPILOGUE
 */
/// Write the full help text for one level of a specification.
pub fn print_help(
    out: &mut impl io::Write,
    exe: &str,
    path: &[String],
    description: &str,
    spec: &Specification<'_>,
    builtins: &[Builtin<'_>],
    epilogue: &str,
) -> io::Result<()> {
    if !description.is_empty() {
        writeln!(out, "{description}\n")?;
    }

    section(out, "Usage", |mut out| {
        write!(out, "{}", invocation(exe, path))?;

        if spec.options().next().is_some() || !builtins.is_empty() {
            write!(out, " [OPTIONS]")?;
        }

        spec.positionals()
            .try_for_each(|positional| write!(out, " {}", positional_label(positional)))?;

        if spec.has_commands() {
            write!(out, " <COMMAND>")?;
        }

        writeln!(out)
    })?;

    table(
        out,
        "Arguments",
        spec.positionals()
            .map(|positional| (positional_label(positional).to_string(), positional.help())),
    )?;

    table(
        out,
        "Options",
        spec.options()
            .map(|option| (option_label(option).to_string(), option.help()))
            .chain(builtins.iter().map(|builtin| {
                let tags = Tags::Long {
                    long: builtin.keyword,
                };
                (tags_label(tags).to_string(), builtin.description)
            })),
    )?;

    table(
        out,
        "Commands",
        spec.commands()
            .map(|command| (command.name().to_owned(), command.help())),
    )?;

    if !epilogue.is_empty() {
        writeln!(out, "\n{epilogue}")?;
    }

    Ok(())
}

/**
Write a one-line usage summary, listing every option together with the
current value of its bound variable:

```text
Usage: calc [-v|--verbose(=false)] [--precision(=0)] <COMMAND>
```
*/
pub fn print_usage(
    out: &mut impl io::Write,
    exe: &str,
    path: &[String],
    spec: &Specification<'_>,
) -> io::Result<()> {
    let options = spec.options().map(|option| {
        let tags = lazy_format!(match (option.tags()) {
            Tags::Short { short } => "-{short}",
            Tags::Long { long } => "--{long}",
            Tags::LongShort { long, short } => "-{short}|--{long}",
        });

        format!("[{tags}(={})]", option.binding().default_repr())
    });

    let positionals = spec
        .positionals()
        .map(|positional| positional_label(positional).to_string());

    let commands = spec.has_commands().then(|| "<COMMAND>".to_owned());

    let items = iter::once(invocation(exe, path).to_string())
        .chain(options)
        .chain(positionals)
        .chain(commands);

    writeln!(out, "Usage: {}", items.join_with(' '))
}

pub fn print_version(out: &mut impl io::Write, version: &str) -> io::Result<()> {
    writeln!(out, "{version}")
}

fn tags_label(tags: Tags<'_>) -> impl Display + '_ {
    lazy_format!(match (tags) {
        Tags::Short { short } => "-{short}",
        Tags::Long { long } => "    --{long}",
        Tags::LongShort { short, long } => "-{short}, --{long}",
    })
}

fn option_label<'a>(option: &'a OptionSpec<'_>) -> impl Display + 'a {
    let tags = tags_label(option.tags());
    let name = option.name();

    lazy_format!(match (option.is_flag()) {
        true => "{tags}",
        false => "{tags} <{name}>",
    })
}

fn positional_label<'a>(positional: &'a PositionalSpec<'_>) -> impl Display + 'a {
    let name = positional.name();

    lazy_format!(match (positional.requirement()) {
        Requirement::Required => "<{name}>",
        Requirement::Optional => "[{name}]",
        Requirement::List => "[{name}...]",
    })
}

/// Write a section by writing the `header`, then an indented `body`.
fn section<O: io::Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
) -> io::Result<T> {
    writeln!(out, "{header}:")?;
    body(IndentWriter::new("  ", out))
}

/// Write a section preceded by a blank line, only if the iterator is not
/// empty. Otherwise identical to `section`.
fn maybe_section<O: io::Write + ?Sized, I: IntoIterator>(
    out: &mut O,
    header: &str,
    items: I,
    body: impl Fn(&mut IndentWriter<&mut O>, I::Item) -> io::Result<()>,
) -> io::Result<()> {
    let mut items = items.into_iter();

    match items.next() {
        None => Ok(()),
        Some(first) => {
            writeln!(out)?;
            section(out, header, |mut out| {
                body(&mut out, first)?;
                items.try_for_each(|item| body(&mut out, item))
            })
        }
    }
}

/// A section of labels with their descriptions, aligned in two columns
fn table<'d, O: io::Write + ?Sized>(
    out: &mut O,
    header: &str,
    rows: impl Iterator<Item = (String, &'d str)>,
) -> io::Result<()> {
    let rows: Vec<_> = rows.collect();
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        + 4;

    maybe_section(out, header, &rows, |out, (label, description)| {
        describe(out, label, width, description)
    })
}

/// Describe an item by printing its label padded to `width`, followed by
/// its description. Long descriptions wrap, and the continuation lines are
/// aligned with the first.
fn describe(
    out: &mut (impl io::Write + ?Sized),
    label: &str,
    width: usize,
    description: &str,
) -> io::Result<()> {
    if description.is_empty() {
        return writeln!(out, "{label}");
    }

    let lines = textwrap::wrap(description, LINE_WIDTH.saturating_sub(width + 2).max(20));
    let mut lines = lines.iter();

    if let Some(first) = lines.next() {
        writeln!(out, "{label:<width$}{first}")?;
    }

    lines.try_for_each(|line| writeln!(out, "{:width$}{line}", ""))
}
