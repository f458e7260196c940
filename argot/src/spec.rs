/*!
The declarative description of a command line: which options, positional
arguments and subcommands exist, and which variables they're bound to.

A [`Specification`] is built once with a [`SpecificationBuilder`], which
checks the structural rules (unique option keys, at most one trailing
collector, unique command names) and then handed to a
[`Parser`][crate::Parser].
*/

use core::fmt;

use crate::{
    Tags,
    binding::{Binding, Bound},
    parameter::Parameter,
};

/// How a positional argument is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// Must appear exactly once
    Required,

    /// May appear at most once. Must be the last positional.
    Optional,

    /// Collects every remaining positional argument. Must be the last
    /// positional.
    List,
}

impl Requirement {
    /// Optional and list positionals are "trailing collectors"; nothing can
    /// be declared after them.
    #[inline]
    #[must_use]
    pub const fn is_collector(self) -> bool {
        !matches!(self, Requirement::Required)
    }
}

/// An option, such as `-v`, `--verbose`, or `--output FILE`
#[derive(Debug)]
pub struct OptionSpec<'a> {
    tags: Tags<'a>,
    name: &'a str,
    help: &'a str,
    binding: Box<dyn Binding + 'a>,
}

impl<'a> OptionSpec<'a> {
    #[inline]
    #[must_use]
    pub fn tags(&self) -> Tags<'a> {
        self.tags
    }

    /// The user-facing name of this option, used in error messages and as
    /// the placeholder for its value.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    #[must_use]
    pub fn help(&self) -> &'a str {
        self.help
    }

    #[inline]
    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.binding.is_flag()
    }

    #[inline]
    #[must_use]
    pub fn binding(&self) -> &(dyn Binding + 'a) {
        &*self.binding
    }

    #[inline]
    pub(crate) fn binding_mut(&mut self) -> &mut (dyn Binding + 'a) {
        &mut *self.binding
    }
}

/// A positional argument, identified by where it appears rather than by a tag
#[derive(Debug)]
pub struct PositionalSpec<'a> {
    requirement: Requirement,
    name: &'a str,
    help: &'a str,
    binding: Box<dyn Binding + 'a>,
}

impl<'a> PositionalSpec<'a> {
    #[inline]
    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// The user-facing name of this positional, like `FILE`.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    #[must_use]
    pub fn help(&self) -> &'a str {
        self.help
    }

    #[inline]
    #[must_use]
    pub fn binding(&self) -> &(dyn Binding + 'a) {
        &*self.binding
    }

    #[inline]
    pub(crate) fn binding_mut(&mut self) -> &mut (dyn Binding + 'a) {
        &mut *self.binding
    }
}

/// A subcommand, which owns the specification for its own arguments
#[derive(Debug)]
pub struct CommandSpec<'a> {
    name: &'a str,
    help: &'a str,
    nested: Specification<'a>,
}

impl<'a> CommandSpec<'a> {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    #[must_use]
    pub fn help(&self) -> &'a str {
        self.help
    }

    #[inline]
    #[must_use]
    pub fn nested(&self) -> &Specification<'a> {
        &self.nested
    }

    #[inline]
    pub(crate) fn nested_mut(&mut self) -> &mut Specification<'a> {
        &mut self.nested
    }
}

/// A single item in a [`Specification`]
#[derive(Debug)]
pub enum Entry<'a> {
    Option(OptionSpec<'a>),
    Positional(PositionalSpec<'a>),
    Command(CommandSpec<'a>),
}

impl<'a> Entry<'a> {
    #[inline]
    #[must_use]
    pub fn as_option(&self) -> Option<&OptionSpec<'a>> {
        match self {
            Entry::Option(option) => Some(option),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_positional(&self) -> Option<&PositionalSpec<'a>> {
        match self {
            Entry::Positional(positional) => Some(positional),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_command(&self) -> Option<&CommandSpec<'a>> {
        match self {
            Entry::Command(command) => Some(command),
            _ => None,
        }
    }
}

/**
An ordered list of options, positionals, and subcommands.

Declaration order matters: positionals are matched in the order they were
declared, and help text lists everything in declaration order.

If a specification contains any commands, its first positional argument is
always a command name. Positionals declared alongside commands are never
matched, because parsing continues in the selected command's own
specification.
*/
#[derive(Debug, Default)]
pub struct Specification<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> Specification<'a> {
    #[inline]
    #[must_use]
    pub fn builder() -> SpecificationBuilder<'a> {
        SpecificationBuilder::default()
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionSpec<'a>> + Clone {
        self.entries.iter().filter_map(Entry::as_option)
    }

    pub fn positionals(&self) -> impl Iterator<Item = &PositionalSpec<'a>> + Clone {
        self.entries.iter().filter_map(Entry::as_positional)
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec<'a>> + Clone {
        self.entries.iter().filter_map(Entry::as_command)
    }

    #[must_use]
    pub fn has_commands(&self) -> bool {
        self.commands().next().is_some()
    }

    /// Find a subcommand by its exact name
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&CommandSpec<'a>> {
        self.commands().find(|command| command.name == name)
    }

    pub(crate) fn command_mut(&mut self, name: &str) -> Option<&mut CommandSpec<'a>> {
        self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Command(command) if command.name == name => Some(command),
            _ => None,
        })
    }

    pub(crate) fn short_mut(&mut self, short: char) -> Option<&mut OptionSpec<'a>> {
        self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Option(option) if option.tags.short() == Some(short) => Some(option),
            _ => None,
        })
    }

    pub(crate) fn long_mut(&mut self, long: &str) -> Option<&mut OptionSpec<'a>> {
        self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Option(option) if option.tags.long() == Some(long) => Some(option),
            _ => None,
        })
    }

    /// The `index`th positional, counting only positionals
    pub(crate) fn positional_mut(&mut self, index: usize) -> Option<&mut PositionalSpec<'a>> {
        self.entries
            .iter_mut()
            .filter_map(|entry| match entry {
                Entry::Positional(positional) => Some(positional),
                _ => None,
            })
            .nth(index)
    }
}

/// Structural mistakes in a [`Specification`], reported by
/// [`SpecificationBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpecError {
    #[error("short option -{0} is declared more than once")]
    DuplicateShort(char),

    #[error("long option --{0} is declared more than once")]
    DuplicateLong(String),

    #[error("command {0:?} is declared more than once")]
    DuplicateCommand(String),

    #[error("short option {0:?} can't be used as an option letter")]
    InvalidShort(char),

    #[error("long option {0:?} can't be used as an option word")]
    InvalidLong(String),

    /// Optional and list positionals must be the last positional
    #[error("positional {name} is declared after the trailing positional {collector}")]
    AfterCollector { name: String, collector: String },
}

/**
Builder for a [`Specification`]. Each method binds one variable; the variable
stays mutably borrowed until the built specification is dropped.

```
use argot::{Specification, Tags};

let mut verbose = false;
let mut lhs = 0i64;
let mut rhs = 0i64;

let add = Specification::builder()
    .required("NUM_0", "First operand", &mut lhs)
    .required("NUM_1", "Second operand", &mut rhs)
    .build()
    .unwrap();

let spec = Specification::builder()
    .option(Tags::LongShort { long: "verbose", short: 'v' }, "verbose", "Show the full equation", &mut verbose)
    .command("add", "Add two numbers", add)
    .build()
    .unwrap();

assert!(spec.has_commands());
```
*/
#[derive(Debug, Default)]
pub struct SpecificationBuilder<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> SpecificationBuilder<'a> {
    /// Bind an option. Its type decides whether it's a flag (like `bool`)
    /// or needs a value (everything else).
    #[must_use]
    pub fn option<T: Parameter>(
        mut self,
        tags: Tags<'a>,
        name: &'a str,
        help: &'a str,
        target: &'a mut T,
    ) -> Self {
        self.entries.push(Entry::Option(OptionSpec {
            tags,
            name,
            help,
            binding: Bound::boxed(target),
        }));
        self
    }

    fn positional<T: Parameter>(
        mut self,
        requirement: Requirement,
        name: &'a str,
        help: &'a str,
        target: &'a mut T,
    ) -> Self {
        self.entries.push(Entry::Positional(PositionalSpec {
            requirement,
            name,
            help,
            binding: Bound::boxed(target),
        }));
        self
    }

    /// Bind a positional argument that must be present.
    #[must_use]
    pub fn required<T: Parameter>(self, name: &'a str, help: &'a str, target: &'a mut T) -> Self {
        self.positional(Requirement::Required, name, help, target)
    }

    /// Bind a positional argument that may be absent, in which case the
    /// variable keeps its current value.
    #[must_use]
    pub fn optional<T: Parameter>(self, name: &'a str, help: &'a str, target: &'a mut T) -> Self {
        self.positional(Requirement::Optional, name, help, target)
    }

    /// Bind a positional that collects all remaining positional arguments.
    #[must_use]
    pub fn list<T: Parameter + Default>(
        self,
        name: &'a str,
        help: &'a str,
        target: &'a mut Vec<T>,
    ) -> Self {
        self.positional(Requirement::List, name, help, target)
    }

    /// Add a subcommand with its own specification.
    #[must_use]
    pub fn command(mut self, name: &'a str, help: &'a str, nested: Specification<'a>) -> Self {
        self.entries.push(Entry::Command(CommandSpec { name, help, nested }));
        self
    }

    /// Check the structural rules and finish the specification.
    pub fn build(self) -> Result<Specification<'a>, SpecError> {
        let mut collector: Option<&str> = None;

        for (index, entry) in self.entries.iter().enumerate() {
            let earlier = &self.entries[..index];

            match entry {
                Entry::Option(option) => {
                    if let Some(short) = option.tags.short() {
                        if matches!(short, '-' | '=') || short.is_whitespace() {
                            return Err(SpecError::InvalidShort(short));
                        }

                        if earlier
                            .iter()
                            .filter_map(Entry::as_option)
                            .any(|other| other.tags.short() == Some(short))
                        {
                            return Err(SpecError::DuplicateShort(short));
                        }
                    }

                    if let Some(long) = option.tags.long() {
                        if long.is_empty() || long.starts_with('-') || long.contains('=') {
                            return Err(SpecError::InvalidLong(long.to_owned()));
                        }

                        if earlier
                            .iter()
                            .filter_map(Entry::as_option)
                            .any(|other| other.tags.long() == Some(long))
                        {
                            return Err(SpecError::DuplicateLong(long.to_owned()));
                        }
                    }
                }
                Entry::Positional(positional) => {
                    if let Some(collector) = collector {
                        return Err(SpecError::AfterCollector {
                            name: positional.name.to_owned(),
                            collector: collector.to_owned(),
                        });
                    }

                    if positional.requirement.is_collector() {
                        collector = Some(positional.name);
                    }
                }
                Entry::Command(command) => {
                    if earlier
                        .iter()
                        .filter_map(Entry::as_command)
                        .any(|other| other.name == command.name)
                    {
                        return Err(SpecError::DuplicateCommand(command.name.to_owned()));
                    }
                }
            }
        }

        Ok(Specification {
            entries: self.entries,
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Requirement::Required => "required",
            Requirement::Optional => "optional",
            Requirement::List => "list",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let (mut a, mut b, mut c) = (false, 0u8, String::new());

        let spec = Specification::builder()
            .required("B", "", &mut b)
            .option(Tags::Short { short: 'a' }, "a", "", &mut a)
            .optional("C", "", &mut c)
            .build()
            .unwrap();

        assert!(matches!(
            spec.entries(),
            [Entry::Positional(_), Entry::Option(_), Entry::Positional(_)]
        ));
        assert!(spec.positionals().map(PositionalSpec::name).eq(["B", "C"]));
        assert!(!spec.has_commands());
    }

    #[test]
    fn duplicate_short() {
        let (mut a, mut b) = (false, false);

        let error = Specification::builder()
            .option(Tags::LongShort { long: "all", short: 'a' }, "all", "", &mut a)
            .option(Tags::Short { short: 'a' }, "also", "", &mut b)
            .build()
            .unwrap_err();

        assert_eq!(error, SpecError::DuplicateShort('a'));
    }

    #[test]
    fn duplicate_long() {
        let (mut a, mut b) = (false, 0i32);

        let error = Specification::builder()
            .option(Tags::Long { long: "all" }, "all", "", &mut a)
            .option(Tags::LongShort { long: "all", short: 'x' }, "x", "", &mut b)
            .build()
            .unwrap_err();

        assert_eq!(error, SpecError::DuplicateLong("all".to_owned()));
    }

    #[test]
    fn malformed_tags() {
        let mut a = false;
        let error = Specification::builder()
            .option(Tags::Long { long: "a=b" }, "a", "", &mut a)
            .build()
            .unwrap_err();
        assert_eq!(error, SpecError::InvalidLong("a=b".to_owned()));

        let mut a = false;
        let error = Specification::builder()
            .option(Tags::Short { short: '-' }, "a", "", &mut a)
            .build()
            .unwrap_err();
        assert_eq!(error, SpecError::InvalidShort('-'));
    }

    #[test]
    fn nothing_after_a_collector() {
        let (mut rest, mut last) = (Vec::<String>::new(), 0u8);

        let error = Specification::builder()
            .list("REST", "", &mut rest)
            .required("LAST", "", &mut last)
            .build()
            .unwrap_err();

        assert_eq!(
            error,
            SpecError::AfterCollector {
                name: "LAST".to_owned(),
                collector: "REST".to_owned()
            }
        );

        let (mut maybe, mut rest) = (String::new(), Vec::<String>::new());

        let error = Specification::builder()
            .optional("MAYBE", "", &mut maybe)
            .list("REST", "", &mut rest)
            .build()
            .unwrap_err();

        assert!(matches!(error, SpecError::AfterCollector { .. }));
    }

    #[test]
    fn options_may_follow_a_collector() {
        let (mut rest, mut flag) = (Vec::<String>::new(), false);

        let spec = Specification::builder()
            .list("REST", "", &mut rest)
            .option(Tags::Short { short: 'f' }, "f", "", &mut flag)
            .build();

        assert!(spec.is_ok());
    }

    #[test]
    fn duplicate_command() {
        let error = Specification::builder()
            .command("add", "", Specification::default())
            .command("add", "", Specification::default())
            .build()
            .unwrap_err();

        assert_eq!(error, SpecError::DuplicateCommand("add".to_owned()));
    }

    #[test]
    fn lookup() {
        let (mut verbose, mut count) = (false, 0u32);

        let mut spec = Specification::builder()
            .option(Tags::LongShort { long: "verbose", short: 'v' }, "verbose", "", &mut verbose)
            .option(Tags::Long { long: "count" }, "COUNT", "", &mut count)
            .command("run", "Run it", Specification::default())
            .build()
            .unwrap();

        assert_eq!(spec.short_mut('v').map(|option| option.name()), Some("verbose"));
        assert_eq!(spec.long_mut("count").map(|option| option.name()), Some("COUNT"));
        assert!(spec.short_mut('c').is_none());
        assert!(spec.long_mut("run").is_none());
        assert_eq!(spec.command("run").map(CommandSpec::help), Some("Run it"));
        assert!(spec.command_mut("walk").is_none());
        assert!(spec.has_commands());
    }
}
