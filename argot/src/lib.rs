/*!
A declarative command line arguments parsing engine; bind your variables,
describe your options and positionals, and let argot fill them in.

The usual flow is:

- Build a [`Specification`] with [`Specification::builder`], binding each
  option, positional argument, and subcommand to one of your variables. Any
  type that implements [`Parameter`][parameter::Parameter] can be bound: bools
  (flags), integers and floats, strings, paths, and [`Vec`]s of those.
- Hand the specification and the arguments to a [`Parser`], which fills in
  the bound variables and returns an [`Outcome`], or the first [`ParseError`]
  it found.
- Or let an [`App`][app::App] do both, printing diagnostics, help and usage
  text along the way.

```
use argot::{Outcome, Parser, Specification, Tags};

let mut debug = false;
let mut inputs: Vec<String> = Vec::new();

let mut spec = Specification::builder()
    .option(Tags::LongShort { long: "debug", short: 'd' }, "debug", "Enable debug output", &mut debug)
    .list("INPUT", "Files to read", &mut inputs)
    .build()
    .unwrap();

let outcome = Parser::new(&mut spec, &[]).parse(["-d", "a.txt", "b.txt"]);
assert_eq!(outcome, Ok(Outcome::Complete));

drop(spec);
assert!(debug);
assert_eq!(inputs, ["a.txt", "b.txt"]);
```
*/

pub mod app;
pub mod binding;
mod impls;
pub mod outcome;
pub mod parameter;
pub mod parser;
pub mod printers;
pub mod spec;

pub use argot_scanner::{OptionKind, Token, TokenKind};
pub use outcome::{Missing, OptionName, Outcome, ParseError};
pub use parser::{Builtin, Parser, parse};
pub use spec::{
    CommandSpec, Entry, OptionSpec, PositionalSpec, Requirement, SpecError, Specification,
    SpecificationBuilder,
};

/// The set of tags that identify a particular option (`-short`, `--long`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tags<'a> {
    /// This option uses only a long tag
    Long { long: &'a str },

    /// This option uses only a short tag
    Short { short: char },

    /// This option uses both a long and short tag
    LongShort { long: &'a str, short: char },
}

impl<'a> Tags<'a> {
    /// Get the long tag, if any
    #[inline]
    #[must_use]
    pub const fn long(&self) -> Option<&'a str> {
        match self {
            Tags::Long { long } | Tags::LongShort { long, .. } => Some(long),
            Tags::Short { .. } => None,
        }
    }

    /// Get the short tag, if any
    #[inline]
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        match self {
            Tags::Short { short } | Tags::LongShort { short, .. } => Some(*short),
            Tags::Long { .. } => None,
        }
    }

    /**
    Parse the compact key syntax: `"f,foo"` is a short `-f` and a long
    `--foo`, `"f"` is only a short tag, and `"foo"` is only a long tag.
    Surrounding spaces and tabs are ignored.

    Returns [`None`] for an empty key, or a key like `"f,"` that has a short
    tag and a comma but no long tag.
    */
    #[must_use]
    pub fn from_key(key: &'a str) -> Option<Self> {
        let key = key.trim_matches([' ', '\t']);
        let mut chars = key.chars();

        match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(short), None) => Some(Tags::Short { short }),
            (Some(short), Some(',')) => match chars.as_str() {
                "" => None,
                long => Some(Tags::LongShort { long, short }),
            },
            (Some(_), Some(_)) => Some(Tags::Long { long: key }),
        }
    }
}
