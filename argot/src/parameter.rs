use core::{
    fmt::{self, Display},
    str::FromStr,
};

/**
A [`Parameter`] refused the argument it was given, usually because it failed
to parse.

This type contains no data because a parameter type doesn't have any additional
context about the option or positional it's bound to. The parser turns a
[`Rejected`] into a [`ParseError::InvalidValue`][crate::ParseError::InvalidValue],
which includes that context.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("the argument was rejected")]
pub struct Rejected;

/**
A parameter is a type that a command line argument can be written into.

The parameter trait allows types to operate independently of the option or
positional they're bound to. It is the "type" part of the command line
argument, responsible for turning the raw argument string into a value.

Parameters are written in place: the bound variable already holds a value
(its default), and each assignment overwrites it, or in the case of
collections, adds to it. Assignment must be all-or-nothing; a rejected
argument must leave the variable untouched.

For most types it makes more sense to implement [`ParsedValue`] instead of
[`Parameter`], which derives everything from [`FromStr`] and [`Display`].
*/
pub trait Parameter {
    /**
    Flags are options that don't need an argument, like `--verbose`. A flag
    never takes the next command line argument as its value, and receives an
    empty string if no value was attached with `=`.
    */
    const FLAG: bool = false;

    /// Write a single command line argument into this parameter.
    fn assign(&mut self, argument: &str) -> Result<(), Rejected>;

    /// Render the current value, for use in usage messages.
    fn fmt_default(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// For types with a [`FromStr`] and a [`Display`] implementation,
/// [`ParsedValue`] automatically gives them a [`Parameter`] implementation so
/// that they can be bound to command line arguments. The entire argument must
/// parse; there are no partial parses.
pub trait ParsedValue: FromStr + Display {}

impl<T> Parameter for T
where
    T: ParsedValue,
{
    #[inline]
    fn assign(&mut self, argument: &str) -> Result<(), Rejected> {
        *self = argument.parse().map_err(|_| Rejected)?;
        Ok(())
    }

    #[inline]
    fn fmt_default(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
