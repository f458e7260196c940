/*!
Implementations of the [`parameter`][crate::parameter] traits for various
primitive and standard library types
 */

use std::{fmt, path::PathBuf};

use crate::parameter::{Parameter, ParsedValue, Rejected};

macro_rules! from_str {
    ($($type:ident $(:: $path:ident)*)*) => {
        $(
            impl ParsedValue for $type $(:: $path)* {}
        )*
    };
}

from_str! {
    u8 u16 u32 u64 u128 usize
    i8 i16 i32 i64 i128 isize
    f32 f64
    char

    core::net::Ipv4Addr
    core::net::Ipv6Addr
    core::net::IpAddr
}

impl Parameter for bool {
    const FLAG: bool = true;

    /// `false` and `0` turn the flag off; anything else, including no value
    /// at all, turns it on.
    #[inline]
    fn assign(&mut self, argument: &str) -> Result<(), Rejected> {
        *self = !matches!(argument, "false" | "0");
        Ok(())
    }

    #[inline]
    fn fmt_default(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Parameter for String {
    #[inline]
    fn assign(&mut self, argument: &str) -> Result<(), Rejected> {
        argument.clone_into(self);
        Ok(())
    }

    #[inline]
    fn fmt_default(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl Parameter for PathBuf {
    #[inline]
    fn assign(&mut self, argument: &str) -> Result<(), Rejected> {
        *self = PathBuf::from(argument);
        Ok(())
    }

    #[inline]
    fn fmt_default(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.display())
    }
}

/// Collections gather every argument given to them, in order. Each argument
/// is parsed into a fresh `T::default()`, and only appended if it parsed.
impl<T> Parameter for Vec<T>
where
    T: Parameter + Default,
{
    #[inline]
    fn assign(&mut self, argument: &str) -> Result<(), Rejected> {
        let mut element = T::default();
        element.assign(argument)?;
        self.push(element);
        Ok(())
    }

    #[inline]
    fn fmt_default(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("...")
    }
}
