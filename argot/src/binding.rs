/*!
Type erasure for [`Parameter`]s.

A [`Specification`][crate::Specification] stores options and positionals of
many different types in a single list, so each one holds its bound variable
behind a [`Binding`] trait object. [`Bound`] is the only implementation; it
wraps a mutable reference to any [`Parameter`] type.
*/

use core::fmt;

use lazy_format::make_lazy_format;

use crate::parameter::{Parameter, Rejected};

/// The object-safe face of a bound [`Parameter`] variable.
pub trait Binding {
    /// True if the bound type is a flag, meaning it never takes the next
    /// command line argument as its value.
    fn is_flag(&self) -> bool;

    /// Write an argument into the bound variable.
    fn assign(&mut self, argument: &str) -> Result<(), Rejected>;

    /// Render the bound variable's current value, for usage messages.
    fn default_repr(&self) -> String;
}

/// A [`Binding`] to a variable of type `T`.
pub struct Bound<'a, T> {
    target: &'a mut T,
}

impl<'a, T: Parameter> Bound<'a, T> {
    #[inline]
    #[must_use]
    pub fn new(target: &'a mut T) -> Self {
        Self { target }
    }

    /// Shorthand for `Box::new(Bound::new(target))`
    #[inline]
    #[must_use]
    pub fn boxed(target: &'a mut T) -> Box<dyn Binding + 'a> {
        Box::new(Self::new(target))
    }
}

impl<T: Parameter> Binding for Bound<'_, T> {
    #[inline]
    fn is_flag(&self) -> bool {
        T::FLAG
    }

    #[inline]
    fn assign(&mut self, argument: &str) -> Result<(), Rejected> {
        self.target.assign(argument)
    }

    fn default_repr(&self) -> String {
        let target = &*self.target;
        make_lazy_format!(|f| target.fmt_default(f)).to_string()
    }
}

impl fmt::Debug for dyn Binding + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("is_flag", &self.is_flag())
            .field("default", &self.default_repr())
            .finish()
    }
}
