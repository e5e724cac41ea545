//! Single-valued flags.
//!
//! A [`TypedValue`] keeps the last occurrence only. It deliberately lacks
//! the slice capability, so orchestration code that feature-tests for
//! [`SliceValue`](crate::SliceValue) treats it as a plain scalar.

use std::fmt;

use tracing::debug;

use crate::element::Element;
use crate::error::ParseError;
use crate::value::{Binding, FlagValue, Value};

/// A single `T` backing a caller's variable.
#[derive(Debug)]
pub struct TypedValue<T: Element> {
    dest: Binding<T>,
}

impl<T: Element> TypedValue<T> {
    /// Binds `dest` and stores `default` in it.
    pub fn new(dest: Binding<T>, default: T) -> Self {
        dest.set(default);
        Self { dest }
    }

    /// The caller's variable.
    pub fn binding(&self) -> &Binding<T> {
        &self.dest
    }
}

impl<T: Element> fmt::Display for TypedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dest.borrow().render())
    }
}

impl<T: Element> Value for TypedValue<T> {
    fn set(&mut self, token: &str) -> Result<(), ParseError> {
        let value = T::parse_token(token)?;
        self.dest.set(value);
        debug!(kind = T::TYPE_NAME, token, "value set");
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn get(&self) -> FlagValue {
        self.dest.get().into_flag_value()
    }

    fn no_opt_default(&self) -> Option<&'static str> {
        T::NO_OPT_DEFAULT
    }
}
