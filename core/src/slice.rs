//! Typed slice values: flags that accumulate one element per occurrence.
//!
//! The first [`Value::set`] after registration discards the defaults and
//! starts a fresh collection; every later `set` appends. [`SliceValue`]
//! offers the two escape hatches: [`append`](SliceValue::append), which
//! always adds, and [`replace`](SliceValue::replace), which swaps in a whole
//! new collection atomically.
//!
//! # Examples
//!
//! ```
//! use flagset_core::{Binding, SliceValue, TypedSlice, Value};
//!
//! let dest = Binding::default();
//! let mut value = TypedSlice::new(dest.clone(), vec![1i32, 5]);
//!
//! value.set("5").unwrap();
//! value.set("1").unwrap();
//! assert_eq!(dest.get(), vec![5, 1]);
//!
//! value.replace(&["3".to_string()]).unwrap();
//! assert_eq!(dest.get(), vec![3]);
//! assert_eq!(value.to_string(), "3");
//! ```

use std::fmt;

use tracing::debug;

use crate::element::Element;
use crate::error::{ParseError, ReplaceError};
use crate::value::{Binding, FlagValue, SliceValue, Value};

/// An ordered collection of `T` backing a caller's `Vec<T>`.
#[derive(Debug)]
pub struct TypedSlice<T: Element> {
    dest: Binding<Vec<T>>,
    changed: bool,
}

impl<T: Element> TypedSlice<T> {
    /// Binds `dest` and stores `default` in it.
    pub fn new(dest: Binding<Vec<T>>, default: Vec<T>) -> Self {
        dest.set(default);
        Self {
            dest,
            changed: false,
        }
    }

    /// The destination this value writes through.
    pub fn binding(&self) -> &Binding<Vec<T>> {
        &self.dest
    }

    /// Whether [`Value::set`] has run since registration.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    fn parse_all(tokens: &[String]) -> Result<Vec<T>, ReplaceError> {
        tokens
            .iter()
            .enumerate()
            .map(|(index, token)| {
                T::parse_token(token).map_err(|source| ReplaceError {
                    index,
                    token: token.clone(),
                    source,
                })
            })
            .collect()
    }
}

impl<T: Element> fmt::Display for TypedSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.dest.borrow();
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&value.render())?;
        }
        Ok(())
    }
}

impl<T: Element> Value for TypedSlice<T> {
    fn set(&mut self, token: &str) -> Result<(), ParseError> {
        let value = T::parse_token(token)?;
        if self.changed {
            self.dest.update(|values| values.push(value));
        } else {
            self.dest.set(vec![value]);
            self.changed = true;
        }
        debug!(kind = T::SLICE_TYPE_NAME, token, "slice element set");
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        T::SLICE_TYPE_NAME
    }

    fn get(&self) -> FlagValue {
        T::into_slice_flag_value(self.dest.get())
    }

    fn as_slice_value(&self) -> Option<&dyn SliceValue> {
        Some(self)
    }

    fn as_slice_value_mut(&mut self) -> Option<&mut dyn SliceValue> {
        Some(self)
    }
}

impl<T: Element> SliceValue for TypedSlice<T> {
    fn append(&mut self, token: &str) -> Result<(), ParseError> {
        let value = T::parse_token(token)?;
        self.dest.update(|values| values.push(value));
        debug!(kind = T::SLICE_TYPE_NAME, token, "slice element appended");
        Ok(())
    }

    fn replace(&mut self, tokens: &[String]) -> Result<(), ReplaceError> {
        let values = Self::parse_all(tokens)?;
        debug!(
            kind = T::SLICE_TYPE_NAME,
            count = values.len(),
            "slice replaced"
        );
        self.dest.set(values);
        Ok(())
    }

    fn get_slice(&self) -> Vec<String> {
        self.dest.borrow().iter().map(Element::render).collect()
    }
}
