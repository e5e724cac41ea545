//! The value capability contract.
//!
//! Every registered flag holds a [`Value`]: the flag set calls
//! [`Value::set`] once per occurrence and reads the result back through
//! [`Value::get`] or the `Display` impl. Values that accumulate several
//! occurrences additionally expose the [`SliceValue`] capability. It is a
//! feature test, not a supertrait: callers ask for it with
//! [`Value::as_slice_value_mut`] and must handle `None`.
//!
//! # Examples
//!
//! ```
//! use flagset_core::{Binding, TypedSlice, TypedValue, Value};
//!
//! let mut ports = TypedSlice::new(Binding::default(), vec![80u32]);
//! let mut name = TypedValue::new(Binding::default(), String::from("web"));
//!
//! assert!(ports.as_slice_value_mut().is_some());
//! assert!(name.as_slice_value_mut().is_none());
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::error::{ParseError, ReplaceError};

/// Shared handle to a caller-owned destination variable.
///
/// A flag value writes through its binding, so whatever the caller holds
/// always reflects the current parse state. Bindings are single-threaded.
///
/// # Examples
///
/// ```
/// use flagset_core::FlagSet;
///
/// let mut flags = FlagSet::new("demo");
/// let i32s = flags.int32_slice("i32s", vec![1, 5], "numbers").unwrap();
/// flags.parse(["--i32s", "7"]).unwrap();
/// assert_eq!(i32s.get(), vec![7]);
/// ```
#[derive(Debug, Default)]
pub struct Binding<T>(Rc<RefCell<T>>);

impl<T> Binding<T> {
    /// Creates a binding holding `value`.
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }

    /// Borrows the current value.
    ///
    /// Guards never escape the crate and are dropped before the owning
    /// value mutates again, so callers cannot observe a borrow conflict.
    /// Outside the crate, read through [`get`](Self::get):
    ///
    /// ```compile_fail
    /// let binding = flagset_core::Binding::new(vec![1]);
    /// let guard = binding.borrow();
    /// ```
    pub(crate) fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Overwrites the value, returning the previous one.
    pub fn set(&self, value: T) -> T {
        self.0.replace(value)
    }

    /// Runs `f` with mutable access to the value.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Whether both handles point at the same variable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

/// A snapshot of any flag's value, as returned by [`Value::get`].
///
/// Serializes untagged, so a slice flag becomes a JSON array and a scalar a
/// plain JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// `string` flag.
    String(String),
    /// `bool` flag.
    Bool(bool),
    /// `int32` flag.
    Int32(i32),
    /// `int64` flag.
    Int64(i64),
    /// `uint` flag.
    Uint(usize),
    /// `uint32` flag.
    Uint32(u32),
    /// `uint64` flag.
    Uint64(u64),
    /// `float64` flag.
    Float64(f64),
    /// `stringSlice` flag.
    StringSlice(Vec<String>),
    /// `boolSlice` flag.
    BoolSlice(Vec<bool>),
    /// `int32Slice` flag.
    Int32Slice(Vec<i32>),
    /// `int64Slice` flag.
    Int64Slice(Vec<i64>),
    /// `uintSlice` flag.
    UintSlice(Vec<usize>),
    /// `uint32Slice` flag.
    Uint32Slice(Vec<u32>),
    /// `uint64Slice` flag.
    Uint64Slice(Vec<u64>),
    /// `float64Slice` flag.
    Float64Slice(Vec<f64>),
}

impl FlagValue {
    /// Whether this snapshot came from a slice value.
    pub fn is_slice(&self) -> bool {
        matches!(
            self,
            FlagValue::StringSlice(_)
                | FlagValue::BoolSlice(_)
                | FlagValue::Int32Slice(_)
                | FlagValue::Int64Slice(_)
                | FlagValue::UintSlice(_)
                | FlagValue::Uint32Slice(_)
                | FlagValue::Uint64Slice(_)
                | FlagValue::Float64Slice(_)
        )
    }
}

/// Generic access to a flag's value.
///
/// `Display` renders the current value (for slices, the comma-joined
/// elements).
pub trait Value: fmt::Display + fmt::Debug {
    /// Applies one textual occurrence.
    ///
    /// On error the value must be left exactly as it was.
    fn set(&mut self, token: &str) -> Result<(), ParseError>;

    /// Stable type tag, e.g. `"int32Slice"`.
    fn type_name(&self) -> &'static str;

    /// Snapshot of the current value.
    fn get(&self) -> FlagValue;

    /// Token to use when the flag appears without a value, if that is
    /// allowed at all.
    fn no_opt_default(&self) -> Option<&'static str> {
        None
    }

    /// Capability check for read-only slice access.
    fn as_slice_value(&self) -> Option<&dyn SliceValue> {
        None
    }

    /// Capability check for bulk slice operations.
    fn as_slice_value_mut(&mut self) -> Option<&mut dyn SliceValue> {
        None
    }
}

/// Bulk operations on a value that holds an ordered collection.
pub trait SliceValue {
    /// Adds one element, whether or not the value was set before.
    fn append(&mut self, token: &str) -> Result<(), ParseError>;

    /// Reparses `tokens` into a new collection and swaps it in.
    ///
    /// All or nothing: if any token fails, the collection is untouched.
    fn replace(&mut self, tokens: &[String]) -> Result<(), ReplaceError>;

    /// Every element rendered back to text, in order.
    fn get_slice(&self) -> Vec<String>;
}
