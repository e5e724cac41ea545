//! Typed, repeatable flag values.
//!
//! This crate implements the part of a command-line parser that lets a flag
//! accumulate several occurrences into an ordered, typed collection:
//!
//! - [`Element`]: conversion policy for each primitive (`String`, `bool`,
//!   `i32`, `i64`, `usize`, `u32`, `u64`, `f64`).
//! - [`Value`] / [`SliceValue`]: the capability contract. Generic code
//!   calls [`Value::set`] per occurrence and feature-tests for bulk
//!   operations with [`Value::as_slice_value_mut`].
//! - [`TypedSlice`]: the slice value. The first occurrence replaces the
//!   defaults, later ones append, [`SliceValue::replace`] swaps in a whole
//!   new collection atomically.
//! - [`TypedValue`]: single-valued counterpart without the slice
//!   capability.
//! - [`FlagSet`]: registration, `--name value` tokenizing and typed
//!   read-back.
//!
//! # Example
//!
//! ```
//! use flagset_core::*;
//!
//! let mut flags = FlagSet::new("mycli");
//! let i32s = flags.int32_slice("i32s", vec![1, 5], "numbers").unwrap();
//!
//! flags.parse(["--i32s", "5", "--i32s", "1"]).unwrap();
//! assert_eq!(i32s.get(), vec![5, 1]);
//!
//! // Bulk replace goes through the capability check.
//! flags.visit_all(|flag| {
//!     if let Some(slice) = flag.value_mut().as_slice_value_mut() {
//!         slice.replace(&["3".to_string()]).unwrap();
//!     }
//! });
//! assert_eq!(flags.get_int32_slice("i32s").unwrap(), vec![3]);
//!
//! let err = flags.parse(["--i32s", "1,5"]).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     r#"invalid argument "1,5" for "--i32s" flag: parse_int: parsing "1,5": invalid syntax"#
//! );
//! ```

mod element;
mod error;
mod flagset;
mod scalar;
mod slice;
mod value;

pub use element::Element;
pub use error::{FlagError, ParseError, ParseErrorKind, ReplaceError, Result};
pub use flagset::{Flag, FlagSet};
pub use scalar::TypedValue;
pub use slice::TypedSlice;
pub use value::{Binding, FlagValue, SliceValue, Value};
