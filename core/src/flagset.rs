//! A minimal flag set: registration, tokenizing, and read-back.
//!
//! The flag set only knows long flags (`--name value` or `--name=value`).
//! Each occurrence is handed to the registered [`Value`]; what an
//! occurrence means (overwrite, append, replace defaults) is entirely the
//! value's business.
//!
//! # Examples
//!
//! ```
//! use flagset_core::FlagSet;
//!
//! let mut flags = FlagSet::new("demo");
//! let hosts = flags.string_slice("host", vec!["localhost".into()], "hosts to probe").unwrap();
//! let ports = flags.uint_slice("port", vec![], "ports to probe").unwrap();
//!
//! flags
//!     .parse(["--host", "a.example", "--port=80", "--port", " 443 ", "--", "--rest"])
//!     .unwrap();
//!
//! assert_eq!(hosts.get(), vec!["a.example"]);
//! assert_eq!(ports.get(), vec![80, 443]);
//! assert_eq!(flags.args(), ["--rest"]);
//! assert_eq!(flags.get_uint_slice("port").unwrap(), vec![80, 443]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::element::Element;
use crate::error::{FlagError, Result};
use crate::scalar::TypedValue;
use crate::slice::TypedSlice;
use crate::value::{Binding, FlagValue, Value};

/// A registered flag.
pub struct Flag {
    name: String,
    usage: String,
    default_value: String,
    value: Box<dyn Value>,
    changed: bool,
}

impl Flag {
    /// Name without leading dashes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text given at registration.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Textual form of the value at registration time.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// The value behind the flag.
    pub fn value(&self) -> &dyn Value {
        self.value.as_ref()
    }

    /// Mutable access to the value, e.g. for a capability-checked replace.
    pub fn value_mut(&mut self) -> &mut dyn Value {
        self.value.as_mut()
    }

    /// Whether an occurrence has been applied through the flag set.
    pub fn changed(&self) -> bool {
        self.changed
    }

    fn apply(&mut self, token: &str) -> Result<()> {
        self.value
            .set(token)
            .map_err(|source| FlagError::InvalidArgument {
                token: token.to_string(),
                name: self.name.clone(),
                source,
            })?;
        self.changed = true;
        debug!(flag = %self.name, token, "occurrence applied");
        Ok(())
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("type", &self.value.type_name())
            .field("value", &self.value.to_string())
            .field("changed", &self.changed)
            .finish()
    }
}

/// A set of named flags parsed from one command line.
///
/// Not meant to be shared between threads; every instance is independent.
#[derive(Debug)]
pub struct FlagSet {
    name: String,
    flags: BTreeMap<String, Flag>,
    args: Vec<String>,
    parsed: bool,
}

impl FlagSet {
    /// Creates an empty flag set; `name` only shows up in logs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: BTreeMap::new(),
            args: Vec::new(),
            parsed: false,
        }
    }

    /// Name given to [`new`](Self::new).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a custom value.
    ///
    /// # Errors
    ///
    /// [`FlagError::InvalidName`] for an empty name, a name starting with
    /// `-`, or one containing `=`; [`FlagError::Redefined`] if the name is
    /// taken.
    pub fn add_flag(&mut self, name: &str, usage: &str, value: Box<dyn Value>) -> Result<()> {
        self.check_name(name)?;
        let default_value = value.to_string();
        debug!(flag = name, kind = value.type_name(), "flag registered");
        self.flags.insert(
            name.to_string(),
            Flag {
                name: name.to_string(),
                usage: usage.to_string(),
                default_value,
                value,
                changed: false,
            },
        );
        Ok(())
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty() || name.starts_with('-') || name.contains('=') {
            return Err(FlagError::InvalidName(name.to_string()));
        }
        if self.flags.contains_key(name) {
            return Err(FlagError::Redefined(name.to_string()));
        }
        Ok(())
    }

    /// Registers a slice flag writing through `dest`.
    ///
    /// `dest` is overwritten with `default` on success and left alone on
    /// error.
    pub fn slice_var<T: Element>(
        &mut self,
        dest: &Binding<Vec<T>>,
        name: &str,
        default: Vec<T>,
        usage: &str,
    ) -> Result<()> {
        self.check_name(name)?;
        self.add_flag(name, usage, Box::new(TypedSlice::new(dest.clone(), default)))
    }

    /// Registers a slice flag and returns a fresh binding to its value.
    pub fn slice<T: Element>(
        &mut self,
        name: &str,
        default: Vec<T>,
        usage: &str,
    ) -> Result<Binding<Vec<T>>> {
        let dest = Binding::new(Vec::new());
        self.slice_var(&dest, name, default, usage)?;
        Ok(dest)
    }

    /// Registers a scalar flag writing through `dest`.
    pub fn var<T: Element>(
        &mut self,
        dest: &Binding<T>,
        name: &str,
        default: T,
        usage: &str,
    ) -> Result<()> {
        self.check_name(name)?;
        self.add_flag(name, usage, Box::new(TypedValue::new(dest.clone(), default)))
    }

    /// Registers a scalar flag and returns a fresh binding to its value.
    pub fn value<T: Element>(&mut self, name: &str, default: T, usage: &str) -> Result<Binding<T>> {
        let dest = Binding::new(default.clone());
        self.var(&dest, name, default, usage)?;
        Ok(dest)
    }

    /// Parses `arguments` (without the program name).
    ///
    /// Tokens not starting with `--` are collected into [`args`](Self::args),
    /// as is everything after a bare `--`; leftovers of an earlier parse are
    /// dropped. Parsing stops at the first error;
    /// occurrences applied before it stay applied.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownFlag`], [`FlagError::BadSyntax`],
    /// [`FlagError::MissingArgument`] or [`FlagError::InvalidArgument`].
    pub fn parse<I, S>(&mut self, arguments: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parsed = false;
        self.args.clear();
        let mut tokens = arguments.into_iter().map(|s| s.as_ref().to_string());

        while let Some(token) = tokens.next() {
            if token == "--" {
                self.args.extend(tokens.by_ref());
                break;
            }
            let Some(body) = token.strip_prefix("--") else {
                self.args.push(token);
                continue;
            };

            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };
            if name.is_empty() || name.starts_with('-') {
                return Err(FlagError::BadSyntax(token.clone()));
            }

            let flag = self
                .flags
                .get_mut(name)
                .ok_or_else(|| FlagError::UnknownFlag(name.to_string()))?;
            let value = match inline {
                Some(value) => value,
                None => match flag.value.no_opt_default() {
                    Some(bare) => bare.to_string(),
                    None => tokens
                        .next()
                        .ok_or_else(|| FlagError::MissingArgument(name.to_string()))?,
                },
            };
            flag.apply(&value)?;
        }

        self.parsed = true;
        debug!(set = %self.name, args = self.args.len(), "parse complete");
        Ok(())
    }

    /// Whether the last [`parse`](Self::parse) ran to completion.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Non-flag arguments left over by parsing.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Applies one occurrence programmatically, exactly as if it had
    /// appeared on the command line.
    pub fn set(&mut self, name: &str, token: &str) -> Result<()> {
        self.lookup_mut(name)
            .ok_or_else(|| FlagError::NotFound(name.to_string()))?
            .apply(token)
    }

    /// Replaces the whole collection of a slice flag.
    ///
    /// # Errors
    ///
    /// [`FlagError::NotFound`], [`FlagError::NotASlice`] when the value lacks
    /// the slice capability, or [`FlagError::InvalidArgument`] naming the
    /// first bad token (the collection is then unchanged).
    ///
    /// # Examples
    ///
    /// ```
    /// use flagset_core::{FlagError, FlagSet};
    ///
    /// let mut flags = FlagSet::new("demo");
    /// let i32s = flags.int32_slice("i32s", vec![], "numbers").unwrap();
    /// flags.parse(["--i32s", "5", "--i32s", "1"]).unwrap();
    ///
    /// let err = flags.replace_slice("i32s", &["1".into(), "x".into()]).unwrap_err();
    /// assert!(matches!(err, FlagError::InvalidArgument { .. }));
    /// assert_eq!(i32s.get(), vec![5, 1]);
    ///
    /// flags.replace_slice("i32s", &["3".into()]).unwrap();
    /// assert_eq!(i32s.get(), vec![3]);
    /// ```
    pub fn replace_slice(&mut self, name: &str, tokens: &[String]) -> Result<()> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| FlagError::NotFound(name.to_string()))?;
        let slice = flag
            .value
            .as_slice_value_mut()
            .ok_or_else(|| FlagError::NotASlice(name.to_string()))?;
        slice
            .replace(tokens)
            .map_err(|err| FlagError::InvalidArgument {
                token: err.token,
                name: name.to_string(),
                source: err.source,
            })
    }

    /// Adds one element to a slice flag without the first-occurrence reset
    /// of [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// [`FlagError::NotFound`], [`FlagError::NotASlice`], or
    /// [`FlagError::InvalidArgument`] with the same text a bad command-line
    /// occurrence produces (the collection is then unchanged).
    ///
    /// # Examples
    ///
    /// ```
    /// use flagset_core::FlagSet;
    ///
    /// let mut flags = FlagSet::new("demo");
    /// let i32s = flags.int32_slice("i32s", vec![1], "numbers").unwrap();
    /// flags.append_slice("i32s", "2").unwrap();
    /// assert_eq!(i32s.get(), vec![1, 2]);
    ///
    /// let err = flags.append_slice("i32s", "x").unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     r#"invalid argument "x" for "--i32s" flag: parse_int: parsing "x": invalid syntax"#
    /// );
    /// ```
    pub fn append_slice(&mut self, name: &str, token: &str) -> Result<()> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| FlagError::NotFound(name.to_string()))?;
        let slice = flag
            .value
            .as_slice_value_mut()
            .ok_or_else(|| FlagError::NotASlice(name.to_string()))?;
        slice
            .append(token)
            .map_err(|source| FlagError::InvalidArgument {
                token: token.to_string(),
                name: name.to_string(),
                source,
            })
    }

    /// Looks up a flag by name (without dashes).
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// Mutable lookup, e.g. to reach a value's slice capability.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Flag> {
        self.flags.get_mut(name)
    }

    /// Whether the named flag has seen an occurrence. Unknown names are
    /// reported as unchanged.
    pub fn changed(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(Flag::changed)
    }

    /// Snapshot of a flag's value, whatever its type.
    pub fn get(&self, name: &str) -> Result<FlagValue> {
        self.lookup(name)
            .map(|flag| flag.value.get())
            .ok_or_else(|| FlagError::NotFound(name.to_string()))
    }

    /// Typed read-back of a slice flag.
    ///
    /// # Errors
    ///
    /// [`FlagError::NotFound`] or [`FlagError::TypeMismatch`].
    pub fn get_slice<T: Element>(&self, name: &str) -> Result<Vec<T>> {
        self.get_typed(name, T::SLICE_TYPE_NAME, T::from_slice_flag_value)
    }

    /// Typed read-back of a scalar flag.
    pub fn get_value<T: Element>(&self, name: &str) -> Result<T> {
        self.get_typed(name, T::TYPE_NAME, T::from_flag_value)
    }

    fn get_typed<R>(
        &self,
        name: &str,
        expected: &'static str,
        extract: impl FnOnce(&FlagValue) -> Option<R>,
    ) -> Result<R> {
        let flag = self
            .lookup(name)
            .ok_or_else(|| FlagError::NotFound(name.to_string()))?;
        let actual = flag.value.type_name();
        let mismatch = || FlagError::TypeMismatch {
            name: name.to_string(),
            expected,
            actual,
        };
        if actual != expected {
            return Err(mismatch());
        }
        extract(&flag.value.get()).ok_or_else(mismatch)
    }

    /// Calls `visitor` on every flag in lexicographic order.
    pub fn visit_all(&mut self, mut visitor: impl FnMut(&mut Flag)) {
        for flag in self.flags.values_mut() {
            visitor(flag);
        }
    }

    /// Calls `visitor` on every changed flag in lexicographic order.
    pub fn visit(&mut self, mut visitor: impl FnMut(&mut Flag)) {
        for flag in self.flags.values_mut().filter(|flag| flag.changed) {
            visitor(flag);
        }
    }

    /// Every registered flag in lexicographic order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Current value of every flag, keyed by name.
    pub fn snapshot(&self) -> BTreeMap<String, FlagValue> {
        self.flags
            .iter()
            .map(|(name, flag)| (name.clone(), flag.value.get()))
            .collect()
    }
}

macro_rules! slice_accessors {
    ($($ty:ty => $var:ident, $new:ident, $get:ident;)*) => {
        impl FlagSet {
            $(
                #[doc = concat!("Registers a `", stringify!($ty), "` slice flag bound to `dest`.")]
                pub fn $var(
                    &mut self,
                    dest: &Binding<Vec<$ty>>,
                    name: &str,
                    default: Vec<$ty>,
                    usage: &str,
                ) -> Result<()> {
                    self.slice_var(dest, name, default, usage)
                }

                #[doc = concat!("Registers a `", stringify!($ty), "` slice flag.")]
                pub fn $new(
                    &mut self,
                    name: &str,
                    default: Vec<$ty>,
                    usage: &str,
                ) -> Result<Binding<Vec<$ty>>> {
                    self.slice(name, default, usage)
                }

                #[doc = concat!("Reads back a `", stringify!($ty), "` slice flag.")]
                pub fn $get(&self, name: &str) -> Result<Vec<$ty>> {
                    self.get_slice(name)
                }
            )*
        }
    };
}

slice_accessors! {
    String => string_slice_var, string_slice, get_string_slice;
    bool => bool_slice_var, bool_slice, get_bool_slice;
    i32 => int32_slice_var, int32_slice, get_int32_slice;
    i64 => int64_slice_var, int64_slice, get_int64_slice;
    usize => uint_slice_var, uint_slice, get_uint_slice;
    u32 => uint32_slice_var, uint32_slice, get_uint32_slice;
    u64 => uint64_slice_var, uint64_slice, get_uint64_slice;
    f64 => float64_slice_var, float64_slice, get_float64_slice;
}

macro_rules! scalar_accessors {
    ($($ty:ty => $var:ident, $new:ident, $get:ident;)*) => {
        impl FlagSet {
            $(
                #[doc = concat!("Registers a `", stringify!($ty), "` flag bound to `dest`.")]
                pub fn $var(&mut self, dest: &Binding<$ty>, name: &str, default: $ty, usage: &str) -> Result<()> {
                    self.var(dest, name, default, usage)
                }

                #[doc = concat!("Registers a `", stringify!($ty), "` flag.")]
                pub fn $new(&mut self, name: &str, default: $ty, usage: &str) -> Result<Binding<$ty>> {
                    self.value(name, default, usage)
                }

                #[doc = concat!("Reads back a `", stringify!($ty), "` flag.")]
                pub fn $get(&self, name: &str) -> Result<$ty> {
                    self.get_value(name)
                }
            )*
        }
    };
}

scalar_accessors! {
    String => string_var, string, get_string;
    bool => bool_var, bool, get_bool;
    i32 => int32_var, int32, get_int32;
    usize => uint_var, uint, get_uint;
}
