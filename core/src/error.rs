//! Error types for flag values and flag sets.
//!
//! Conversion of a single token fails with [`ParseError`]; a bulk replace
//! that hits a bad token fails with [`ReplaceError`]; everything surfaced by
//! a [`FlagSet`](crate::FlagSet) is a [`FlagError`].

use thiserror::Error;

/// Why a token could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The token is not a lexically valid value of the element type.
    #[error("invalid syntax")]
    InvalidSyntax,
    /// The token is well formed but does not fit the element type.
    #[error("value out of range")]
    OutOfRange,
}

/// A single token failed to convert to its element type.
///
/// The rendered form is `<func>: parsing "<input>": <kind>`, where `input`
/// is the token after boundary trimming.
///
/// # Examples
///
/// ```
/// use flagset_core::{Element, ParseErrorKind};
///
/// let err = i32::parse_token("1,5").unwrap_err();
/// assert_eq!(err.kind, ParseErrorKind::InvalidSyntax);
/// assert_eq!(err.to_string(), r#"parse_int: parsing "1,5": invalid syntax"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{func}: parsing {input:?}: {kind}")]
pub struct ParseError {
    /// Name of the conversion routine (`parse_int`, `parse_uint`,
    /// `parse_float` or `parse_bool`). These names are this crate's own
    /// labels, not `std` error text.
    pub func: &'static str,
    /// The input as seen by the conversion routine.
    pub input: String,
    /// Failure category.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(func: &'static str, input: &str, kind: ParseErrorKind) -> Self {
        Self {
            func,
            input: input.to_string(),
            kind,
        }
    }
}

/// A bulk replace was rejected because one of its tokens failed to convert.
///
/// The collection is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("element {index} ({token:?}): {source}")]
pub struct ReplaceError {
    /// Position of the offending token in the replace call.
    pub index: usize,
    /// The raw token.
    pub token: String,
    /// Underlying conversion failure.
    #[source]
    pub source: ParseError,
}

/// Errors reported by a [`FlagSet`](crate::FlagSet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// A token could not be converted for the named flag.
    #[error("invalid argument {token:?} for \"--{name}\" flag: {source}")]
    InvalidArgument {
        /// The raw token as it appeared on the command line.
        token: String,
        /// Flag name without dashes.
        name: String,
        /// Underlying conversion failure.
        #[source]
        source: ParseError,
    },
    /// The command line named a flag that was never registered.
    #[error("unknown flag: --{0}")]
    UnknownFlag(String),
    /// A flag that needs a value was the last token.
    #[error("flag needs an argument: --{0}")]
    MissingArgument(String),
    /// A token starting with `--` that cannot name a flag (e.g. `--=x`).
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),
    /// Lookup of a flag that was never registered.
    #[error("flag accessed but not defined: {0}")]
    NotFound(String),
    /// Typed read-back of a flag registered with another type.
    #[error("trying to get {expected} value of flag of type {actual}: --{name}")]
    TypeMismatch {
        /// Flag name without dashes.
        name: String,
        /// Type tag the caller asked for.
        expected: &'static str,
        /// Type tag of the registered value.
        actual: &'static str,
    },
    /// A bulk operation on a value without the slice capability.
    #[error("flag does not hold multiple values: --{0}")]
    NotASlice(String),
    /// Two flags registered under one name.
    #[error("flag redefined: {0}")]
    Redefined(String),
    /// Registration with a name that could never be matched.
    #[error("invalid flag name: {0:?}")]
    InvalidName(String),
}

/// Convenience alias for results with [`FlagError`].
pub type Result<T> = std::result::Result<T, FlagError>;
