//! Element types and their token conversion policy.
//!
//! Each primitive a flag can hold implements [`Element`]. Numeric and
//! boolean elements trim ASCII whitespace at the token boundaries before
//! converting; internal whitespace is never touched. Strings are stored
//! verbatim.

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};
use crate::value::FlagValue;

/// A primitive type that flag values can be built from.
///
/// # Examples
///
/// ```
/// use flagset_core::Element;
///
/// assert_eq!(u32::parse_token("  42 ").unwrap(), 42);
/// assert_eq!(String::parse_token("  42 ").unwrap(), "  42 ");
/// assert!(usize::parse_token("-1").is_err());
/// assert_eq!(<i64 as Element>::SLICE_TYPE_NAME, "int64Slice");
/// ```
pub trait Element: Clone + PartialEq + fmt::Debug + Sized + 'static {
    /// Type tag of a scalar value of this element.
    const TYPE_NAME: &'static str;
    /// Type tag of a slice value of this element.
    const SLICE_TYPE_NAME: &'static str;
    /// Token used when a scalar flag of this type appears bare.
    const NO_OPT_DEFAULT: Option<&'static str> = None;

    /// Converts one textual token.
    fn parse_token(token: &str) -> Result<Self, ParseError>;

    /// Textual form that [`parse_token`](Element::parse_token) accepts back.
    fn render(&self) -> String;

    /// Wraps a scalar in its [`FlagValue`] variant.
    fn into_flag_value(self) -> FlagValue;

    /// Wraps a collection in its slice [`FlagValue`] variant.
    fn into_slice_flag_value(values: Vec<Self>) -> FlagValue;

    /// Unwraps the scalar variant, `None` for any other type.
    fn from_flag_value(value: &FlagValue) -> Option<Self>;

    /// Unwraps the slice variant, `None` for any other type.
    fn from_slice_flag_value(value: &FlagValue) -> Option<Vec<Self>>;
}

fn parse_string(token: &str) -> Result<String, ParseError> {
    Ok(token.to_string())
}

fn parse_bool(token: &str) -> Result<bool, ParseError> {
    match token.trim_ascii() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(ParseError::new(
            "parse_bool",
            other,
            ParseErrorKind::InvalidSyntax,
        )),
    }
}

fn int_error_kind(err: &ParseIntError) -> ParseErrorKind {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseErrorKind::OutOfRange,
        _ => ParseErrorKind::InvalidSyntax,
    }
}

fn parse_signed<T>(token: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = ParseIntError>,
{
    let input = token.trim_ascii();
    input
        .parse::<T>()
        .map_err(|err| ParseError::new("parse_int", input, int_error_kind(&err)))
}

fn parse_unsigned<T>(token: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = ParseIntError>,
{
    let input = token.trim_ascii();
    // `FromStr` for unsigned integers tolerates a leading '+'.
    if input.starts_with('+') {
        return Err(ParseError::new(
            "parse_uint",
            input,
            ParseErrorKind::InvalidSyntax,
        ));
    }
    input
        .parse::<T>()
        .map_err(|err| ParseError::new("parse_uint", input, int_error_kind(&err)))
}

fn parse_float(token: &str) -> Result<f64, ParseError> {
    let input = token.trim_ascii();
    let value = input
        .parse::<f64>()
        .map_err(|_| ParseError::new("parse_float", input, ParseErrorKind::InvalidSyntax))?;
    if value.is_infinite() && !input.to_ascii_lowercase().contains("inf") {
        return Err(ParseError::new(
            "parse_float",
            input,
            ParseErrorKind::OutOfRange,
        ));
    }
    Ok(value)
}

macro_rules! element {
    ($ty:ty, $name:literal, $slice_name:literal, $parse:expr, $scalar:ident, $slice:ident) => {
        element!($ty, $name, $slice_name, $parse, $scalar, $slice, None);
    };
    ($ty:ty, $name:literal, $slice_name:literal, $parse:expr, $scalar:ident, $slice:ident, $bare:expr) => {
        impl Element for $ty {
            const TYPE_NAME: &'static str = $name;
            const SLICE_TYPE_NAME: &'static str = $slice_name;
            const NO_OPT_DEFAULT: Option<&'static str> = $bare;

            fn parse_token(token: &str) -> Result<Self, ParseError> {
                $parse(token)
            }

            fn render(&self) -> String {
                self.to_string()
            }

            fn into_flag_value(self) -> FlagValue {
                FlagValue::$scalar(self)
            }

            fn into_slice_flag_value(values: Vec<Self>) -> FlagValue {
                FlagValue::$slice(values)
            }

            fn from_flag_value(value: &FlagValue) -> Option<Self> {
                match value {
                    FlagValue::$scalar(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn from_slice_flag_value(value: &FlagValue) -> Option<Vec<Self>> {
                match value {
                    FlagValue::$slice(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

element!(String, "string", "stringSlice", parse_string, String, StringSlice);
element!(bool, "bool", "boolSlice", parse_bool, Bool, BoolSlice, Some("true"));
element!(i32, "int32", "int32Slice", parse_signed::<i32>, Int32, Int32Slice);
element!(i64, "int64", "int64Slice", parse_signed::<i64>, Int64, Int64Slice);
element!(usize, "uint", "uintSlice", parse_unsigned::<usize>, Uint, UintSlice);
element!(u32, "uint32", "uint32Slice", parse_unsigned::<u32>, Uint32, Uint32Slice);
element!(u64, "uint64", "uint64Slice", parse_unsigned::<u64>, Uint64, Uint64Slice);
element!(f64, "float64", "float64Slice", parse_float, Float64, Float64Slice);
