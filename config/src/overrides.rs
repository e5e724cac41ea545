//! Override file model.
//!
//! An override file pins flag values after the command line has been
//! parsed, typically from a per-project settings file.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! policy: prefer-config
//! allow_unknown: false
//! exclude:
//!   - token
//! flags:
//!   i32s: [1, 2, 3]
//!   hosts:
//!     - a.example
//!     - b.example
//!   name: web
//!   verbose: true
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::apply::MergePolicy;
use crate::error::{ConfigError, Result};

/// Major format version this crate reads.
pub const OVERRIDES_FORMAT_MAJOR: &str = "1";

/// A single override value as written in the file.
///
/// YAML and JSON scalars of any kind are accepted and rendered back to the
/// token a command line would have carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// `true` / `false`.
    Bool(bool),
    /// Any integer that fits `i64`.
    Int(i64),
    /// Integers above `i64::MAX`.
    Uint(u64),
    /// Floating-point numbers.
    Float(f64),
    /// Strings, quoted numbers included.
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Uint(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(v) => f.write_str(v),
        }
    }
}

/// Value of one entry under `flags:`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    /// A sequence; imposed as the whole collection of a slice flag.
    List(Vec<Scalar>),
    /// A bare scalar.
    Single(Scalar),
}

impl OverrideValue {
    /// Tokens in file order.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagset_config::{OverrideValue, Scalar};
    ///
    /// let value = OverrideValue::List(vec![Scalar::Int(1), Scalar::Text("2".into())]);
    /// assert_eq!(value.tokens(), vec!["1", "2"]);
    /// assert_eq!(OverrideValue::Single(Scalar::Bool(true)).tokens(), vec!["true"]);
    /// ```
    pub fn tokens(&self) -> Vec<String> {
        match self {
            OverrideValue::List(items) => items.iter().map(Scalar::to_string).collect(),
            OverrideValue::Single(item) => vec![item.to_string()],
        }
    }
}

/// A parsed override file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    /// Format version (e.g. `"1.0"`).
    pub version: String,
    /// Whether command-line occurrences beat the file.
    #[serde(default)]
    pub policy: MergePolicy,
    /// Ignore entries for flags the flag set does not define.
    #[serde(default)]
    pub allow_unknown: bool,
    /// Flags the file must never touch.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Values keyed by flag name (no dashes).
    #[serde(default)]
    pub flags: BTreeMap<String, OverrideValue>,
}

impl Default for Overrides {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            policy: MergePolicy::default(),
            allow_unknown: false,
            exclude: Vec::new(),
            flags: BTreeMap::new(),
        }
    }
}

impl Overrides {
    /// Loads overrides from a file; `.json` files are read as JSON and
    /// everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// [`JsonError`](ConfigError::JsonError) or
    /// [`YamlError`](ConfigError::YamlError) if decoding fails, and
    /// [`UnsupportedVersion`](ConfigError::UnsupportedVersion) for a foreign
    /// format version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let overrides: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        overrides.check_version()?;
        Ok(overrides)
    }

    /// Saves the overrides as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(std::fs::File::create(path)?);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Parses a YAML document and checks its version.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let overrides: Self = serde_yaml::from_str(yaml)?;
        overrides.check_version()?;
        Ok(overrides)
    }

    /// Parses a JSON document and checks its version.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: Self = serde_json::from_str(json)?;
        overrides.check_version()?;
        Ok(overrides)
    }

    /// Fails unless the major version is one this crate understands.
    pub fn check_version(&self) -> Result<()> {
        let major = self.version.trim().split('.').next().unwrap_or_default();
        if major != OVERRIDES_FORMAT_MAJOR {
            return Err(ConfigError::UnsupportedVersion(self.version.clone()));
        }
        Ok(())
    }

    /// Returns `true` if `name` is in the exclusion list.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }

    /// Adds or replaces the entry for `name`.
    pub fn with_flag(mut self, name: &str, value: OverrideValue) -> Self {
        self.flags.insert(name.to_string(), value);
        self
    }
}
