//! Imposing overrides on a parsed flag set.
//!
//! Slice flags receive the whole override through the bulk-replace
//! capability, so the file decides the exact final collection regardless of
//! defaults. Scalar flags receive a single occurrence.
//!
//! # Example
//!
//! ```
//! use flagset_config::{MergePolicy, Overrides};
//! use flagset_core::FlagSet;
//!
//! let mut flags = FlagSet::new("mycli");
//! let i32s = flags.int32_slice("i32s", vec![1, 5], "numbers").unwrap();
//! flags.parse(["--i32s", "5", "--i32s", "1"]).unwrap();
//!
//! let overrides = Overrides::from_yaml_str(
//!     "version: \"1.0\"\npolicy: prefer-config\nflags:\n  i32s: [3]\n",
//! )
//! .unwrap();
//! let report = overrides.apply(&mut flags).unwrap();
//!
//! assert_eq!(i32s.get(), vec![3]);
//! assert_eq!(report.applied, vec!["i32s"]);
//! ```

use flagset_core::FlagSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::overrides::Overrides;

/// Who wins when a flag appears both on the command line and in the file.
///
/// # Examples
///
/// ```
/// use flagset_config::MergePolicy;
///
/// assert_eq!(MergePolicy::default(), MergePolicy::PreferCommandLine);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Keep values given on the command line; the file only fills in flags
    /// that were not set.
    #[default]
    PreferCommandLine,
    /// The file always wins.
    PreferConfig,
}

/// What [`Overrides::apply`] did, by flag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Flags whose value now comes from the file.
    pub applied: Vec<String>,
    /// Flags left alone because the command line already set them.
    pub skipped: Vec<String>,
    /// Entries ignored because they are excluded or undefined.
    pub ignored: Vec<String>,
}

impl Overrides {
    /// Applies every entry to `flags`, in name order.
    ///
    /// Each slice flag is replaced atomically; application stops at the
    /// first error, leaving earlier entries applied.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownFlag`] for an undefined flag unless
    /// `allow_unknown` is set, [`ConfigError::NotASlice`] for a list aimed
    /// at a scalar flag, [`ConfigError::Flag`] when a token fails to
    /// convert.
    pub fn apply(&self, flags: &mut FlagSet) -> Result<ApplyReport> {
        self.check_version()?;
        let mut report = ApplyReport::default();

        for (name, value) in &self.flags {
            if self.is_excluded(name) {
                report.ignored.push(name.clone());
                continue;
            }

            let (changed, is_slice) = match flags.lookup(name) {
                Some(flag) => (flag.changed(), flag.value().as_slice_value().is_some()),
                None if self.allow_unknown => {
                    debug!(flag = %name, "ignoring override for undefined flag");
                    report.ignored.push(name.clone());
                    continue;
                }
                None => return Err(ConfigError::UnknownFlag(name.clone())),
            };

            if changed && self.policy == MergePolicy::PreferCommandLine {
                debug!(flag = %name, "command line wins over override");
                report.skipped.push(name.clone());
                continue;
            }

            let tokens = value.tokens();
            if is_slice {
                flags.replace_slice(name, &tokens)?;
            } else {
                match tokens.as_slice() {
                    [token] => flags.set(name, token)?,
                    _ => {
                        return Err(ConfigError::NotASlice {
                            name: name.clone(),
                            count: tokens.len(),
                        });
                    }
                }
            }
            debug!(flag = %name, count = tokens.len(), "override applied");
            report.applied.push(name.clone());
        }

        info!(
            set = flags.name(),
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            ignored = report.ignored.len(),
            "overrides applied"
        );
        Ok(report)
    }
}
