//! Override files for flag sets.
//!
//! Loads a YAML or JSON document of flag values and imposes it on a parsed
//! [`FlagSet`](flagset_core::FlagSet). Slice flags are replaced wholesale
//! through the bulk-replace capability; scalar flags get a single
//! occurrence.
//!
//! # Quick start
//!
//! ```no_run
//! use flagset_config::Overrides;
//! use flagset_core::FlagSet;
//!
//! let mut flags = FlagSet::new("mycli");
//! let hosts = flags.string_slice("hosts", vec![], "hosts to probe").unwrap();
//! flags.parse(std::env::args().skip(1)).unwrap();
//!
//! let overrides = Overrides::load(".mycli.yml").unwrap();
//! let report = overrides.apply(&mut flags).unwrap();
//! println!("{} flags from file, hosts = {:?}", report.applied.len(), hosts.get());
//! ```

mod apply;
mod error;
mod overrides;

pub use apply::{ApplyReport, MergePolicy};
pub use error::{ConfigError, Result};
pub use overrides::{OVERRIDES_FORMAT_MAJOR, OverrideValue, Overrides, Scalar};
