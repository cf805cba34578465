//! Flag metadata registry with deprecated-name aliases.
//!
//! A [`FlagRegistry`] sits on top of a [`FlagBackend`] that stores typed flag
//! values. The registry adds what the backend does not track:
//!
//! - descriptions and visibility bits (`shell`, `external`, `cli`, `hidden`)
//!   for every declared flag;
//! - aliases that forward reads and writes to a canonical flag;
//! - a `custom_` namespace of string values with no backend storage;
//! - deterministic, filtered help listings and `NAME=DEFAULT` exports.
//!
//! ```
//! use flag_registry::{AliasSpec, FlagRegistry, FlagSpec, FlagType, Visibility};
//!
//! let registry: FlagRegistry = FlagRegistry::default();
//! registry.register([
//!     FlagSpec::cli_flag("timeout", FlagType::Int32, "30", "Seconds to wait").into(),
//!     AliasSpec::extension_alias("old_timeout", "timeout").into(),
//! ])?;
//!
//! let mut dump = Vec::new();
//! registry.dump_default_flags(&mut dump, Visibility::cli_help())?;
//! assert_eq!(String::from_utf8_lossy(&dump), "timeout=30\n");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

mod alias;
pub mod backend;
pub mod convert;
mod declare;
mod detail;
mod error;
mod global;
mod overrides;
mod registry;

pub use alias::FlagAlias;
pub use backend::{BackendFlag, FlagBackend, FlagTable, FlagType};
pub use convert::FlagValue;
pub use declare::{AliasSpec, Declaration, FlagDefinitions, FlagSpec};
pub use detail::{FlagDetail, FlagInfo, Visibility};
pub use error::{AggregatedErrors, FlagError, FlagResult};
pub use global::{register_flags, registry};
pub use overrides::{FlagOverrides, OverrideReport};
pub use registry::{CUSTOM_PREFIX, FlagRegistry, UpdateOutcome};
