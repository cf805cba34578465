//! The flag-storage contract the registry is paired with.
//!
//! The registry never stores flag values itself (apart from `custom_`
//! entries). Types, defaults and current values live in a [`FlagBackend`],
//! which the registry queries by name. [`FlagTable`] is the bundled
//! in-memory implementation.

mod flag_type;
mod table;

pub use flag_type::FlagType;
pub use table::FlagTable;

use crate::error::FlagResult;

/// Snapshot of one flag as reported by a backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendFlag {
    /// Name the flag was looked up or enumerated under.
    pub name: String,
    /// Type name, for example `bool` or `int32`.
    pub flag_type: String,
    /// Default value rendered as text.
    pub default_value: String,
    /// Current value rendered as text.
    pub current_value: String,
    /// Whether the current value equals the default.
    pub is_default: bool,
}

/// Storage and introspection for typed flags.
///
/// All values cross this boundary as text.
pub trait FlagBackend: Send {
    /// Describes `name`, or returns `None` when the backend does not know it.
    fn info(&self, name: &str) -> Option<BackendFlag>;

    /// Current value of `name` as text.
    fn current_value(&self, name: &str) -> Option<String> {
        self.info(name).map(|flag| flag.current_value)
    }

    /// Parses `value` and stores it as the current value of `name`.
    ///
    /// Returns the value as it was stored after normalisation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlagError::UnknownFlag`] when `name` is not defined
    /// and [`crate::FlagError::InvalidValue`] when `value` does not parse as
    /// the flag's type.
    fn set_value(&mut self, name: &str, value: &str) -> FlagResult<String>;

    /// Enumerates every name the backend knows, in no particular order.
    fn all_flags(&self) -> Vec<BackendFlag>;
}
