//! The flag registry: declared flags, deprecated-name aliases and custom
//! values layered over a [`FlagBackend`].

mod listing;
mod state;
mod update;

use std::collections::BTreeMap;
use std::fmt;

use parking_lot::Mutex;

use crate::backend::{FlagBackend, FlagTable};
use crate::detail::{FlagDetail, FlagInfo};
use state::RegistryState;

pub use update::UpdateOutcome;

/// Prefix that admits a name into the custom value store.
pub const CUSTOM_PREFIX: &str = "custom_";

/// Placeholder printed after the name of every non-boolean flag.
pub(crate) const VALUE_PLACEHOLDER: &str = " VALUE";

/// Registry of flag metadata and aliases over a value backend.
///
/// The backend owns types, defaults and current values. The registry adds
/// descriptions and visibility bits, forwards writes made through aliases to
/// their canonical flag, and keeps `custom_` values that have no backend
/// storage at all. Every operation takes one internal lock, so a registry can
/// be shared between threads.
///
/// Queries never fail: unknown names yield empty strings, `false` or
/// `None`.
///
/// # Examples
///
/// ```
/// use flag_registry::{AliasSpec, FlagRegistry, FlagSpec, FlagType};
///
/// let registry: FlagRegistry = FlagRegistry::default();
/// registry.register([
///     FlagSpec::cli_flag("timeout", FlagType::Int32, "30", "Seconds to wait").into(),
///     AliasSpec::extension_alias("old_timeout", "timeout").into(),
/// ])?;
///
/// assert!(registry.update_value("old_timeout", "45"));
/// assert_eq!(registry.value("timeout"), "45");
/// assert_eq!(registry.description("old_timeout"), "Seconds to wait");
/// # Ok::<_, flag_registry::FlagError>(())
/// ```
pub struct FlagRegistry<B = FlagTable> {
    state: Mutex<RegistryState<B>>,
}

impl<B: FlagBackend + Default> Default for FlagRegistry<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B> fmt::Debug for FlagRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("FlagRegistry")
            .field("flags", &state.flags.len())
            .field("aliases", &state.aliases.len())
            .field("custom", &state.custom.len())
            .finish_non_exhaustive()
    }
}

impl<B: FlagBackend> FlagRegistry<B> {
    /// Creates an empty registry over `backend`.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            state: Mutex::new(RegistryState::new(backend)),
        }
    }

    /// Records metadata for the flag `name`.
    ///
    /// Declaring a name again replaces its metadata.
    pub fn create(&self, name: impl Into<String>, detail: FlagDetail) {
        self.state.lock().flags.insert(name.into(), detail);
    }

    /// Records the alias `alias`; `detail.description` names the target flag.
    ///
    /// Declaring an alias again replaces its metadata.
    pub fn create_alias(&self, alias: impl Into<String>, detail: FlagDetail) {
        self.state.lock().aliases.insert(alias.into(), detail);
    }

    /// Whether `name` was declared as a flag.
    #[must_use]
    pub fn contains_flag(&self, name: &str) -> bool {
        self.state.lock().flags.contains_key(name)
    }

    /// Whether `name` was declared as an alias.
    #[must_use]
    pub fn contains_alias(&self, name: &str) -> bool {
        self.state.lock().aliases.contains_key(name)
    }

    /// Names of the stored custom values, in order.
    #[must_use]
    pub fn custom_names(&self) -> Vec<String> {
        self.state.lock().custom.keys().cloned().collect()
    }

    /// Current value of `name` as text.
    ///
    /// A stored custom value wins over any flag or alias with the same name.
    /// Otherwise the backend is asked; names it does not know yield an empty
    /// string.
    #[must_use]
    pub fn value(&self, name: &str) -> String {
        self.state.lock().value(name)
    }

    /// Writes `value` to `name` and reports how the write was routed.
    ///
    /// Declared flags are written under their own name, aliases under their
    /// target's name, and undeclared `custom_` names are stored locally.
    /// Any other name is left alone.
    pub fn apply_update(&self, name: &str, value: &str) -> UpdateOutcome {
        self.state.lock().apply_update(name, value)
    }

    /// Writes `value` to `name`.
    ///
    /// Returns `true` when `name` is a declared flag or alias, even if the
    /// backend then rejects the text. Writes to `custom_` names are stored
    /// but return `false`; see [`Self::apply_update`] to tell them apart from
    /// ignored writes.
    pub fn update_value(&self, name: &str, value: &str) -> bool {
        self.apply_update(name, value).reported()
    }

    /// Default value of `name` as reported by the backend.
    #[must_use]
    pub fn default_value(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .backend
            .info(name)
            .map(|flag| flag.default_value)
    }

    /// Whether the backend reports `name` at its default value.
    ///
    /// Unknown names are not at their default.
    #[must_use]
    pub fn is_default(&self, name: &str) -> bool {
        self.state
            .lock()
            .backend
            .info(name)
            .is_some_and(|flag| flag.is_default)
    }

    /// Backend type name of `name`, or an empty string.
    #[must_use]
    pub fn flag_type(&self, name: &str) -> String {
        self.state
            .lock()
            .backend
            .info(name)
            .map(|flag| flag.flag_type)
            .unwrap_or_default()
    }

    /// Description of `name`.
    ///
    /// An alias reports the description of the flag it targets. Unknown
    /// names, and aliases whose target is not a declared flag, yield an
    /// empty string.
    #[must_use]
    pub fn description(&self, name: &str) -> String {
        self.state.lock().description(name)
    }

    /// Every declared flag the backend knows, merged with its metadata, plus
    /// one `string` entry per custom value.
    ///
    /// Backend flags declared without the registry are left out.
    #[must_use]
    pub fn flags(&self) -> BTreeMap<String, FlagInfo> {
        self.state.lock().flags()
    }

    /// [`Self::flags`] rendered as a JSON object keyed by flag name.
    #[cfg(feature = "serde_json")]
    #[must_use]
    pub fn flags_json(&self) -> serde_json::Value {
        self.flags()
            .into_iter()
            .filter_map(|(name, info)| serde_json::to_value(info).ok().map(|value| (name, value)))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }

    /// Runs `f` with shared access to the backend.
    ///
    /// The registry lock is held while `f` runs, so calling any
    /// `FlagRegistry` method from inside `f` deadlocks.
    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.state.lock().backend)
    }

    /// Runs `f` with exclusive access to the backend.
    ///
    /// The registry lock is held while `f` runs, so calling any
    /// `FlagRegistry` method from inside `f` deadlocks.
    pub fn with_backend_mut<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.state.lock().backend)
    }
}

#[cfg(test)]
mod tests;
