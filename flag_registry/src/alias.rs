//! Typed accessor for a flag or deprecated alias.

use std::fmt;
use std::marker::PhantomData;

use crate::backend::{FlagBackend, FlagTable};
use crate::convert::FlagValue;
use crate::registry::FlagRegistry;

/// Reads and writes one registry name as a typed value.
///
/// Reads go through [`FlagRegistry::value`] and convert the text; writes are
/// formatted and routed through [`FlagRegistry::update_value`], so an alias
/// name updates its canonical flag.
///
/// # Examples
///
/// ```
/// use flag_registry::{AliasSpec, FlagRegistry, FlagSpec, FlagType};
///
/// let registry: FlagRegistry = FlagRegistry::default();
/// registry.register([
///     FlagSpec::flag("workers", FlagType::Int32, "4", "Worker threads").into(),
///     AliasSpec::alias("threads", "workers").into(),
/// ])?;
///
/// let threads = registry.alias::<i32>("threads");
/// assert!(threads.set(&8));
/// assert_eq!(threads.get(), 8);
/// assert_eq!(registry.value("workers"), "8");
/// # Ok::<_, flag_registry::FlagError>(())
/// ```
pub struct FlagAlias<'r, T, B = FlagTable> {
    registry: &'r FlagRegistry<B>,
    name: String,
    marker: PhantomData<fn() -> T>,
}

impl<'r, T: FlagValue, B: FlagBackend> FlagAlias<'r, T, B> {
    /// Binds `name` in `registry`.
    #[must_use]
    pub fn new(registry: &'r FlagRegistry<B>, name: impl Into<String>) -> Self {
        Self {
            registry,
            name: name.into(),
            marker: PhantomData,
        }
    }

    /// The bound name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value converted to `T`; unparsable text reads as zero.
    #[must_use]
    pub fn get(&self) -> T {
        T::from_flag_str(&self.registry.value(&self.name))
    }

    /// Writes `value`, returning the status of
    /// [`FlagRegistry::update_value`].
    pub fn set(&self, value: &T) -> bool {
        self.registry
            .update_value(&self.name, &value.to_flag_string())
    }
}

impl<T, B> fmt::Debug for FlagAlias<'_, T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagAlias")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<B: FlagBackend> FlagRegistry<B> {
    /// Typed accessor for `name`.
    #[must_use]
    pub fn alias<T: FlagValue>(&self, name: impl Into<String>) -> FlagAlias<'_, T, B> {
        FlagAlias::new(self, name)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface registry mistakes"
)]
mod tests {
    use crate::{AliasSpec, FlagRegistry, FlagSpec, FlagType};
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> FlagRegistry {
        let registry: FlagRegistry = FlagRegistry::default();
        registry
            .register([
                FlagSpec::flag("ratio", FlagType::Double, "0.5", "Sampling ratio").into(),
                FlagSpec::flag("name", FlagType::String, "node", "Host name").into(),
                FlagSpec::flag("enabled", FlagType::Bool, "true", "Enabled").into(),
                AliasSpec::alias("sample_ratio", "ratio").into(),
            ])
            .expect("register");
        registry
    }

    #[rstest]
    fn reads_typed_values(registry: FlagRegistry) {
        assert!((registry.alias::<f64>("sample_ratio").get() - 0.5).abs() < f64::EPSILON);
        assert_eq!(registry.alias::<String>("name").get(), "node");
        assert!(registry.alias::<bool>("enabled").get());
    }

    #[rstest]
    fn writes_through_alias(registry: FlagRegistry) {
        let ratio = registry.alias::<f64>("sample_ratio");
        assert!(ratio.set(&0.25));
        assert_eq!(registry.value("ratio"), "0.25");
    }

    #[rstest]
    fn custom_names_store_but_report_false(registry: FlagRegistry) {
        let custom = registry.alias::<u32>("custom_retries");
        assert!(!custom.set(&3));
        assert_eq!(custom.get(), 3);
    }

    #[rstest]
    fn unknown_names_read_as_zero(registry: FlagRegistry) {
        let missing = registry.alias::<i32>("missing");
        assert!(!missing.set(&9));
        assert_eq!(missing.get(), 0);
        assert_eq!(missing.name(), "missing");
    }
}
