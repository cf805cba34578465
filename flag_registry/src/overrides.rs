//! Flag values gathered from the environment and other figment sources.
//!
//! Overrides are plain `name -> text` pairs. Applying them routes each pair
//! through [`FlagRegistry::apply_update`], so aliases forward to their
//! canonical flag and `custom_` names land in the custom store exactly as a
//! direct update would.

use std::collections::BTreeMap;

use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::backend::FlagBackend;
use crate::error::{FlagError, FlagResult};
use crate::registry::{FlagRegistry, UpdateOutcome};

/// Scalar accepted from structured sources such as TOML.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl ScalarValue {
    fn into_text(self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Signed(value) => value.to_string(),
            Self::Unsigned(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

/// A set of flag values to apply to a registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    values: BTreeMap<String, String>,
}

impl FlagOverrides {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Collects every environment variable starting with `prefix`.
    ///
    /// The prefix is stripped and the remainder lower-cased, so with prefix
    /// `APP_` the variable `APP_TIMEOUT=45` becomes `timeout = "45"`. Values
    /// are kept as raw text.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use flag_registry::FlagOverrides;
    /// let overrides = FlagOverrides::from_env("APP_");
    /// let _ = overrides.len();
    /// ```
    #[must_use]
    pub fn from_env(prefix: &str) -> Self {
        let values = Env::prefixed(prefix)
            .iter()
            .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
            .collect();
        Self { values }
    }

    /// Extracts a flat table of scalar values from `figment`.
    ///
    /// Booleans and numbers are rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Gathering`] when a provider fails or a value is
    /// not a scalar.
    pub fn from_figment(figment: &Figment) -> FlagResult<Self> {
        let table: BTreeMap<String, ScalarValue> =
            figment.extract().map_err(FlagError::gathering)?;
        Ok(Self {
            values: table
                .into_iter()
                .map(|(key, value)| (key, value.into_text()))
                .collect(),
        })
    }

    /// Sets one override, replacing any earlier value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Layers `other` over `self`; `other` wins on conflicts.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.values.extend(other.values);
        self
    }

    /// Value recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Writes every override into `registry`.
    pub fn apply<B: FlagBackend>(&self, registry: &FlagRegistry<B>) -> OverrideReport {
        let mut report = OverrideReport::default();
        for (name, value) in self.iter() {
            let owned = name.to_owned();
            match registry.apply_update(name, value) {
                UpdateOutcome::Flag => report.flags.push(owned),
                UpdateOutcome::Alias { .. } => report.aliases.push(owned),
                UpdateOutcome::Custom => report.custom.push(owned),
                UpdateOutcome::Rejected => {
                    warn!(flag = %name, "override names no declared flag");
                    report.ignored.push(owned);
                }
            }
        }
        debug!(
            applied = report.applied(),
            ignored = report.ignored.len(),
            "applied flag overrides"
        );
        report
    }
}

impl FromIterator<(String, String)> for FlagOverrides {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Where each override went when applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideReport {
    /// Names written to declared flags.
    pub flags: Vec<String>,
    /// Alias names forwarded to their target flag.
    pub aliases: Vec<String>,
    /// Names stored as custom values.
    pub custom: Vec<String>,
    /// Names that matched nothing.
    pub ignored: Vec<String>,
}

impl OverrideReport {
    /// Number of overrides that changed state.
    #[must_use]
    pub const fn applied(&self) -> usize {
        self.flags.len() + self.aliases.len() + self.custom.len()
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface registry mistakes"
)]
mod tests {
    use super::{FlagOverrides, ScalarValue};
    use crate::{AliasSpec, FlagRegistry, FlagSpec, FlagType};
    use rstest::rstest;

    #[rstest]
    #[case(ScalarValue::Bool(true), "true")]
    #[case(ScalarValue::Signed(-3), "-3")]
    #[case(ScalarValue::Unsigned(u64::MAX), "18446744073709551615")]
    #[case(ScalarValue::Float(1.5), "1.5")]
    #[case(ScalarValue::Text(String::from("eu")), "eu")]
    fn renders_scalars_as_text(#[case] value: ScalarValue, #[case] expected: &str) {
        assert_eq!(value.into_text(), expected);
    }

    #[test]
    fn later_layers_win() {
        let mut base = FlagOverrides::new();
        base.insert("timeout", "10");
        base.insert("verbose", "true");
        let mut top = FlagOverrides::new();
        top.insert("timeout", "20");
        let merged = base.merge(top);
        assert_eq!(merged.get("timeout"), Some("20"));
        assert_eq!(merged.get("verbose"), Some("true"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn apply_routes_each_name() {
        let registry: FlagRegistry = FlagRegistry::default();
        registry
            .register([
                FlagSpec::cli_flag("timeout", FlagType::Int32, "30", "Seconds").into(),
                AliasSpec::alias("old_timeout", "timeout").into(),
            ])
            .expect("register");
        let overrides: FlagOverrides = [
            ("old_timeout", "45"),
            ("custom_zone", "b"),
            ("unknown", "x"),
            ("timeout", "50"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect();

        let report = overrides.apply(&registry);
        assert_eq!(report.flags, ["timeout"]);
        assert_eq!(report.aliases, ["old_timeout"]);
        assert_eq!(report.custom, ["custom_zone"]);
        assert_eq!(report.ignored, ["unknown"]);
        assert_eq!(report.applied(), 3);
        // `old_timeout` sorts first, so the canonical name's write lands last.
        assert_eq!(registry.value("timeout"), "50");
        assert_eq!(registry.value("custom_zone"), "b");
    }
}
