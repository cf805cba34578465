//! In-memory flag backend.

use std::collections::HashMap;

use tracing::trace;

use super::{BackendFlag, FlagBackend, FlagType};
use crate::error::{FlagError, FlagResult};

#[derive(Clone, Debug)]
struct Slot {
    flag_type: FlagType,
    default_value: String,
    current_value: String,
}

#[derive(Clone, Debug)]
enum Entry {
    Owned(Slot),
    /// Shares the storage of the owned flag named by `target`.
    Alias {
        target: String,
    },
}

/// Typed flag storage keyed by name.
///
/// Aliases defined with [`FlagTable::define_alias`] are enumerated like
/// ordinary flags but read and write the storage of their target.
///
/// # Examples
///
/// ```
/// use flag_registry::{FlagBackend, FlagTable, FlagType};
///
/// let mut table = FlagTable::new();
/// table.define("timeout", FlagType::Int32, "30")?;
/// table.define_alias("old_timeout", "timeout")?;
/// table.set_value("old_timeout", "0x10")?;
/// assert_eq!(table.current_value("timeout").as_deref(), Some("16"));
/// # Ok::<_, flag_registry::FlagError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FlagTable {
    entries: HashMap<String, Entry>,
}

impl FlagTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines an owned flag with a default value.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateFlag`] when the name is taken and
    /// [`FlagError::InvalidValue`] when the default does not parse as
    /// `flag_type`.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        flag_type: FlagType,
        default_value: &str,
    ) -> FlagResult<()> {
        let flag_name: String = name.into();
        if self.entries.contains_key(&flag_name) {
            return Err(FlagError::DuplicateFlag { name: flag_name });
        }
        let Some(normalised) = flag_type.normalise(default_value) else {
            return Err(FlagError::InvalidValue {
                name: flag_name,
                flag_type,
                value: default_value.to_owned(),
            });
        };
        trace!(flag = %flag_name, %flag_type, default = %normalised, "defined flag");
        self.entries.insert(
            flag_name,
            Entry::Owned(Slot {
                flag_type,
                default_value: normalised.clone(),
                current_value: normalised,
            }),
        );
        Ok(())
    }

    /// Defines `alias` as a second name for the owned flag `target`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateFlag`] when `alias` is taken,
    /// [`FlagError::UnknownFlag`] when `target` is undefined and
    /// [`FlagError::ChainedAlias`] when `target` is itself an alias.
    pub fn define_alias(&mut self, alias: impl Into<String>, target: &str) -> FlagResult<()> {
        let alias_name: String = alias.into();
        if self.entries.contains_key(&alias_name) {
            return Err(FlagError::DuplicateFlag { name: alias_name });
        }
        match self.entries.get(target) {
            Some(Entry::Owned(_)) => {}
            Some(Entry::Alias { .. }) => {
                return Err(FlagError::ChainedAlias {
                    alias: alias_name,
                    target: target.to_owned(),
                });
            }
            None => {
                return Err(FlagError::UnknownFlag {
                    name: target.to_owned(),
                });
            }
        }
        trace!(alias = %alias_name, %target, "defined flag alias");
        self.entries.insert(
            alias_name,
            Entry::Alias {
                target: target.to_owned(),
            },
        );
        Ok(())
    }

    /// Whether `name` is defined, as a flag or an alias.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of defined names, aliases included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, name: &str) -> Option<&Slot> {
        match self.entries.get(name)? {
            Entry::Owned(slot) => Some(slot),
            Entry::Alias { target } => match self.entries.get(target)? {
                Entry::Owned(slot) => Some(slot),
                Entry::Alias { .. } => None,
            },
        }
    }

    fn resolve_mut(&mut self, name: &str) -> Option<&mut Slot> {
        let owner = match self.entries.get(name)? {
            Entry::Owned(_) => name.to_owned(),
            Entry::Alias { target } => target.clone(),
        };
        match self.entries.get_mut(&owner)? {
            Entry::Owned(slot) => Some(slot),
            Entry::Alias { .. } => None,
        }
    }

    fn snapshot(name: &str, slot: &Slot) -> BackendFlag {
        BackendFlag {
            name: name.to_owned(),
            flag_type: slot.flag_type.as_str().to_owned(),
            default_value: slot.default_value.clone(),
            current_value: slot.current_value.clone(),
            is_default: slot.current_value == slot.default_value,
        }
    }
}

impl FlagBackend for FlagTable {
    fn info(&self, name: &str) -> Option<BackendFlag> {
        self.resolve(name).map(|slot| Self::snapshot(name, slot))
    }

    fn set_value(&mut self, name: &str, value: &str) -> FlagResult<String> {
        let Some(slot) = self.resolve_mut(name) else {
            return Err(FlagError::UnknownFlag {
                name: name.to_owned(),
            });
        };
        let flag_type = slot.flag_type;
        let Some(normalised) = flag_type.normalise(value) else {
            return Err(FlagError::InvalidValue {
                name: name.to_owned(),
                flag_type,
                value: value.to_owned(),
            });
        };
        slot.current_value.clone_from(&normalised);
        Ok(normalised)
    }

    fn all_flags(&self) -> Vec<BackendFlag> {
        self.entries
            .keys()
            .filter_map(|name| self.info(name))
            .collect()
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface registry mistakes"
)]
mod tests {
    use super::{FlagBackend, FlagTable, FlagType};
    use crate::FlagError;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> FlagTable {
        let mut table = FlagTable::new();
        table
            .define("timeout", FlagType::Int32, "30")
            .expect("define timeout");
        table
            .define("verbose", FlagType::Bool, "false")
            .expect("define verbose");
        table
            .define_alias("old_timeout", "timeout")
            .expect("define alias");
        table
    }

    #[rstest]
    fn alias_shares_target_storage(mut table: FlagTable) {
        let stored = table.set_value("old_timeout", "45").expect("set via alias");
        assert_eq!(stored, "45");
        assert_eq!(table.current_value("timeout").as_deref(), Some("45"));
        let alias = table.info("old_timeout").expect("alias info");
        assert_eq!(alias.name, "old_timeout");
        assert_eq!(alias.flag_type, "int32");
        assert!(!alias.is_default);
    }

    #[rstest]
    fn is_default_tracks_value_equality(mut table: FlagTable) {
        assert!(table.info("verbose").expect("info").is_default);
        table.set_value("verbose", "yes").expect("set");
        assert!(!table.info("verbose").expect("info").is_default);
        table.set_value("verbose", "0").expect("reset");
        assert!(table.info("verbose").expect("info").is_default);
    }

    #[rstest]
    fn rejects_invalid_values_without_changing_state(mut table: FlagTable) {
        let err = table.set_value("timeout", "soon").expect_err("invalid int");
        assert!(matches!(err, FlagError::InvalidValue { .. }));
        assert_eq!(table.current_value("timeout").as_deref(), Some("30"));
    }

    #[rstest]
    fn rejects_unknown_names(mut table: FlagTable) {
        assert!(table.info("missing").is_none());
        assert!(matches!(
            table.set_value("missing", "1"),
            Err(FlagError::UnknownFlag { .. })
        ));
    }

    #[rstest]
    #[case("timeout", "timeout")]
    #[case("old_timeout", "timeout")]
    fn rejects_duplicate_names(mut table: FlagTable, #[case] name: &str, #[case] target: &str) {
        assert!(matches!(
            table.define(name, FlagType::String, ""),
            Err(FlagError::DuplicateFlag { .. })
        ));
        assert!(matches!(
            table.define_alias(name, target),
            Err(FlagError::DuplicateFlag { .. })
        ));
    }

    #[rstest]
    fn rejects_alias_chains_and_dangling_targets(mut table: FlagTable) {
        assert!(matches!(
            table.define_alias("older_timeout", "old_timeout"),
            Err(FlagError::ChainedAlias { .. })
        ));
        assert!(matches!(
            table.define_alias("ghost", "nothing"),
            Err(FlagError::UnknownFlag { .. })
        ));
    }

    #[rstest]
    fn enumerates_flags_and_aliases(table: FlagTable) {
        let mut names: Vec<String> = table.all_flags().into_iter().map(|f| f.name).collect();
        names.sort();
        assert_eq!(names, ["old_timeout", "timeout", "verbose"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn rejects_invalid_defaults() {
        let mut table = FlagTable::new();
        assert!(matches!(
            table.define("port", FlagType::Uint32, "-1"),
            Err(FlagError::InvalidValue { .. })
        ));
        assert!(table.is_empty());
    }
}
