//! Lock-protected registry state.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace, warn};

use super::{CUSTOM_PREFIX, UpdateOutcome};
use crate::backend::{BackendFlag, FlagBackend};
use crate::detail::{FlagDetail, FlagInfo, Visibility};

pub(super) struct RegistryState<B> {
    pub(super) flags: HashMap<String, FlagDetail>,
    pub(super) aliases: HashMap<String, FlagDetail>,
    pub(super) custom: BTreeMap<String, String>,
    pub(super) backend: B,
}

impl<B: FlagBackend> RegistryState<B> {
    pub(super) fn new(backend: B) -> Self {
        Self {
            flags: HashMap::new(),
            aliases: HashMap::new(),
            custom: BTreeMap::new(),
            backend,
        }
    }

    pub(super) fn value(&self, name: &str) -> String {
        if let Some(custom) = self.custom.get(name) {
            return custom.clone();
        }
        self.backend.current_value(name).unwrap_or_default()
    }

    pub(super) fn apply_update(&mut self, name: &str, value: &str) -> UpdateOutcome {
        if self.flags.contains_key(name) {
            self.forward(name, name, value);
            return UpdateOutcome::Flag;
        }
        if let Some(target) = self.aliases.get(name).map(|alias| alias.target().to_owned()) {
            debug!(alias = %name, %target, "forwarding update through alias");
            self.forward(name, &target, value);
            return UpdateOutcome::Alias { target };
        }
        if name.starts_with(CUSTOM_PREFIX) {
            debug!(flag = %name, "stored custom flag value");
            self.custom.insert(name.to_owned(), value.to_owned());
            return UpdateOutcome::Custom;
        }
        debug!(flag = %name, "ignored update for undeclared flag");
        UpdateOutcome::Rejected
    }

    fn forward(&mut self, name: &str, target: &str, value: &str) {
        if let Err(err) = self.backend.set_value(target, value) {
            warn!(flag = %name, %target, error = %err, "flag backend rejected value");
        }
    }

    /// Description of a flag, or of the flag an alias points at.
    ///
    /// Alias targets are followed exactly one hop; a target that is not a
    /// declared flag yields an empty string.
    pub(super) fn description(&self, name: &str) -> String {
        if let Some(detail) = self.flags.get(name) {
            return detail.description.clone();
        }
        self.aliases
            .get(name)
            .and_then(|alias| self.flags.get(alias.target()))
            .map(|detail| detail.description.clone())
            .unwrap_or_default()
    }

    pub(super) fn flags(&self) -> BTreeMap<String, FlagInfo> {
        let mut merged: BTreeMap<String, FlagInfo> = self
            .backend
            .all_flags()
            .into_iter()
            .filter_map(|flag| {
                let detail = self.flags.get(&flag.name)?;
                Some((
                    flag.name,
                    FlagInfo {
                        flag_type: flag.flag_type,
                        description: detail.description.clone(),
                        default_value: flag.default_value,
                        current_value: flag.current_value,
                        detail: detail.clone(),
                    },
                ))
            })
            .collect();
        for (name, value) in &self.custom {
            merged.insert(
                name.clone(),
                FlagInfo {
                    flag_type: String::from("string"),
                    current_value: value.clone(),
                    ..FlagInfo::default()
                },
            );
        }
        merged
    }

    /// Backend flags that pass the listing filter, ordered by name.
    pub(super) fn listed(&self, visibility: Visibility) -> Vec<BackendFlag> {
        let ordered: BTreeMap<String, BackendFlag> = self
            .backend
            .all_flags()
            .into_iter()
            .map(|flag| (flag.name.clone(), flag))
            .collect();
        ordered
            .into_values()
            .filter(|flag| self.is_listed(&flag.name, visibility))
            .collect()
    }

    fn is_listed(&self, name: &str, visibility: Visibility) -> bool {
        let listed = self.flags.get(name).map_or_else(
            || {
                self.aliases
                    .get(name)
                    .is_some_and(|alias| visibility.admits_alias(alias))
            },
            |detail| visibility.admits_flag(detail),
        );
        if !listed {
            trace!(flag = %name, ?visibility, "skipped flag in listing");
        }
        listed
    }

    /// Width of the name column: longest declared flag name plus room for
    /// the value placeholder.
    pub(super) fn name_column(&self) -> usize {
        self.flags.keys().map(String::len).max().unwrap_or(0) + super::VALUE_PLACEHOLDER.len()
    }
}
