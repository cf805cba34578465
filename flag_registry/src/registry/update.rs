//! Outcome of routing a value write through the registry.

/// How [`super::FlagRegistry::apply_update`] handled a write.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum UpdateOutcome {
    /// The name is a declared flag; the value went to the backend under it.
    Flag,
    /// The name is a declared alias; the value went to the backend under
    /// `target`.
    Alias {
        /// Canonical flag that received the value.
        target: String,
    },
    /// The name carries the custom prefix; the value was stored by the
    /// registry itself.
    Custom,
    /// Nothing matched and nothing changed.
    Rejected,
}

impl UpdateOutcome {
    /// The status reported by [`super::FlagRegistry::update_value`].
    ///
    /// Custom writes are stored but still report `false`.
    #[must_use]
    pub const fn reported(&self) -> bool {
        matches!(self, Self::Flag | Self::Alias { .. })
    }

    /// Whether the write changed any state.
    #[must_use]
    pub const fn stored(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}
