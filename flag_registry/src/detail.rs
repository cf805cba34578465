//! Metadata records kept by the registry and returned for introspection.

use serde::Serialize;

/// Registry metadata for a declared flag or alias.
///
/// For an alias entry `description` holds the name of the flag the alias
/// forwards to, not human-readable text.
///
/// # Examples
///
/// ```
/// use flag_registry::FlagDetail;
///
/// let detail = FlagDetail::new("Seconds to wait").cli();
/// assert!(detail.cli && !detail.shell && !detail.hidden);
///
/// let alias = FlagDetail::alias_of("timeout", false, true);
/// assert_eq!(alias.target(), "timeout");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FlagDetail {
    /// Human text for a flag; the target flag name for an alias.
    pub description: String,
    /// Shown only in interactive shell listings.
    pub shell: bool,
    /// Shown only to external extension contexts.
    pub external: bool,
    /// Shown in the general CLI help listing.
    pub cli: bool,
    /// Never shown in any listing.
    pub hidden: bool,
}

impl FlagDetail {
    /// Metadata with a description and every visibility bit cleared.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Alias metadata pointing at `target`.
    ///
    /// Aliases never appear in the CLI listing and are marked hidden; only
    /// the `external` bit decides whether a listing shows them.
    #[must_use]
    pub fn alias_of(target: impl Into<String>, shell: bool, external: bool) -> Self {
        Self {
            description: target.into(),
            shell,
            external,
            cli: false,
            hidden: true,
        }
    }

    /// The forwarding target of an alias entry.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.description
    }

    /// Marks the entry as shell-only.
    #[must_use]
    pub const fn shell(mut self) -> Self {
        self.shell = true;
        self
    }

    /// Marks the entry as visible to extensions.
    #[must_use]
    pub const fn external(mut self) -> Self {
        self.external = true;
        self
    }

    /// Marks the entry as part of the CLI listing.
    #[must_use]
    pub const fn cli(mut self) -> Self {
        self.cli = true;
        self
    }

    /// Suppresses the entry from every listing.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Merged view of a flag: backend type and values plus registry metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FlagInfo {
    /// Backend type name, `string` for custom entries.
    #[serde(rename = "type")]
    pub flag_type: String,
    /// Description stored in the registry.
    pub description: String,
    /// Backend default value; empty for custom entries.
    pub default_value: String,
    /// Current value.
    pub current_value: String,
    /// Registry metadata; all defaults for custom entries.
    pub detail: FlagDetail,
}

/// Listing context requested by a caller of the print and dump operations.
///
/// Each axis must match a flag's own bit exactly for the flag to be listed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    /// Listing for the interactive shell.
    pub shell: bool,
    /// Listing for extensions.
    pub external: bool,
    /// Listing for general CLI help.
    pub cli: bool,
}

impl Visibility {
    /// Builds a context from the three axes.
    #[must_use]
    pub const fn new(shell: bool, external: bool, cli: bool) -> Self {
        Self {
            shell,
            external,
            cli,
        }
    }

    /// The general CLI help context.
    #[must_use]
    pub const fn cli_help() -> Self {
        Self::new(false, false, true)
    }

    /// Whether a declared flag with `detail` is listed in this context.
    ///
    /// Hidden flags are never listed.
    #[must_use]
    pub const fn admits_flag(self, detail: &FlagDetail) -> bool {
        !detail.hidden
            && self.shell == detail.shell
            && self.external == detail.external
            && self.cli == detail.cli
    }

    /// Whether an alias with `detail` is listed in this context.
    ///
    /// Aliases appear only in external listings, and only when marked
    /// external.
    #[must_use]
    pub const fn admits_alias(self, detail: &FlagDetail) -> bool {
        self.external && detail.external
    }
}

#[cfg(test)]
mod tests {
    use super::{FlagDetail, Visibility};
    use rstest::rstest;

    #[rstest]
    #[case(Visibility::new(false, false, true), true)]
    #[case(Visibility::new(false, false, false), false)]
    #[case(Visibility::new(true, false, true), false)]
    #[case(Visibility::new(false, true, true), false)]
    fn flag_axes_must_match_exactly(#[case] visibility: Visibility, #[case] listed: bool) {
        let detail = FlagDetail::new("d").cli();
        assert_eq!(visibility.admits_flag(&detail), listed);
    }

    #[rstest]
    #[case(false, false, false)]
    #[case(false, false, true)]
    #[case(false, true, false)]
    #[case(true, true, true)]
    fn hidden_flags_are_never_admitted(
        #[case] shell: bool,
        #[case] external: bool,
        #[case] cli: bool,
    ) {
        let mut detail = FlagDetail::new("d").hidden();
        detail.shell = shell;
        detail.external = external;
        detail.cli = cli;
        assert!(!Visibility::new(shell, external, cli).admits_flag(&detail));
    }

    #[rstest]
    #[case(true, true, true)]
    #[case(true, false, false)]
    #[case(false, true, false)]
    #[case(false, false, false)]
    fn aliases_need_external_on_both_sides(
        #[case] alias_external: bool,
        #[case] requested_external: bool,
        #[case] listed: bool,
    ) {
        let alias = FlagDetail::alias_of("timeout", false, alias_external);
        let visibility = Visibility::new(false, requested_external, false);
        assert_eq!(visibility.admits_alias(&alias), listed);
    }

    #[test]
    fn alias_detail_is_hidden_and_not_cli() {
        let alias = FlagDetail::alias_of("timeout", true, false);
        assert!(alias.hidden && alias.shell && !alias.cli && !alias.external);
    }
}
