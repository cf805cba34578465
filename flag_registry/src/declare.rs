//! Explicit flag and alias declarations, registered once during startup.
//!
//! A [`FlagSpec`] defines a typed flag in the backend and records its
//! metadata in the registry; an [`AliasSpec`] does the same for a deprecated
//! name. [`FlagRegistry::register`] processes a whole batch, flags before
//! aliases, so declaration order inside the batch does not matter.

use tracing::debug;

use crate::backend::{FlagBackend, FlagTable, FlagType};
use crate::detail::FlagDetail;
use crate::error::{FlagError, FlagResult};
use crate::registry::FlagRegistry;

/// A backend that accepts new flag and alias definitions.
pub trait FlagDefinitions: FlagBackend {
    /// Defines a typed flag with a default value.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is taken or the default is invalid.
    fn declare_flag(
        &mut self,
        name: &str,
        flag_type: FlagType,
        default_value: &str,
    ) -> FlagResult<()>;

    /// Defines `alias` as a second name for `target`.
    ///
    /// # Errors
    ///
    /// Returns an error when the alias is taken or the target is not an
    /// owned flag.
    fn declare_alias(&mut self, alias: &str, target: &str) -> FlagResult<()>;
}

impl FlagDefinitions for FlagTable {
    fn declare_flag(
        &mut self,
        name: &str,
        flag_type: FlagType,
        default_value: &str,
    ) -> FlagResult<()> {
        self.define(name, flag_type, default_value)
    }

    fn declare_alias(&mut self, alias: &str, target: &str) -> FlagResult<()> {
        self.define_alias(alias, target)
    }
}

/// Declaration of a typed flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagSpec {
    name: String,
    flag_type: FlagType,
    default_value: String,
    detail: FlagDetail,
}

impl FlagSpec {
    /// Declares a flag with explicit metadata.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        flag_type: FlagType,
        default_value: impl Into<String>,
        detail: FlagDetail,
    ) -> Self {
        Self {
            name: name.into(),
            flag_type,
            default_value: default_value.into(),
            detail,
        }
    }

    /// A daemon flag: every visibility bit cleared.
    #[must_use]
    pub fn flag(
        name: impl Into<String>,
        flag_type: FlagType,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, flag_type, default_value, FlagDetail::new(description))
    }

    /// A flag listed only for the interactive shell.
    #[must_use]
    pub fn shell_flag(
        name: impl Into<String>,
        flag_type: FlagType,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            flag_type,
            default_value,
            FlagDetail::new(description).shell(),
        )
    }

    /// A flag listed only for extensions.
    #[must_use]
    pub fn extension_flag(
        name: impl Into<String>,
        flag_type: FlagType,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            flag_type,
            default_value,
            FlagDetail::new(description).external(),
        )
    }

    /// A flag listed in the general CLI help.
    #[must_use]
    pub fn cli_flag(
        name: impl Into<String>,
        flag_type: FlagType,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            flag_type,
            default_value,
            FlagDetail::new(description).cli(),
        )
    }

    /// A flag never listed anywhere.
    #[must_use]
    pub fn hidden_flag(
        name: impl Into<String>,
        flag_type: FlagType,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            flag_type,
            default_value,
            FlagDetail::new(description).hidden(),
        )
    }

    /// Name of the declared flag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry metadata for the flag.
    #[must_use]
    pub const fn detail(&self) -> &FlagDetail {
        &self.detail
    }
}

/// Declaration of a deprecated name forwarding to an existing flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasSpec {
    alias: String,
    target: String,
    shell: bool,
    external: bool,
}

impl AliasSpec {
    fn build(
        alias: impl Into<String>,
        target: impl Into<String>,
        shell: bool,
        external: bool,
    ) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
            shell,
            external,
        }
    }

    /// An alias listed nowhere.
    #[must_use]
    pub fn alias(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self::build(alias, target, false, false)
    }

    /// An alias available only in the interactive shell.
    #[must_use]
    pub fn shell_alias(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self::build(alias, target, true, false)
    }

    /// An alias available to extensions and listed in external help.
    #[must_use]
    pub fn extension_alias(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self::build(alias, target, false, true)
    }

    /// The deprecated name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.alias
    }

    /// The flag the alias forwards to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Registry metadata recorded for the alias.
    #[must_use]
    pub fn detail(&self) -> FlagDetail {
        FlagDetail::alias_of(self.target.clone(), self.shell, self.external)
    }
}

/// One entry in a registration batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    /// A typed flag.
    Flag(FlagSpec),
    /// A deprecated alias.
    Alias(AliasSpec),
}

impl From<FlagSpec> for Declaration {
    fn from(spec: FlagSpec) -> Self {
        Self::Flag(spec)
    }
}

impl From<AliasSpec> for Declaration {
    fn from(spec: AliasSpec) -> Self {
        Self::Alias(spec)
    }
}

impl<B: FlagDefinitions> FlagRegistry<B> {
    /// Defines every declaration in the backend and records its metadata.
    ///
    /// Flags are processed before aliases. A declaration the backend refuses
    /// is skipped; the rest are still registered.
    ///
    /// # Errors
    ///
    /// Returns the backend's error for a single failed declaration, or
    /// [`FlagError::Aggregate`] when several failed.
    pub fn register<I>(&self, declarations: I) -> FlagResult<()>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let (flags, aliases): (Vec<_>, Vec<_>) = declarations
            .into_iter()
            .partition(|declaration| matches!(declaration, Declaration::Flag(_)));
        let mut errors = Vec::new();

        for declaration in flags.into_iter().chain(aliases) {
            let defined = match &declaration {
                Declaration::Flag(spec) => self.with_backend_mut(|backend| {
                    backend.declare_flag(&spec.name, spec.flag_type, &spec.default_value)
                }),
                Declaration::Alias(spec) => self
                    .with_backend_mut(|backend| backend.declare_alias(&spec.alias, &spec.target)),
            };
            if let Err(err) = defined {
                errors.push(err);
                continue;
            }
            match declaration {
                Declaration::Flag(spec) => {
                    debug!(flag = %spec.name, "registered flag");
                    self.create(spec.name, spec.detail);
                }
                Declaration::Alias(spec) => {
                    debug!(alias = %spec.alias, target = %spec.target, "registered flag alias");
                    let detail = spec.detail();
                    self.create_alias(spec.alias, detail);
                }
            }
        }
        FlagError::into_result(errors)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface registry mistakes"
)]
mod tests {
    use super::{AliasSpec, Declaration, FlagSpec};
    use crate::{FlagError, FlagRegistry, FlagType, Visibility};
    use rstest::rstest;

    #[test]
    fn aliases_may_precede_their_targets() {
        let registry: FlagRegistry = FlagRegistry::default();
        registry
            .register([
                AliasSpec::extension_alias("old_timeout", "timeout").into(),
                FlagSpec::cli_flag("timeout", FlagType::Int32, "30", "Seconds to wait").into(),
            ])
            .expect("register");
        assert!(registry.contains_flag("timeout"));
        assert!(registry.contains_alias("old_timeout"));
        assert_eq!(registry.flag_type("old_timeout"), "int32");
    }

    #[test]
    fn failures_are_aggregated_and_successes_kept() {
        let registry: FlagRegistry = FlagRegistry::default();
        let err = registry
            .register([
                FlagSpec::flag("port", FlagType::Uint32, "not a port", "Port").into(),
                FlagSpec::flag("host", FlagType::String, "localhost", "Host").into(),
                AliasSpec::alias("old_port", "port").into(),
            ])
            .expect_err("two failures");
        match err {
            FlagError::Aggregate(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected aggregate, got {other:?}"),
        }
        assert!(registry.contains_flag("host"));
        assert!(!registry.contains_flag("port"));
        assert!(!registry.contains_alias("old_port"));
    }

    #[rstest]
    #[case(FlagSpec::flag("f", FlagType::Bool, "0", "d"), [false, false, false, false])]
    #[case(FlagSpec::shell_flag("f", FlagType::Bool, "0", "d"), [true, false, false, false])]
    #[case(FlagSpec::extension_flag("f", FlagType::Bool, "0", "d"), [false, true, false, false])]
    #[case(FlagSpec::cli_flag("f", FlagType::Bool, "0", "d"), [false, false, true, false])]
    #[case(FlagSpec::hidden_flag("f", FlagType::Bool, "0", "d"), [false, false, false, true])]
    fn constructors_set_one_visibility_bit(#[case] spec: FlagSpec, #[case] bits: [bool; 4]) {
        let detail = spec.detail();
        assert_eq!(
            [detail.shell, detail.external, detail.cli, detail.hidden],
            bits
        );
    }

    #[test]
    fn alias_detail_stores_the_target() {
        let spec = AliasSpec::shell_alias("old", "new");
        let detail = spec.detail();
        assert_eq!(detail.target(), "new");
        assert!(detail.shell && detail.hidden && !detail.cli);
        assert_eq!(Declaration::from(spec.clone()), Declaration::Alias(spec));
    }

    #[test]
    fn registered_hidden_flags_stay_out_of_listings() {
        let registry: FlagRegistry = FlagRegistry::default();
        registry
            .register([FlagSpec::hidden_flag("secret", FlagType::String, "", "Secret").into()])
            .expect("register");
        assert!(
            registry
                .render_flags(Visibility::new(false, false, false))
                .is_empty()
        );
    }
}
