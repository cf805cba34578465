//! Registries seeded with a small, known flag set.

use anyhow::{Context, Result};
use flag_registry::{AliasSpec, Declaration, FlagRegistry, FlagSpec, FlagType};

/// The flag set used by most integration tests.
///
/// | name | type | default | visibility |
/// |---|---|---|---|
/// | `timeout` | int32 | `30` | cli |
/// | `verbose` | bool | `false` | cli |
/// | `history_file` | string | `~/.history` | shell |
/// | `extensions_socket` | string | `/var/run/ext.sock` | external |
/// | `watchdog_level` | int32 | `0` | none (daemon) |
/// | `debug_secret` | bool | `false` | hidden, cli |
/// | `old_timeout` | alias of `timeout` | | external |
/// | `legacy_verbose` | alias of `verbose` | | none |
#[must_use]
pub fn sample_declarations() -> Vec<Declaration> {
    let mut hidden_cli =
        FlagSpec::hidden_flag("debug_secret", FlagType::Bool, "false", "Internal debugging")
            .detail()
            .clone();
    hidden_cli.cli = true;
    vec![
        FlagSpec::cli_flag("timeout", FlagType::Int32, "30", "Seconds to wait").into(),
        FlagSpec::cli_flag("verbose", FlagType::Bool, "false", "Verbose output").into(),
        FlagSpec::shell_flag(
            "history_file",
            FlagType::String,
            "~/.history",
            "Shell history",
        )
        .into(),
        FlagSpec::extension_flag(
            "extensions_socket",
            FlagType::String,
            "/var/run/ext.sock",
            "Extension socket path",
        )
        .into(),
        FlagSpec::flag("watchdog_level", FlagType::Int32, "0", "Watchdog level").into(),
        FlagSpec::new("debug_secret", FlagType::Bool, "false", hidden_cli).into(),
        AliasSpec::extension_alias("old_timeout", "timeout").into(),
        AliasSpec::alias("legacy_verbose", "verbose").into(),
    ]
}

/// A fresh registry holding [`sample_declarations`].
///
/// # Errors
///
/// Returns an error if any sample declaration is rejected.
pub fn sample_registry() -> Result<FlagRegistry> {
    let registry: FlagRegistry = FlagRegistry::default();
    registry
        .register(sample_declarations())
        .context("register sample flags")?;
    Ok(registry)
}
