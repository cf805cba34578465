//! Applying flag values gathered from the environment and figment sources.

use anyhow::{Result, ensure};
use figment::Figment;
use figment::providers::{Format, Toml};
use flag_registry::{FlagError, FlagOverrides};
use test_helpers::figment::with_env;
use test_helpers::fixtures::sample_registry;

#[test]
fn environment_overrides_use_prefix_and_lowercase_names() -> Result<()> {
    let overrides = with_env(
        &[
            ("FLAGTEST_TIMEOUT", "45"),
            ("FLAGTEST_OLD_TIMEOUT", "50"),
            ("FLAGTEST_CUSTOM_TEAM", "core"),
            ("UNRELATED_TIMEOUT", "1"),
        ],
        || Ok(FlagOverrides::from_env("FLAGTEST_")),
    )?;
    ensure!(overrides.len() == 3, "collected {overrides:?}");
    ensure!(overrides.get("timeout") == Some("45"));
    ensure!(overrides.get("custom_team") == Some("core"));
    Ok(())
}

#[test]
fn applying_routes_aliases_and_custom_names() -> Result<()> {
    let registry = sample_registry()?;
    let overrides = with_env(
        &[
            ("FLAGTEST_OLD_TIMEOUT", "50"),
            ("FLAGTEST_CUSTOM_TEAM", "core"),
            ("FLAGTEST_NOT_A_FLAG", "x"),
        ],
        || Ok(FlagOverrides::from_env("FLAGTEST_")),
    )?;
    let report = overrides.apply(&registry);
    ensure!(report.aliases == ["old_timeout"], "report {report:?}");
    ensure!(report.custom == ["custom_team"], "report {report:?}");
    ensure!(report.ignored == ["not_a_flag"], "report {report:?}");
    ensure!(registry.value("timeout") == "50");
    ensure!(registry.value("custom_team") == "core");
    Ok(())
}

#[test]
fn figment_sources_render_scalars_as_text() -> Result<()> {
    let figment = Figment::from(Toml::string(
        "timeout = 60\nverbose = true\nhistory_file = \"/tmp/h\"\n",
    ));
    let overrides = FlagOverrides::from_figment(&figment)?;
    ensure!(overrides.get("timeout") == Some("60"));
    ensure!(overrides.get("verbose") == Some("true"));

    let registry = sample_registry()?;
    let report = overrides.apply(&registry);
    ensure!(report.flags.len() == 3, "report {report:?}");
    ensure!(registry.value("verbose") == "true");
    ensure!(registry.value("history_file") == "/tmp/h");
    Ok(())
}

#[test]
fn nested_tables_fail_to_gather() {
    let figment = Figment::from(Toml::string("[section]\nkey = 1\n"));
    let result = FlagOverrides::from_figment(&figment);
    assert!(matches!(result, Err(FlagError::Gathering(_))));
}

#[test]
fn later_sources_override_earlier_ones() -> Result<()> {
    let file = FlagOverrides::from_figment(&Figment::from(Toml::string("timeout = 10\n")))?;
    let env = with_env(&[("FLAGTEST_TIMEOUT", "20")], || {
        Ok(FlagOverrides::from_env("FLAGTEST_"))
    })?;
    ensure!(file.merge(env).get("timeout") == Some("20"));
    Ok(())
}
