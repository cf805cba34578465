//! The process-wide registry shared by every caller in the process.
//!
//! The registry lives for the whole test binary, so each test declares names
//! no other test uses and runs serially.

use anyhow::{Result, ensure};
use flag_registry::{AliasSpec, FlagSpec, FlagType, Visibility, register_flags, registry};
use serial_test::serial;
use std::thread;

#[test]
#[serial]
fn registration_is_visible_through_every_handle() -> Result<()> {
    register_flags([
        FlagSpec::cli_flag("global_port", FlagType::Uint32, "8080", "Listen port").into(),
        AliasSpec::extension_alias("global_old_port", "global_port").into(),
    ])?;
    ensure!(std::ptr::eq(registry(), registry()), "registry was rebuilt");
    ensure!(registry().update_value("global_old_port", "9090"));
    ensure!(registry().value("global_port") == "9090");
    ensure!(registry().description("global_old_port") == "Listen port");
    Ok(())
}

#[test]
#[serial]
fn duplicate_registration_reports_an_error() -> Result<()> {
    let first = FlagSpec::flag("global_once", FlagType::Bool, "true", "Once");
    let second = FlagSpec::flag("global_once", FlagType::Bool, "true", "Twice");
    register_flags([first.into()])?;
    let again = register_flags([second.into()]);
    ensure!(again.is_err(), "second registration succeeded");
    ensure!(registry().description("global_once") == "Once");
    Ok(())
}

#[test]
#[serial]
fn concurrent_updates_are_serialised() -> Result<()> {
    let counter = FlagSpec::hidden_flag("global_counter", FlagType::Int64, "0", "Counter");
    register_flags([counter.into()])?;
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            thread::spawn(move || {
                for step in 0..50 {
                    registry().update_value("global_counter", &(worker * 100 + step).to_string());
                    registry().update_value(&format!("custom_worker_{worker}"), &step.to_string());
                }
            })
        })
        .collect();
    for handle in handles {
        ensure!(handle.join().is_ok(), "worker panicked");
    }
    for worker in 0..8 {
        ensure!(registry().value(&format!("custom_worker_{worker}")) == "49");
    }
    let last = registry().value("global_counter");
    ensure!(last.ends_with("49"), "unexpected final counter {last}");
    ensure!(
        !registry()
            .render_flags(Visibility::new(false, false, false))
            .contains("global_counter"),
        "hidden counter listed"
    );
    Ok(())
}
