//! Unit tests for registry lookups, updates and listings.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface registry mistakes"
)]

use rstest::{fixture, rstest};

use super::{FlagRegistry, UpdateOutcome};
use crate::backend::{FlagBackend, FlagType};
use crate::detail::{FlagDetail, Visibility};

#[fixture]
fn registry() -> FlagRegistry {
    let registry: FlagRegistry = FlagRegistry::default();
    registry.with_backend_mut(|table| {
        table
            .define("timeout", FlagType::Int32, "30")
            .expect("define timeout");
        table
            .define("verbose", FlagType::Bool, "false")
            .expect("define verbose");
        table
            .define("foreign", FlagType::String, "elsewhere")
            .expect("define foreign");
        table
            .define_alias("old_timeout", "timeout")
            .expect("define alias");
    });
    registry.create("timeout", FlagDetail::new("Seconds to wait").cli());
    registry.create("verbose", FlagDetail::new("Verbose output").cli());
    registry.create_alias("old_timeout", FlagDetail::alias_of("timeout", false, true));
    registry
}

#[rstest]
fn update_through_flag_reaches_backend(registry: FlagRegistry) {
    assert_eq!(registry.apply_update("timeout", "60"), UpdateOutcome::Flag);
    assert_eq!(registry.value("timeout"), "60");
    assert!(!registry.is_default("timeout"));
}

#[rstest]
fn update_through_alias_lands_on_target(registry: FlagRegistry) {
    assert_eq!(
        registry.apply_update("old_timeout", "45"),
        UpdateOutcome::Alias {
            target: String::from("timeout")
        }
    );
    assert_eq!(registry.value("timeout"), "45");
    assert_eq!(registry.value("old_timeout"), "45");
}

#[rstest]
#[case("010", "10")]
#[case("0x10", "16")]
#[case("-0", "0")]
fn integer_updates_are_decimal_unless_hex(
    registry: FlagRegistry,
    #[case] text: &str,
    #[case] stored: &str,
) {
    assert!(registry.update_value("timeout", text));
    assert_eq!(registry.value("timeout"), stored);
}

#[rstest]
fn rejected_backend_value_still_reports_success(registry: FlagRegistry) {
    assert!(registry.update_value("timeout", "soon"));
    assert_eq!(registry.value("timeout"), "30");
}

#[rstest]
fn custom_write_is_stored_but_reports_false(registry: FlagRegistry) {
    let outcome = registry.apply_update("custom_region", "eu");
    assert_eq!(outcome, UpdateOutcome::Custom);
    assert!(!outcome.reported());
    assert!(outcome.stored());
    assert!(!registry.update_value("custom_region", "us"));
    assert_eq!(registry.value("custom_region"), "us");
}

#[rstest]
fn undeclared_names_are_ignored(registry: FlagRegistry) {
    assert_eq!(registry.apply_update("foreign", "x"), UpdateOutcome::Rejected);
    assert_eq!(registry.value("foreign"), "elsewhere");
    assert!(registry.custom_names().is_empty());
}

#[rstest]
fn custom_value_shadows_declared_flag(registry: FlagRegistry) {
    assert!(!registry.update_value("custom_mode", "local"));
    registry.with_backend_mut(|table| {
        table
            .define("custom_mode", FlagType::String, "backend")
            .expect("define custom_mode");
    });
    registry.create("custom_mode", FlagDetail::new("Declared custom"));

    assert_eq!(registry.value("custom_mode"), "local");
    assert!(registry.update_value("custom_mode", "rewritten"));
    assert_eq!(registry.value("custom_mode"), "local");
    assert_eq!(
        registry.with_backend(|table| table.current_value("custom_mode")),
        Some(String::from("rewritten"))
    );
}

#[rstest]
#[case("timeout", "Seconds to wait")]
#[case("old_timeout", "Seconds to wait")]
#[case("foreign", "")]
#[case("missing", "")]
fn describes_flags_and_aliases(
    registry: FlagRegistry,
    #[case] name: &str,
    #[case] expected: &str,
) {
    assert_eq!(registry.description(name), expected);
}

#[rstest]
fn chained_and_dangling_aliases_describe_as_empty(registry: FlagRegistry) {
    registry.create_alias("older_timeout", FlagDetail::alias_of("old_timeout", false, true));
    registry.create_alias("ghost", FlagDetail::alias_of("nothing", false, true));
    assert_eq!(registry.description("older_timeout"), "");
    assert_eq!(registry.description("ghost"), "");
}

#[rstest]
fn backend_queries_degrade_for_unknown_names(registry: FlagRegistry) {
    assert_eq!(registry.default_value("timeout").as_deref(), Some("30"));
    assert_eq!(registry.default_value("missing"), None);
    assert!(registry.is_default("verbose"));
    assert!(!registry.is_default("missing"));
    assert_eq!(registry.flag_type("verbose"), "bool");
    assert_eq!(registry.flag_type("missing"), "");
    assert_eq!(registry.value("missing"), "");
}

#[rstest]
fn flags_merge_declared_backend_flags_and_custom_values(registry: FlagRegistry) {
    registry.update_value("custom_region", "eu");
    let flags = registry.flags();
    let names: Vec<&str> = flags.keys().map(String::as_str).collect();
    assert_eq!(names, ["custom_region", "timeout", "verbose"]);

    let timeout = flags.get("timeout").expect("timeout listed");
    assert_eq!(timeout.flag_type, "int32");
    assert_eq!(timeout.default_value, "30");
    assert_eq!(timeout.description, "Seconds to wait");
    assert!(timeout.detail.cli);

    let custom = flags.get("custom_region").expect("custom listed");
    assert_eq!(custom.flag_type, "string");
    assert_eq!(custom.current_value, "eu");
    assert!(custom.default_value.is_empty() && custom.description.is_empty());
}

#[rstest]
fn renders_cli_help_in_aligned_columns(registry: FlagRegistry) {
    let help = registry.render_flags(Visibility::cli_help());
    assert_eq!(
        help,
        concat!(
            "    --flagfile PATH  Line-delimited file of additional flags\n",
            "    --timeout VALUE  Seconds to wait\n",
            "    --verbose        Verbose output\n",
        )
    );
}

#[rstest]
fn renders_external_aliases_only_for_external_listings(registry: FlagRegistry) {
    let help = registry.render_flags(Visibility::new(false, true, false));
    assert_eq!(help, "    --old_timeout VALUE  Seconds to wait\n");
    let shell = registry.render_flags(Visibility::new(true, false, false));
    assert!(shell.is_empty());
}

#[rstest]
fn prints_listing_to_stdout(registry: FlagRegistry) {
    registry.print_flags(Visibility::cli_help());
    registry.print_flags(Visibility::new(true, false, false));
    assert_eq!(registry.value("timeout"), "30");
}

#[rstest]
fn dumps_defaults_not_current_values(registry: FlagRegistry) {
    registry.update_value("timeout", "99");
    let mut out = Vec::new();
    registry
        .dump_default_flags(&mut out, Visibility::cli_help())
        .expect("write dump");
    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "timeout=30\nverbose=false\n"
    );
}

#[test]
fn debug_reports_counts() {
    let registry: FlagRegistry = FlagRegistry::default();
    registry.create("a", FlagDetail::default());
    let rendered = format!("{registry:?}");
    assert!(rendered.contains("flags: 1"), "{rendered}");
}

#[cfg(feature = "serde_json")]
#[rstest]
fn flags_render_as_json_objects(registry: FlagRegistry) {
    registry.update_value("custom_region", "eu");
    let json = registry.flags_json();
    let field = |pointer: &str| json.pointer(pointer).and_then(serde_json::Value::as_str);
    assert_eq!(field("/timeout/type"), Some("int32"));
    assert_eq!(field("/timeout/default_value"), Some("30"));
    assert_eq!(field("/custom_region/current_value"), Some("eu"));
    assert!(json.get("foreign").is_none());
}
