//! Unit tests for error rendering and aggregation.

use rstest::rstest;

use super::FlagError;
use crate::backend::FlagType;

fn unknown(name: &str) -> FlagError {
    FlagError::UnknownFlag { name: name.into() }
}

#[rstest]
#[case(Vec::new(), None)]
#[case(vec![unknown("a")], Some(false))]
#[case(vec![unknown("a"), unknown("b")], Some(true))]
fn aggregates_by_count(#[case] errors: Vec<FlagError>, #[case] aggregate: Option<bool>) {
    let outcome = FlagError::try_aggregate(errors);
    assert_eq!(
        outcome.map(|err| matches!(err, FlagError::Aggregate(_))),
        aggregate
    );
}

#[test]
fn aggregate_display_numbers_entries() {
    let err = FlagError::try_aggregate(vec![
        unknown("first"),
        FlagError::DuplicateFlag {
            name: "second".into(),
        },
    ]);
    let agg = match err {
        Some(FlagError::Aggregate(agg)) => agg,
        other => panic!("expected aggregate, got {other:?}"),
    };
    assert_eq!(agg.len(), 2);
    assert_eq!(
        agg.to_string(),
        "1: unknown flag 'first'\n2: flag 'second' is already defined"
    );
}

#[test]
fn into_result_is_ok_without_errors() {
    assert!(FlagError::into_result(Vec::new()).is_ok());
    assert!(FlagError::into_result(vec![unknown("x")]).is_err());
}

#[test]
fn invalid_value_names_the_type() {
    let err = FlagError::InvalidValue {
        name: "timeout".into(),
        flag_type: FlagType::Int32,
        value: "soon".into(),
    };
    assert_eq!(
        err.to_string(),
        "invalid value 'soon' for int32 flag 'timeout'"
    );
}
