//! End-to-end matching over the phone catalog used throughout the docs.

use keymatch::json::{collection_from_json, conditions_from_json, Key};
use keymatch::{
    filter_and_project, match_keys, project, Conditions, Fields, LogicMode, MatchError, Matcher,
    Projection, Value,
};
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

fn phones() -> Vec<Fields> {
    collection_from_json(&json!([
        {"mfr": "Apple", "cost": 100000},
        {"mfr": "Motorola", "cost": 120000},
        {"mfr": "Motorola", "cost": 150000},
    ]))
    .unwrap()
    .into_iter()
    .map(|(_, record)| record)
    .collect()
}

fn run(conditions: serde_json::Value, mode: LogicMode) -> Vec<usize> {
    let conditions = conditions_from_json(&conditions).unwrap();
    let phones = phones();
    match_keys(phones.iter().enumerate(), &conditions, mode)
}

// ============================================================================
// Catalog scenarios
// ============================================================================

#[test]
fn simple_conditions_in_and_mode() {
    let keys = run(json!({"mfr": "Motorola", "cost": 120000}), LogicMode::And);
    assert_eq!(keys, vec![1]);
}

#[test]
fn explicit_conditions_in_and_mode() {
    let keys = run(
        json!([["equals", "mfr", "Motorola"], ["greater-than", "cost", 130000]]),
        LogicMode::And,
    );
    assert_eq!(keys, vec![2]);
}

#[test]
fn explicit_conditions_in_or_mode() {
    let keys = run(
        json!([["equals", "mfr", "Apple"], ["greater-than", "cost", 140000]]),
        LogicMode::Or,
    );
    assert_eq!(keys, vec![0, 2]);
}

#[test]
fn membership_condition() {
    let keys = run(json!([["in", "mfr", ["Apple", "Samsung"]]]), LogicMode::And);
    assert_eq!(keys, vec![0]);
}

#[test]
fn nonexistent_field_matches_nothing_in_either_mode() {
    for mode in [LogicMode::And, LogicMode::Or] {
        let keys = run(json!({"nonexistent_field": "x"}), mode);
        assert!(keys.is_empty(), "{mode} matched {keys:?}");
    }
}

#[test]
fn reindexed_projection_follows_collection_order() {
    let phones = phones();
    let projection = project(phones.iter().enumerate(), &[2, 1], true);

    let Projection::Reindexed(records) = projection else {
        panic!("expected a reindexed projection");
    };
    assert_eq!(records, vec![&phones[1], &phones[2]]);

    let costs: Vec<&Value> = records.iter().map(|record| &record["cost"]).collect();
    assert_eq!(costs, vec![&Value::from(120000), &Value::from(150000)]);
    assert!(records
        .iter()
        .all(|record| record.get("mfr") == Some(&Value::from("Motorola"))));
}

#[test]
fn loose_string_number_equality() {
    let keys = run(json!({"cost": "120000"}), LogicMode::And);
    assert_eq!(keys, vec![1]);

    let keys = run(json!([["identical", "cost", "120000"]]), LogicMode::And);
    assert!(keys.is_empty());
}

#[test]
fn pattern_conditions() {
    let keys = run(json!([["pattern-match", "mfr", "/^moto/i"]]), LogicMode::And);
    assert_eq!(keys, vec![1, 2]);

    let keys = run(json!([["preg", "mfr", "/^moto/iu"]]), LogicMode::And);
    assert_eq!(keys, vec![1, 2]);

    let keys = run(json!([["~", "cost", "^1[05]"]]), LogicMode::And);
    assert_eq!(keys, vec![0, 2]);
}

#[test]
fn unknown_operator_behaves_as_equals() {
    let keys = run(json!([["resembles", "mfr", "Apple"]]), LogicMode::And);
    assert_eq!(keys, vec![0]);
}

#[test]
fn invalid_pattern_is_reported() {
    let err = conditions_from_json(&json!([["preg", "mfr", "/(unclosed/"]])).unwrap_err();
    assert!(matches!(err, MatchError::InvalidPattern { .. }));
}

#[test]
fn named_collection_keeps_member_keys() {
    let catalog = collection_from_json(&json!({
        "iphone": {"mfr": "Apple", "cost": 100000},
        "x2": {"mfr": "Motorola", "cost": 120000},
        "x100": {"mfr": "Motorola", "cost": 150000},
    }))
    .unwrap();

    let matcher = Matcher::new(Conditions::new().eq("mfr", "Motorola"));
    let keys = matcher.keys(catalog.iter().map(|(key, record)| (key.clone(), record)));
    assert_eq!(
        keys,
        vec![Key::Name("x2".into()), Key::Name("x100".into())]
    );
}

// ============================================================================
// Properties over the catalog
// ============================================================================

#[test]
fn and_result_is_subsequence_of_or_result() {
    let condition_sets = [
        json!({"mfr": "Motorola", "cost": 120000}),
        json!([["equals", "mfr", "Apple"], ["greater-than", "cost", 140000]]),
        json!([["less-than", "cost", 130000], ["not-equals", "mfr", "Apple"]]),
    ];

    for conditions in condition_sets {
        let and = run(conditions.clone(), LogicMode::And);
        let or = run(conditions, LogicMode::Or);
        let mut rest = or.iter();
        assert!(
            and.iter().all(|key| rest.any(|other| other == key)),
            "{and:?} is not a subsequence of {or:?}"
        );
    }
}

#[test]
fn empty_conditions_match_every_key() {
    for mode in [LogicMode::And, LogicMode::Or] {
        assert_eq!(run(json!({}), mode), vec![0, 1, 2]);
        assert_eq!(run(json!([]), mode), vec![0, 1, 2]);
    }

    let empty: Vec<Fields> = Vec::new();
    let keys = match_keys(empty.iter().enumerate(), &Conditions::new(), LogicMode::Or);
    assert!(keys.is_empty());
}

#[test]
fn keyed_projection_round_trips_match_keys() {
    let phones = phones();
    let conditions = Conditions::new().eq("mfr", "Apple").gt("cost", 140000);

    for mode in [LogicMode::And, LogicMode::Or] {
        let keys = match_keys(phones.iter().enumerate(), &conditions, mode);
        let projection = filter_and_project(phones.iter().enumerate(), &conditions, mode, false);
        assert_eq!(projection.keys().copied().collect::<Vec<_>>(), keys);

        let once = project(phones.iter().enumerate(), &keys, false);
        assert_eq!(once, projection);
        let twice = project(once.clone().into_keyed().unwrap(), &keys, false);
        assert_eq!(twice, once);
    }
}

#[test]
fn missing_field_excludes_only_unmatched_records_in_or_mode() {
    let phones = phones();
    let conditions = Conditions::new()
        .eq("mfr", "Apple")
        .eq("carrier", "Verizon");

    // The Apple record is accepted before the missing field is reached.
    let or = match_keys(phones.iter().enumerate(), &conditions, LogicMode::Or);
    assert_eq!(or, vec![0]);

    let and = match_keys(phones.iter().enumerate(), &conditions, LogicMode::And);
    assert!(and.is_empty());
}

#[test]
fn lazy_iteration_agrees_with_keys() {
    let phones = phones();
    let matcher = Matcher::new(Conditions::new().gte("cost", 120000));
    let lazy: Vec<usize> = matcher.iter(phones.iter().enumerate()).collect();
    assert_eq!(lazy, matcher.keys(phones.iter().enumerate()));
    assert_eq!(lazy, vec![1, 2]);
}
