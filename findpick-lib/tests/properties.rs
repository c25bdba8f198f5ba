//! Property tests for the sort state machine, filtering and row building.

use findpick_lib::model::Record;
use findpick_lib::model::Value;
use findpick_lib::schema::FieldConfig;
use findpick_lib::schema::FieldDefinition;
use findpick_lib::schema::FieldKind;
use findpick_lib::schema::RowDefinition;
use findpick_lib::schema::SortOrder;
use proptest::prelude::*;

const KINDS: [FieldKind; 6] = [
    FieldKind::String,
    FieldKind::Date,
    FieldKind::DateTime,
    FieldKind::Number,
    FieldKind::Currency,
    FieldKind::Boolean,
];

fn kind_strategy() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(KINDS.to_vec())
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        "[ a-zA-Z0-9/:-]{0,16}".prop_map(Value::from),
    ]
}

fn row_definition(kinds: &[FieldKind]) -> RowDefinition {
    let mut defn = RowDefinition::new();
    for (i, kind) in kinds.iter().enumerate() {
        let config = FieldConfig::new(format!("f{i}"), format!("F{i}")).filterable(true);
        defn.push_field(*kind, config);
    }
    defn
}

fn sorted_count(defn: &RowDefinition) -> usize {
    defn.field_defns()
        .iter()
        .filter(|f| f.sort_order().is_sorted())
        .count()
}

proptest! {
    /// Three toggles of the same field return it to unsorted.
    #[test]
    fn prop_three_toggles_return_to_unsorted(kinds in prop::collection::vec(kind_strategy(), 1..6), pick in any::<prop::sample::Index>()) {
        let mut defn = row_definition(&kinds);
        let id = defn.field_defns()[pick.index(kinds.len())].id().unwrap();

        let first = defn.sort_toggle(id).unwrap();
        prop_assert_eq!(first, SortOrder::Ascending);
        let second = defn.sort_toggle(id).unwrap();
        prop_assert_eq!(second, SortOrder::Descending);
        let third = defn.sort_toggle(id).unwrap();
        prop_assert_eq!(third, SortOrder::Unsorted);
        prop_assert_eq!(defn.field(id).unwrap().sort(), 0);
    }

    /// Any toggle sequence leaves at most one sorted field.
    #[test]
    fn prop_at_most_one_sorted(kinds in prop::collection::vec(kind_strategy(), 1..6), toggles in prop::collection::vec(any::<prop::sample::Index>(), 0..20)) {
        let mut defn = row_definition(&kinds);
        for toggle in toggles {
            let id = defn.field_defns()[toggle.index(kinds.len())].id().unwrap();
            defn.sort_toggle(id).unwrap();
            prop_assert!(sorted_count(&defn) <= 1);
        }
    }

    /// Boolean fields are never filterable, whatever the config says.
    #[test]
    fn prop_boolean_never_filterable(filterable in any::<bool>()) {
        let field = FieldDefinition::boolean(FieldConfig::new("b", "B").filterable(filterable));
        prop_assert!(!field.filterable());
    }

    /// An empty needle matches every present display.
    #[test]
    fn prop_empty_needle_matches_present_display(kind in kind_strategy(), raw in value_strategy()) {
        let field = FieldDefinition::new(kind, FieldConfig::new("x", "X"));
        let instance = field.make_instance(raw);
        prop_assert_eq!(instance.matches(""), instance.display().is_some());
    }

    /// Matching ignores the case of both sides.
    #[test]
    fn prop_matches_ignores_case(text in "[a-zA-Z]{1,12}", start in 0usize..12, len in 1usize..12) {
        let field = FieldDefinition::string(FieldConfig::new("s", "S"));
        let instance = field.make_instance(Value::from(text.as_str()));
        let start = start.min(text.len() - 1);
        let end = (start + len).min(text.len());
        let needle = &text[start..end];
        prop_assert!(instance.matches(&needle.to_uppercase()));
        prop_assert!(instance.matches(&needle.to_lowercase()));
    }

    /// A row has one field instance per column carrying that column's raw value.
    #[test]
    fn prop_row_instance_mirrors_record(kinds in prop::collection::vec(kind_strategy(), 0..6), values in prop::collection::vec(value_strategy(), 6)) {
        let defn = row_definition(&kinds);
        let record: Record = values
            .iter()
            .enumerate()
            .map(|(i, value)| (format!("f{i}"), value.clone()))
            .collect();

        let row = defn.make_row_instance(record.clone(), 0usize);
        prop_assert_eq!(row.fields().len(), kinds.len());
        for (instance, field_defn) in row.fields().iter().zip(defn.field_defns()) {
            prop_assert_eq!(instance.data(), &record.value(field_defn.name()));
        }
    }

    /// `assign_found` reports a match exactly when some field matches.
    #[test]
    fn prop_assign_found_agrees_with_fields(kinds in prop::collection::vec(kind_strategy(), 0..6), values in prop::collection::vec(value_strategy(), 6), needle in "[a-z0-9]{0,3}") {
        let defn = row_definition(&kinds);
        let record: Record = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("f{i}"), value))
            .collect();

        let mut row = defn.make_row_instance(record, 0usize);
        let expected = row.fields().iter().any(|f| f.matches(&needle));
        prop_assert_eq!(row.assign_found(&needle), expected);
        prop_assert_eq!(row.not_found(), !expected);
    }

    /// Currency columns default to two decimals.
    #[test]
    fn prop_currency_defaults_to_two_decimals(cents in 1i64..10_000_000) {
        let field = FieldDefinition::currency(FieldConfig::new("c", "C"));
        prop_assert_eq!(field.decimals(), Some(2));
        let text = field.text_value(&Value::from(cents)).unwrap();
        let fraction = text.split_once('.').map(|(_, f)| f.len());
        prop_assert_eq!(fraction, Some(2));
    }
}
