//! End-to-end ordering scenarios: resolve items through a constraint
//! table, then sort them.

use ordered_bindings::{
    BindingResolutionService, BindingSorter, ConstraintTable, IdentifiedAs, OrderConstraint,
    OrderingApi, SortError, SortingConfig, TransformerChain, UnresolvableHandling,
};

type Table = ConstraintTable<&'static str>;

fn c() -> OrderConstraint<&'static str> {
    OrderConstraint::new()
}

fn identify(item: &&'static str) -> Option<&'static str> {
    Some(*item)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sort_with(
    config: SortingConfig,
    table: Table,
    items: &[&'static str],
) -> Result<Vec<&'static str>, SortError> {
    init_tracing();
    let resolution = BindingResolutionService::new(identify, table);
    let entries = resolution.entries(items.to_vec())?;
    BindingSorter::with_config(config).sort(entries)
}

fn sort(table: Table, items: &[&'static str]) -> Result<Vec<&'static str>, SortError> {
    sort_with(SortingConfig::default(), table, items)
}

#[test]
fn back_ordered() {
    let table = Table::new()
        .with("First", c().before("Second"))
        .with("Second", c().before("Last"));

    let sorted = sort(table, &["Last", "Second", "First"]).unwrap();

    assert_eq!(sorted, vec!["First", "Second", "Last"]);
}

#[test]
fn front_ordered() {
    let table = Table::new()
        .with("Second", c().after("First"))
        .with("Last", c().after("Second"));

    let sorted = sort(table, &["Second", "Last", "First"]).unwrap();

    assert_eq!(sorted, vec!["First", "Second", "Last"]);
}

#[test]
fn both_ways_ordered() {
    let table = Table::new()
        .with("First", c().before("Second"))
        .with("Second", c().after("First").before("Last"))
        .with("Last", c().after("Second"));

    let sorted = sort(table, &["First", "Second", "Last"]).unwrap();

    assert_eq!(sorted, vec!["First", "Second", "Last"]);
}

#[test]
fn position_conflict_falls_back_to_input_order() {
    let table = Table::new()
        .with("Second", c().after("First"))
        .with("Last", c().after("First"));

    let sorted = sort(table, &["First", "Second", "Last"]).unwrap();

    assert_eq!(sorted, vec!["First", "Second", "Last"]);
}

#[test]
fn before_first_with_negative_position() {
    let table = Table::new().with("PutMeFirst", c().before("Last").with_position(-1));

    let sorted = sort(table, &["First", "Last", "PutMeFirst"]).unwrap();

    assert_eq!(sorted, vec!["PutMeFirst", "First", "Last"]);
}

#[test]
fn before_in_between_with_positive_position() {
    let table = Table::new().with("PutMeInBetween", c().before("Last").with_position(1));

    let sorted = sort(table, &["First", "Last", "PutMeInBetween"]).unwrap();

    assert_eq!(sorted, vec!["First", "PutMeInBetween", "Last"]);
}

#[test]
fn after_in_between_with_negative_position() {
    let table = Table::new().with("PutMeInBetween", c().after("First").with_position(-1));

    let sorted = sort(table, &["First", "Last", "PutMeInBetween"]).unwrap();

    assert_eq!(sorted, vec!["First", "PutMeInBetween", "Last"]);
}

#[test]
fn after_last_with_positive_position() {
    let table = Table::new().with("PutMeLast", c().after("Last").with_position(1));

    let sorted = sort(table, &["First", "PutMeLast", "Last"]).unwrap();

    assert_eq!(sorted, vec!["First", "Last", "PutMeLast"]);
}

#[test]
fn late_leaning_constraint_keeps_unrelated_neighbors_in_place() {
    let table = Table::new()
        .with("B", c().with_position(-1))
        .with("X", c().after("A").with_position(1));

    let sorted = sort(table, &["A", "B", "X"]).unwrap();

    assert_eq!(sorted, vec!["A", "B", "X"]);
}

#[test]
fn circular_reference_fails() {
    let table = Table::new()
        .with("First", c().after("Second"))
        .with("Second", c().after("First"));

    let result = sort(table, &["First", "Second"]);

    assert!(matches!(result, Err(SortError::CycleDetected { .. })));
}

#[test]
fn self_reference_fails() {
    let table = Table::new().with("First", c().after("First"));

    let result = sort(table, &["First"]);

    assert!(matches!(result, Err(SortError::CycleDetected { .. })));
}

#[test]
fn unresolvable_reference_with_throw_handling_fails() {
    let table = Table::new().with("First", c().after("Irresolvable"));

    let result = sort(table, &["First"]);

    assert_eq!(
        result,
        Err(SortError::UnresolvableIdentifier {
            identifier: "Irresolvable".to_string(),
            referenced_by: "First".to_string(),
        })
    );
}

#[test]
fn unresolvable_reference_with_ignore_handling_is_ignored() {
    let table = Table::new().with("First", c().after("Irresolvable"));
    let config = SortingConfig::default().with_unresolvable_handling(UnresolvableHandling::Ignore);

    let sorted = sort_with(config, table, &["First"]).unwrap();

    assert_eq!(sorted, vec!["First"]);
}

#[test]
fn duplicate_identifiers_fail() {
    let chain: TransformerChain<&'static str> = TransformerChain::new().then(
        IdentifiedAs::new()
            .alias("First", "First")
            .alias("Second", "First"),
    );
    let resolution = BindingResolutionService::with_chain(identify, Table::new(), chain);
    let entries = resolution.entries(vec!["First", "Second"]).unwrap();

    let result = BindingSorter::new().sort(entries);

    assert_eq!(
        result,
        Err(SortError::DuplicateIdentifier {
            identifier: "First".to_string()
        })
    );
}

#[test]
fn single_item_unchanged() {
    let sorted = sort(Table::new(), &["Four"]).unwrap();
    assert_eq!(sorted, vec!["Four"]);
}

#[test]
fn no_items() {
    let sorted = sort(Table::new(), &[]).unwrap();
    assert!(sorted.is_empty());
}

#[test]
fn error_messages_name_the_identifiers() {
    let table = Table::new()
        .with("First", c().after("Second"))
        .with("Second", c().after("First"));

    let err = sort(table, &["First", "Second"]).unwrap_err();

    assert_eq!(err.to_string(), "Cycle detected between First and Second");
}
