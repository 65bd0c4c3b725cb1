//! Binding Sorter Service
//!
//! Main service implementing OrderingApi.

use crate::algorithms::{
    build_constraint_graph, build_registry, effective_positions, kahns_topological_sort, normalize,
};
use crate::config::{DefaultPositionProvider, SortingConfig};
use crate::domain::entities::{Registry, SortEntry};
use crate::domain::errors::{Result, SortError};
use crate::domain::invariants::{
    invariant_completeness, invariant_edge_order, invariant_no_cycles,
};
use crate::domain::value_objects::Identifier;
use crate::ports::inbound::OrderingApi;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{debug, info};

type SharedProvider<I> = Arc<dyn DefaultPositionProvider<I> + Send + Sync>;

/// Binding Sorter
///
/// Orchestrates the ordering pipeline:
/// 1. Register identifiers
/// 2. Build the constraint graph
/// 3. Resolve effective positions
/// 4. Normalize implicit edges
/// 5. Execute Kahn's algorithm
/// 6. Map the order back onto the input slots
pub struct BindingSorter<I> {
    config: SortingConfig,
    position_provider: Option<SharedProvider<I>>,
}

impl<I: Identifier> BindingSorter<I> {
    /// Create a new sorter with default config
    pub fn new() -> Self {
        Self::with_config(SortingConfig::default())
    }

    /// Create a new sorter with custom config
    pub fn with_config(config: SortingConfig) -> Self {
        Self {
            config,
            position_provider: None,
        }
    }

    /// Replace the configured default position policy with a custom one.
    pub fn with_position_provider<P>(mut self, provider: P) -> Self
    where
        P: DefaultPositionProvider<I> + Send + Sync + 'static,
    {
        self.position_provider = Some(Arc::new(provider));
        self
    }

    fn positions<T>(&self, registry: &Registry<'_, T, I>) -> Vec<i32> {
        match &self.position_provider {
            Some(provider) => effective_positions(registry, &**provider),
            None => effective_positions(registry, &self.config.default_position),
        }
    }
}

impl<I: Identifier> Default for BindingSorter<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> fmt::Debug for BindingSorter<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSorter")
            .field("config", &self.config)
            .field("custom_position_provider", &self.position_provider.is_some())
            .finish()
    }
}

impl<I: Identifier> OrderingApi<I> for BindingSorter<I> {
    fn sort<T>(&self, entries: Vec<SortEntry<T, I>>) -> Result<Vec<T>> {
        let indices = self.order_indices(&entries)?;
        let items = entries.into_iter().map(|entry| entry.item).collect();
        permute(items, &indices)
    }

    fn order_indices<T>(&self, entries: &[SortEntry<T, I>]) -> Result<Vec<usize>> {
        let identity: Vec<usize> = (0..entries.len()).collect();

        // 1. Register identifiers
        let registry = build_registry(entries)?;

        // 2. Build the constraint graph (reports cycles and unknown references)
        let mut graph = build_constraint_graph(&registry, self.config.unresolvable_handling)?;

        info!(
            entries = entries.len(),
            registered = registry.len(),
            edges = graph.edge_count(),
            "Sorting ordered group"
        );

        if registry.len() < 2 {
            return Ok(identity);
        }

        // 3. Resolve effective positions
        let positions = self.positions(&registry);

        // 4. Normalize implicit edges
        normalize(&mut graph, &positions)?;
        debug_assert!(invariant_no_cycles(&graph));

        // 5. Topological sort
        let order = kahns_topological_sort(&graph, &registry, &positions)?;
        debug_assert!(invariant_completeness(&order, &graph));
        debug_assert!(invariant_edge_order(&order, &graph));

        // 6. Registered items fill the slots registered items occupied
        let mut indices = identity;
        for (slot, vertex) in registry.iter().map(|r| r.original_position).zip(&order) {
            let registered = registry.get(*vertex).ok_or_else(|| {
                SortError::Internal(format!("sorted vertex {vertex} is not registered"))
            })?;
            indices[slot] = registered.original_position;
        }

        debug!(order = ?indices, "Ordered group");
        Ok(indices)
    }

    fn sort_elements<T, K, F>(&self, elements: Vec<SortEntry<T, I>>, group_of: F) -> Result<Vec<T>>
    where
        K: Eq + Hash,
        F: Fn(&T) -> Option<K>,
    {
        // Slots of every group, groups in order of first appearance
        let mut group_index: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (slot, element) in elements.iter().enumerate() {
            let Some(key) = group_of(&element.item) else {
                continue;
            };
            let index = *group_index.entry(key).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[index].push(slot);
        }

        info!(
            elements = elements.len(),
            groups = groups.len(),
            "Sorting grouped elements"
        );

        let mut slots: Vec<Option<SortEntry<T, I>>> = elements.into_iter().map(Some).collect();
        let mut output: Vec<Option<T>> = Vec::with_capacity(slots.len());
        output.resize_with(slots.len(), || None);

        for group_slots in &groups {
            let group: Vec<SortEntry<T, I>> = group_slots
                .iter()
                .map(|&slot| take_slot(&mut slots, slot))
                .collect::<Result<_>>()?;
            let sorted = self.sort(group)?;
            for (&slot, item) in group_slots.iter().zip(sorted) {
                output[slot] = Some(item);
            }
        }

        // Ungrouped elements stay where they were
        for (slot, entry) in slots.into_iter().enumerate() {
            if let Some(entry) = entry {
                output[slot] = Some(entry.item);
            }
        }

        output
            .into_iter()
            .enumerate()
            .map(|(slot, item)| {
                item.ok_or_else(|| SortError::Internal(format!("slot {slot} left empty")))
            })
            .collect()
    }
}

fn take_slot<X>(slots: &mut [Option<X>], slot: usize) -> Result<X> {
    slots
        .get_mut(slot)
        .and_then(Option::take)
        .ok_or_else(|| SortError::Internal(format!("slot {slot} taken twice")))
}

/// Reorder `items` so that position `k` holds `items[indices[k]]`.
fn permute<T>(items: Vec<T>, indices: &[usize]) -> Result<Vec<T>> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    indices
        .iter()
        .map(|&index| take_slot(&mut slots, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DefaultPosition, UnresolvableHandling};
    use crate::domain::value_objects::OrderConstraint;

    type Entry = SortEntry<&'static str, &'static str>;

    fn c() -> OrderConstraint<&'static str> {
        OrderConstraint::new()
    }

    fn item(name: &'static str) -> Entry {
        SortEntry::unconstrained(name, name)
    }

    fn with(name: &'static str, constraint: OrderConstraint<&'static str>) -> Entry {
        SortEntry::new(name, name, Some(constraint))
    }

    #[test]
    fn test_sort_unconstrained_keeps_order() {
        let sorter = BindingSorter::new();

        let sorted = sorter.sort(vec![item("a"), item("b"), item("c")]).unwrap();

        assert_eq!(sorted, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_empty_and_single() {
        let sorter: BindingSorter<&str> = BindingSorter::new();

        assert!(sorter.sort(Vec::<Entry>::new()).unwrap().is_empty());
        assert_eq!(sorter.sort(vec![item("only")]).unwrap(), vec!["only"]);
    }

    #[test]
    fn test_single_self_reference_still_fails() {
        let sorter = BindingSorter::new();

        let result = sorter.sort(vec![with("first", c().after("first"))]);

        assert!(matches!(result, Err(SortError::CycleDetected { .. })));
    }

    #[test]
    fn test_unresolved_entries_keep_their_slot() {
        let sorter = BindingSorter::new();
        let entries = vec![
            item("first"),
            SortEntry::unresolved("stranger"),
            with("put_me_first", c().before("first")),
        ];

        let sorted = sorter.sort(entries).unwrap();

        assert_eq!(sorted, vec!["put_me_first", "stranger", "first"]);
    }

    #[test]
    fn test_order_indices() {
        let sorter = BindingSorter::new();
        let entries = vec![with("b", c().after("a")), item("a")];

        assert_eq!(sorter.order_indices(&entries).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_ignore_unresolvable() {
        let config = SortingConfig::default().with_unresolvable_handling(UnresolvableHandling::Ignore);
        let sorter = BindingSorter::with_config(config);

        let sorted = sorter
            .sort(vec![item("first"), with("second", c().before("missing"))])
            .unwrap();

        assert_eq!(sorted, vec!["first", "second"]);
    }

    #[test]
    fn test_closest_default_position() {
        // Only `after` set: pulled as early as the constraint allows
        let config = SortingConfig::default().with_default_position(DefaultPosition::Closest);
        let sorter = BindingSorter::with_config(config);

        let sorted = sorter
            .sort(vec![item("first"), item("last"), with("in_between", c().after("first"))])
            .unwrap();

        assert_eq!(sorted, vec!["first", "in_between", "last"]);
    }

    #[test]
    fn test_custom_position_provider() {
        let sorter: BindingSorter<&str> = BindingSorter::new()
            .with_position_provider(|id: &&str, _: Option<&OrderConstraint<&str>>| {
                if *id == "late" {
                    10
                } else {
                    0
                }
            });

        let sorted = sorter.sort(vec![item("late"), item("early")]).unwrap();

        // Implicit adjacency still keeps unanchored neighbors in input order
        assert_eq!(sorted, vec!["late", "early"]);
    }

    #[test]
    fn test_custom_position_provider_between_independent_items() {
        let sorter: BindingSorter<&str> = BindingSorter::new()
            .with_position_provider(|id: &&str, _: Option<&OrderConstraint<&str>>| {
                if *id == "late" {
                    10
                } else {
                    0
                }
            });

        let sorted = sorter
            .sort(vec![
                with("late", c().after("anchor")),
                item("anchor"),
                with("early", c().after("anchor")),
            ])
            .unwrap();

        assert_eq!(sorted, vec!["anchor", "early", "late"]);
    }

    #[test]
    fn test_sort_elements_by_group() {
        let sorter = BindingSorter::new();
        let elements = vec![
            SortEntry::unconstrained("x:first", "first"),
            SortEntry::unresolved("loose"),
            SortEntry::unconstrained("y:first", "first"),
            SortEntry::new("x:second", "second", Some(c().before("first"))),
            SortEntry::new("y:second", "second", Some(c().before("first"))),
        ];

        let sorted = sorter
            .sort_elements(elements, |name: &&str| {
                name.split_once(':').map(|(group, _)| group.to_string())
            })
            .unwrap();

        assert_eq!(
            sorted,
            vec!["x:second", "loose", "y:second", "x:first", "y:first"]
        );
    }

    #[test]
    fn test_sort_elements_reports_group_errors() {
        let sorter = BindingSorter::new();
        let elements = vec![
            SortEntry::unconstrained("x:a", "a"),
            SortEntry::unconstrained("x:b", "a"),
        ];

        let result = sorter.sort_elements(elements, |name: &&str| Some(name.starts_with('x')));

        assert_eq!(
            result,
            Err(SortError::DuplicateIdentifier {
                identifier: "a".to_string()
            })
        );
    }
}
