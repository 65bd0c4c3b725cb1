//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::SortEntry;
use crate::domain::errors::Result;
use crate::domain::value_objects::Identifier;
use std::hash::Hash;

/// Primary ordering API
pub trait OrderingApi<I: Identifier> {
    /// Sort one group of entries.
    ///
    /// This is the main entry point. It:
    /// 1. Registers identifiers (rejecting duplicates)
    /// 2. Builds and normalizes the constraint graph
    /// 3. Performs the topological sort
    /// 4. Returns the items, unresolved ones in their original slots
    fn sort<T>(&self, entries: Vec<SortEntry<T, I>>) -> Result<Vec<T>>;

    /// Compute the sorted order as input indices without moving the items.
    ///
    /// `sort` is this permutation applied to its input.
    fn order_indices<T>(&self, entries: &[SortEntry<T, I>]) -> Result<Vec<usize>>;

    /// Sort a mixed sequence in which only elements of the same group are
    /// ordered against each other.
    ///
    /// Elements whose `group_of` is `None` keep their slot, and each group
    /// is written back into the slots it occupied.
    fn sort_elements<T, K, F>(&self, elements: Vec<SortEntry<T, I>>, group_of: F) -> Result<Vec<T>>
    where
        K: Eq + Hash,
        F: Fn(&T) -> Option<K>;
}
