//! Identifier Registry
//!
//! Pairs every resolved entry of a group with a vertex id and rejects
//! duplicate identifiers before any graph work happens.

use crate::domain::entities::{Registry, SortEntry};
use crate::domain::errors::{Result, SortError};
use crate::domain::value_objects::Identifier;
use tracing::debug;

/// Register the resolved entries of a group, in input order.
///
/// Entries without a resolution are skipped; they never get a vertex.
pub fn build_registry<T, I: Identifier>(entries: &[SortEntry<T, I>]) -> Result<Registry<'_, T, I>> {
    let mut registry = Registry::with_capacity(entries.len());

    for (position, entry) in entries.iter().enumerate() {
        let Some(resolution) = entry.resolution.as_ref() else {
            continue;
        };
        if registry.register(&entry.item, resolution, position).is_err() {
            return Err(SortError::DuplicateIdentifier {
                identifier: resolution.identifier.to_string(),
            });
        }
    }

    let skipped = entries.len() - registry.len();
    if skipped > 0 {
        debug!(
            registered = registry.len(),
            skipped, "Unresolved entries left out of the constraint graph"
        );
    }

    Ok(registry)
}
