//! Binding Resolution Service
//!
//! Turns raw items into sort entries: identify the item, look up its
//! constraint, then run the rewrite chain.

use crate::adapters::TransformerChain;
use crate::domain::entities::SortEntry;
use crate::domain::errors::Result;
use crate::domain::value_objects::{Identifier, Resolution};
use crate::ports::outbound::{BindingTransformer, ConstraintSupplier, IdentifierResolver};
use tracing::debug;

#[derive(Debug)]
pub struct BindingResolutionService<I, R, S> {
    resolver: R,
    supplier: S,
    chain: TransformerChain<I>,
}

impl<I, R, S> BindingResolutionService<I, R, S>
where
    I: Identifier,
    S: ConstraintSupplier<I>,
{
    /// Service without rewrite steps
    pub fn new(resolver: R, supplier: S) -> Self {
        Self::with_chain(resolver, supplier, TransformerChain::new())
    }

    pub fn with_chain(resolver: R, supplier: S, chain: TransformerChain<I>) -> Self {
        Self {
            resolver,
            supplier,
            chain,
        }
    }

    /// Resolution of one item, `None` when the item has no identifier.
    pub fn resolve<T>(&self, item: &T) -> Result<Option<Resolution<I>>>
    where
        R: IdentifierResolver<T, I>,
    {
        let Some(identifier) = self.resolver.identify(item) else {
            return Ok(None);
        };
        let constraint = self.supplier.constraint_for(&identifier);
        let resolution = self.chain.transform(Resolution::new(identifier, constraint))?;
        Ok(Some(resolution))
    }

    /// Sort entries for a group, in input order.
    pub fn entries<T>(&self, items: Vec<T>) -> Result<Vec<SortEntry<T, I>>>
    where
        R: IdentifierResolver<T, I>,
    {
        let total = items.len();
        let entries = items
            .into_iter()
            .map(|item| {
                let resolution = self.resolve(&item)?;
                Ok(SortEntry::from_resolution(item, resolution))
            })
            .collect::<Result<Vec<_>>>()?;

        let unresolved = entries.iter().filter(|e| e.resolution.is_none()).count();
        debug!(total, unresolved, "Resolved group entries");
        Ok(entries)
    }
}
