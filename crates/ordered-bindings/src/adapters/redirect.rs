//! Redirect rewrite step
//!
//! A redirected item is ordered as its target: it takes the target's
//! identifier and the target's constraint. Used for wrappers that should
//! sort wherever the thing they wrap sorts.

use crate::domain::errors::{Result, SortError};
use crate::domain::value_objects::{Identifier, Resolution};
use crate::ports::outbound::{BindingTransformer, ConstraintSupplier};
use std::collections::HashMap;
use tracing::trace;

#[derive(Clone, Debug)]
pub struct Redirect<I, S> {
    /// `None` marks an item declared as redirected whose target is unknown
    targets: HashMap<I, Option<I>>,
    supplier: S,
}

impl<I: Identifier, S: ConstraintSupplier<I>> Redirect<I, S> {
    /// Target constraints are looked up in `supplier`.
    pub fn new(supplier: S) -> Self {
        Self {
            targets: HashMap::new(),
            supplier,
        }
    }

    pub fn redirect(mut self, from: impl Into<I>, to: impl Into<I>) -> Self {
        self.targets.insert(from.into(), Some(to.into()));
        self
    }

    /// Declare `from` as redirected without a target; rewriting it fails.
    pub fn redirect_missing(mut self, from: impl Into<I>) -> Self {
        self.targets.insert(from.into(), None);
        self
    }
}

impl<I: Identifier, S: ConstraintSupplier<I>> BindingTransformer<I> for Redirect<I, S> {
    fn transform(&self, resolution: Resolution<I>) -> Result<Resolution<I>> {
        let target = match self.targets.get(&resolution.identifier) {
            None => return Ok(resolution),
            Some(None) => {
                return Err(SortError::InvalidRewrite {
                    identifier: resolution.identifier.to_string(),
                    reason: "redirect target not found".to_string(),
                })
            }
            Some(Some(target)) => target.clone(),
        };

        trace!(from = %resolution.identifier, to = %target, "Redirecting identifier");
        let constraint = self.supplier.constraint_for(&target);
        Ok(resolution.with_identifier(target).with_constraint(constraint))
    }
}
