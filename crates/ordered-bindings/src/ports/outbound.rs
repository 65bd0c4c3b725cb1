//! Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators that turn raw items into identifiers and constraints.

use crate::domain::errors::Result;
use crate::domain::value_objects::{OrderConstraint, Resolution};
use std::sync::Arc;

/// Finds the identifier of an item, if it has one.
pub trait IdentifierResolver<T, I> {
    fn identify(&self, item: &T) -> Option<I>;
}

impl<T, I, F> IdentifierResolver<T, I> for F
where
    F: Fn(&T) -> Option<I>,
{
    fn identify(&self, item: &T) -> Option<I> {
        self(item)
    }
}

/// Source of ordering constraints, keyed by identifier
pub trait ConstraintSupplier<I> {
    fn constraint_for(&self, identifier: &I) -> Option<OrderConstraint<I>>;
}

impl<I, S: ConstraintSupplier<I> + ?Sized> ConstraintSupplier<I> for Arc<S> {
    fn constraint_for(&self, identifier: &I) -> Option<OrderConstraint<I>> {
        (**self).constraint_for(identifier)
    }
}

/// One identifier rewrite step.
///
/// Returns the resolution unchanged when the step does not apply.
pub trait BindingTransformer<I> {
    fn transform(&self, resolution: Resolution<I>) -> Result<Resolution<I>>;
}

impl<I, F> BindingTransformer<I> for F
where
    F: Fn(Resolution<I>) -> Result<Resolution<I>>,
{
    fn transform(&self, resolution: Resolution<I>) -> Result<Resolution<I>> {
        self(resolution)
    }
}
