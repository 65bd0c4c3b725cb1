//! In-memory constraint supplier

use crate::domain::value_objects::{Identifier, OrderConstraint};
use crate::ports::outbound::ConstraintSupplier;
use std::collections::HashMap;

/// Constraints declared per identifier, looked up by exact match.
#[derive(Clone, Debug)]
pub struct ConstraintTable<I> {
    constraints: HashMap<I, OrderConstraint<I>>,
}

impl<I> Default for ConstraintTable<I> {
    fn default() -> Self {
        Self {
            constraints: HashMap::new(),
        }
    }
}

impl<I: Identifier> ConstraintTable<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) the constraint of `identifier`.
    pub fn with(mut self, identifier: impl Into<I>, constraint: OrderConstraint<I>) -> Self {
        self.insert(identifier.into(), constraint);
        self
    }

    pub fn insert(&mut self, identifier: I, constraint: OrderConstraint<I>) -> Option<OrderConstraint<I>> {
        self.constraints.insert(identifier, constraint)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl<I: Identifier> FromIterator<(I, OrderConstraint<I>)> for ConstraintTable<I> {
    fn from_iter<It: IntoIterator<Item = (I, OrderConstraint<I>)>>(iter: It) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}

impl<I: Identifier> ConstraintSupplier<I> for ConstraintTable<I> {
    fn constraint_for(&self, identifier: &I) -> Option<OrderConstraint<I>> {
        self.constraints.get(identifier).cloned()
    }
}
