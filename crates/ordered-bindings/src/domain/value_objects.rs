//! Value objects for binding ordering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Key that names one item inside a group.
///
/// Anything cloneable, hashable and printable qualifies; the printed form
/// is what ends up in error messages.
pub trait Identifier: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

impl<T> Identifier for T where T: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

/// Relative ordering constraint attached to one item.
///
/// `position` is only a tie-break weight: `0` means unspecified,
/// negative values pull the item earlier, positive values later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de>"))]
pub struct OrderConstraint<I> {
    /// Identifiers this item must precede
    #[serde(default)]
    pub before: Vec<I>,
    /// Identifiers this item must succeed
    #[serde(default)]
    pub after: Vec<I>,
    /// Tie-break weight, `0` = unspecified
    #[serde(default)]
    pub position: i32,
}

impl<I> Default for OrderConstraint<I> {
    fn default() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
            position: 0,
        }
    }
}

impl<I: Identifier> OrderConstraint<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifier this item must precede.
    pub fn before(mut self, id: impl Into<I>) -> Self {
        let id = id.into();
        if !self.before.contains(&id) {
            self.before.push(id);
        }
        self
    }

    /// Add an identifier this item must succeed.
    pub fn after(mut self, id: impl Into<I>) -> Self {
        let id = id.into();
        if !self.after.contains(&id) {
            self.after.push(id);
        }
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// True when the constraint names no other item.
    ///
    /// A nonzero position alone still counts as unanchored.
    pub fn is_unanchored(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// Identifier plus optional constraint, as produced by the resolution layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution<I> {
    pub identifier: I,
    pub constraint: Option<OrderConstraint<I>>,
}

impl<I: Identifier> Resolution<I> {
    pub fn new(identifier: I, constraint: Option<OrderConstraint<I>>) -> Self {
        Self {
            identifier,
            constraint,
        }
    }

    pub fn unconstrained(identifier: I) -> Self {
        Self::new(identifier, None)
    }

    /// Copy with a different identifier, constraint untouched.
    pub fn with_identifier(mut self, identifier: I) -> Self {
        self.identifier = identifier;
        self
    }

    /// Copy with a different constraint.
    pub fn with_constraint(mut self, constraint: Option<OrderConstraint<I>>) -> Self {
        self.constraint = constraint;
        self
    }
}

/// Index of a vertex in a [`ConstraintGraph`](super::entities::ConstraintGraph).
///
/// Vertices are numbered in registration order, so comparing two ids also
/// compares their input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Origin of a graph edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// From a `before`/`after` constraint
    Explicit,
    /// From adjacency of two unanchored items in the input
    Implicit,
    /// Added by normalization when an implicit edge is rerouted
    Derived,
}

impl EdgeKind {
    pub fn is_implicit(self) -> bool {
        matches!(self, EdgeKind::Implicit)
    }
}
