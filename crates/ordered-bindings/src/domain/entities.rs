//! Core entities for binding ordering

use super::errors::GraphError;
use super::value_objects::{EdgeKind, Identifier, OrderConstraint, Resolution, VertexId};
use std::collections::{BTreeMap, HashMap};

/// One element of a group handed to the sorter.
///
/// `resolution` is `None` when no identifier could be found for the item;
/// such entries do not take part in ordering and keep their slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortEntry<T, I> {
    pub item: T,
    pub resolution: Option<Resolution<I>>,
}

impl<T, I: Identifier> SortEntry<T, I> {
    pub fn new(item: T, identifier: I, constraint: Option<OrderConstraint<I>>) -> Self {
        Self {
            item,
            resolution: Some(Resolution::new(identifier, constraint)),
        }
    }

    pub fn unconstrained(item: T, identifier: I) -> Self {
        Self::new(item, identifier, None)
    }

    /// Entry whose item has no identifier.
    pub fn unresolved(item: T) -> Self {
        Self {
            item,
            resolution: None,
        }
    }

    pub fn from_resolution(item: T, resolution: Option<Resolution<I>>) -> Self {
        Self { item, resolution }
    }

    pub fn identifier(&self) -> Option<&I> {
        self.resolution.as_ref().map(|r| &r.identifier)
    }
}

/// An entry that received a vertex in the constraint graph
#[derive(Debug)]
pub struct RegisteredItem<'a, T, I> {
    pub item: &'a T,
    pub identifier: &'a I,
    pub constraint: Option<&'a OrderConstraint<I>>,
    /// Index of the entry in the input sequence
    pub original_position: usize,
    pub vertex: VertexId,
}

impl<T, I> Clone for RegisteredItem<'_, T, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I> Copy for RegisteredItem<'_, T, I> {}

impl<'a, T, I: Identifier> RegisteredItem<'a, T, I> {
    /// Candidate for an implicit adjacency edge: no constraint, or a
    /// constraint that names no other item.
    pub fn is_implicit_candidate(&self) -> bool {
        self.constraint.map_or(true, OrderConstraint::is_unanchored)
    }

    /// Explicit position hint, `0` when absent.
    pub fn position(&self) -> i32 {
        self.constraint.map_or(0, |c| c.position)
    }
}

/// Bidirectional mapping between registered items and identifiers.
///
/// Vertex ids follow registration order.
#[derive(Debug)]
pub struct Registry<'a, T, I> {
    items: Vec<RegisteredItem<'a, T, I>>,
    by_identifier: HashMap<&'a I, VertexId>,
}

impl<'a, T, I: Identifier> Registry<'a, T, I> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            by_identifier: HashMap::with_capacity(capacity),
        }
    }

    /// Register an entry. Returns the vertex already holding the
    /// identifier if there is one, leaving the registry untouched.
    pub(crate) fn register(
        &mut self,
        item: &'a T,
        resolution: &'a Resolution<I>,
        original_position: usize,
    ) -> Result<VertexId, VertexId> {
        if let Some(&existing) = self.by_identifier.get(&resolution.identifier) {
            return Err(existing);
        }
        let vertex = VertexId(self.items.len());
        self.items.push(RegisteredItem {
            item,
            identifier: &resolution.identifier,
            constraint: resolution.constraint.as_ref(),
            original_position,
            vertex,
        });
        self.by_identifier.insert(&resolution.identifier, vertex);
        Ok(vertex)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, vertex: VertexId) -> Option<&RegisteredItem<'a, T, I>> {
        self.items.get(vertex.index())
    }

    pub fn lookup(&self, identifier: &I) -> Option<VertexId> {
        self.by_identifier.get(identifier).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredItem<'a, T, I>> {
        self.items.iter()
    }

    /// Printable identifier of a vertex, for diagnostics.
    pub fn describe(&self, vertex: VertexId) -> String {
        match self.get(vertex) {
            Some(registered) => registered.identifier.to_string(),
            None => vertex.to_string(),
        }
    }
}

/// Side of a vertex an edge set is read from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Outgoing edges
    Successors,
    /// Incoming edges
    Predecessors,
}

/// Directed acyclic graph over registered items.
///
/// An edge `a -> b` means `a` is emitted before `b`. At most one edge exists
/// per ordered pair; re-adding an edge keeps the strongest kind.
#[derive(Debug, Clone, Default)]
pub struct ConstraintGraph {
    successors: Vec<BTreeMap<VertexId, EdgeKind>>,
    predecessors: Vec<BTreeMap<VertexId, EdgeKind>>,
    edge_count: usize,
}

impl ConstraintGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertices(count: usize) -> Self {
        let mut graph = Self::new();
        for _ in 0..count {
            graph.add_vertex();
        }
        graph
    }

    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId(self.successors.len());
        self.successors.push(BTreeMap::new());
        self.predecessors.push(BTreeMap::new());
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.successors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertex_count()).map(VertexId)
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), GraphError> {
        if v.index() < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(v))
        }
    }

    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.edge_kind(from, to).is_some()
    }

    pub fn edge_kind(&self, from: VertexId, to: VertexId) -> Option<EdgeKind> {
        self.successors.get(from.index())?.get(&to).copied()
    }

    /// Add `from -> to` unless it would close a cycle.
    ///
    /// Returns `Ok(true)` if a new edge was stored. An existing implicit
    /// edge is upgraded when the new kind is not implicit.
    pub fn try_add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        kind: EdgeKind,
    ) -> Result<bool, GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        if let Some(existing) = self.edge_kind(from, to) {
            if existing.is_implicit() && !kind.is_implicit() {
                self.successors[from.index()].insert(to, kind);
                self.predecessors[to.index()].insert(from, kind);
            }
            return Ok(false);
        }

        if from == to || self.is_reachable(to, from) {
            return Err(GraphError::WouldCycle { from, to });
        }

        self.successors[from.index()].insert(to, kind);
        self.predecessors[to.index()].insert(from, kind);
        self.edge_count += 1;
        Ok(true)
    }

    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Option<EdgeKind> {
        let kind = self.successors.get_mut(from.index())?.remove(&to)?;
        if let Some(preds) = self.predecessors.get_mut(to.index()) {
            preds.remove(&from);
        }
        self.edge_count -= 1;
        Some(kind)
    }

    /// Edges on one side of `v`, ordered by neighbor vertex id.
    pub fn edges_of(
        &self,
        v: VertexId,
        direction: Direction,
    ) -> impl Iterator<Item = (VertexId, EdgeKind)> + '_ {
        let side = match direction {
            Direction::Successors => &self.successors,
            Direction::Predecessors => &self.predecessors,
        };
        side.get(v.index())
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(&w, &kind)| (w, kind)))
    }

    pub fn successors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges_of(v, Direction::Successors).map(|(w, _)| w)
    }

    pub fn predecessors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges_of(v, Direction::Predecessors).map(|(w, _)| w)
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.predecessors.get(v.index()).map_or(0, BTreeMap::len)
    }

    /// All edges as `(from, to, kind)`, ordered by `from` then `to`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, EdgeKind)> + '_ {
        self.successors.iter().enumerate().flat_map(|(from, edges)| {
            edges
                .iter()
                .map(move |(&to, &kind)| (VertexId(from), to, kind))
        })
    }

    /// Whether a path `from ->* to` exists (a vertex reaches itself).
    pub fn is_reachable(&self, from: VertexId, to: VertexId) -> bool {
        if from == to {
            return true;
        }
        let mut visited = vec![false; self.vertex_count()];
        let mut stack = vec![from];
        while let Some(v) = stack.pop() {
            for w in self.successors(v) {
                if w == to {
                    return true;
                }
                if !visited[w.index()] {
                    visited[w.index()] = true;
                    stack.push(w);
                }
            }
        }
        false
    }
}
