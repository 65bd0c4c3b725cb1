//! Domain invariants for binding ordering

use super::entities::{ConstraintGraph, Direction};
use super::value_objects::VertexId;
use std::collections::HashSet;

/// INVARIANT-1: Edge Order
/// Every edge `a -> b` of the graph has `a` emitted before `b`.
pub fn invariant_edge_order(order: &[VertexId], graph: &ConstraintGraph) -> bool {
    let mut rank = vec![usize::MAX; graph.vertex_count()];
    for (i, v) in order.iter().enumerate() {
        let Some(slot) = rank.get_mut(v.index()) else {
            return false;
        };
        *slot = i;
    }

    graph
        .edges()
        .all(|(from, to, _)| rank[from.index()] < rank[to.index()])
}

/// INVARIANT-2: No Cycles
pub fn invariant_no_cycles(graph: &ConstraintGraph) -> bool {
    // Kahn's algorithm consumes every vertex iff the graph is acyclic
    let mut in_degree: Vec<usize> = graph.vertices().map(|v| graph.in_degree(v)).collect();
    let mut ready: Vec<VertexId> = graph.vertices().filter(|v| in_degree[v.index()] == 0).collect();
    let mut seen = 0;

    while let Some(v) = ready.pop() {
        seen += 1;
        for w in graph.successors(v) {
            in_degree[w.index()] -= 1;
            if in_degree[w.index()] == 0 {
                ready.push(w);
            }
        }
    }

    seen == graph.vertex_count()
}

/// INVARIANT-3: Single Implicit Edge
/// No vertex has more than one implicit edge per direction.
pub fn invariant_single_implicit_edge(graph: &ConstraintGraph) -> bool {
    graph.vertices().all(|v| {
        [Direction::Successors, Direction::Predecessors]
            .into_iter()
            .all(|direction| {
                graph
                    .edges_of(v, direction)
                    .filter(|(_, kind)| kind.is_implicit())
                    .count()
                    <= 1
            })
    })
}

/// INVARIANT-4: Completeness
/// The order lists every vertex exactly once.
pub fn invariant_completeness(order: &[VertexId], graph: &ConstraintGraph) -> bool {
    let unique: HashSet<VertexId> = order.iter().copied().collect();
    order.len() == graph.vertex_count()
        && unique.len() == order.len()
        && unique.iter().all(|v| v.index() < graph.vertex_count())
}
