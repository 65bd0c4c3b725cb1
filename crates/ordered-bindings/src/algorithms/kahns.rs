//! Kahn's Topological Sort Algorithm
//!
//! O((V + E) log V) with a priority queue in place of the plain FIFO, so
//! every choice between ready vertices is deterministic: lowest effective
//! position first, then earliest input position.

use crate::domain::entities::{ConstraintGraph, Registry};
use crate::domain::errors::{Result, SortError};
use crate::domain::value_objects::{Identifier, VertexId};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Perform Kahn's topological sort on a normalized constraint graph.
///
/// `positions` holds the effective position of every vertex.
pub fn kahns_topological_sort<T, I: Identifier>(
    graph: &ConstraintGraph,
    registry: &Registry<'_, T, I>,
    positions: &[i32],
) -> Result<Vec<VertexId>> {
    if graph.vertex_count() == 0 {
        return Ok(vec![]);
    }

    let key = |v: VertexId| {
        let position = positions.get(v.index()).copied().unwrap_or(0);
        let original = registry.get(v).map_or(v.index(), |r| r.original_position);
        Reverse((position, original, v))
    };

    // 1. Copy in-degrees (we'll modify them)
    let mut in_degree: Vec<usize> = graph.vertices().map(|v| graph.in_degree(v)).collect();

    // 2. Seed the heap with zero in-degree vertices
    let mut ready: BinaryHeap<Reverse<(i32, usize, VertexId)>> = graph
        .vertices()
        .filter(|v| in_degree[v.index()] == 0)
        .map(key)
        .collect();

    // 3. Emit the smallest ready vertex, release its successors
    let mut order = Vec::with_capacity(graph.vertex_count());
    while let Some(Reverse((_, _, v))) = ready.pop() {
        order.push(v);
        for w in graph.successors(v) {
            let degree = &mut in_degree[w.index()];
            *degree = degree.saturating_sub(1);
            if *degree == 0 {
                ready.push(key(w));
            }
        }
    }

    // 4. Anything left over sits on a cycle, which edge insertion forbids
    if order.len() < graph.vertex_count() {
        return Err(SortError::Internal(format!(
            "topological sort emitted {} of {} vertices",
            order.len(),
            graph.vertex_count()
        )));
    }

    Ok(order)
}
