//! Implicit Edge Normalizer
//!
//! An implicit edge says nothing more than "these two were next to each
//! other in the input". When a vertex also has explicit edges on the same
//! side, the adjacency is moved onto the explicit neighbors so the explicit
//! constraint lands between the two original neighbors.
//!
//! ## Algorithm
//!
//! Two passes, successors first, then predecessors. For each vertex `v`
//! with exactly one implicit neighbor `x` and at least one other neighbor
//! `e` on that side:
//!
//! 1. Successors pass: add `e -> x` unless `e` leans towards the end
//! 2. Predecessors pass: add `x -> e` unless `e` leans towards the start
//! 3. Remove the implicit edge between `v` and `x` if any edge was added
//!
//! A reroute that would close a cycle is dropped. When every reroute is
//! skipped or dropped the implicit edge is kept.

use crate::domain::entities::{ConstraintGraph, Direction};
use crate::domain::errors::{GraphError, Result, SortError};
use crate::domain::invariants::invariant_single_implicit_edge;
use crate::domain::value_objects::{EdgeKind, VertexId};
use tracing::{debug, trace};

/// Normalize implicit edges in place. Returns the number of implicit
/// edges that were rerouted.
pub fn normalize(graph: &mut ConstraintGraph, positions: &[i32]) -> Result<usize> {
    let mut rerouted = 0;

    for direction in [Direction::Successors, Direction::Predecessors] {
        let vertices: Vec<VertexId> = graph.vertices().collect();
        for v in vertices {
            if reroute(graph, v, direction, positions)? {
                rerouted += 1;
            }
        }
    }

    if !invariant_single_implicit_edge(graph) {
        return Err(SortError::Internal(
            "vertex left with more than one implicit edge per side".to_string(),
        ));
    }

    debug!(
        rerouted,
        edges = graph.edge_count(),
        "Normalized implicit edges"
    );
    Ok(rerouted)
}

fn reroute(
    graph: &mut ConstraintGraph,
    v: VertexId,
    direction: Direction,
    positions: &[i32],
) -> Result<bool> {
    let mut implicit = None;
    let mut explicit = Vec::new();

    for (w, kind) in graph.edges_of(v, direction) {
        if !kind.is_implicit() {
            explicit.push(w);
        } else if implicit.replace(w).is_some() {
            return Err(SortError::Internal(format!(
                "vertex {v} has more than one implicit {direction:?} edge"
            )));
        }
    }

    let Some(x) = implicit else {
        return Ok(false);
    };
    if explicit.is_empty() {
        return Ok(false);
    }

    let mut replaced = false;
    for e in explicit {
        let position = positions.get(e.index()).copied().unwrap_or(0);
        let derived = match direction {
            Direction::Successors if position <= 0 => Some((e, x)),
            Direction::Predecessors if position >= 0 => Some((x, e)),
            _ => None,
        };
        let Some((from, to)) = derived else {
            continue;
        };

        match graph.try_add_edge(from, to, EdgeKind::Derived) {
            Ok(_) => replaced = true,
            Err(GraphError::WouldCycle { from, to }) => {
                trace!(%from, %to, "Dropping derived edge that would close a cycle");
            }
            Err(err) => return Err(SortError::Internal(err.to_string())),
        }
    }

    // Adjacency stays in place unless a derived edge took it over
    if !replaced {
        return Ok(false);
    }
    match direction {
        Direction::Successors => graph.remove_edge(v, x),
        Direction::Predecessors => graph.remove_edge(x, v),
    };
    Ok(true)
}
