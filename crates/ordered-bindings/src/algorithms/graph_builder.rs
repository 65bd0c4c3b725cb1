//! Constraint Graph Builder
//!
//! Builds the ordering graph from a registry:
//! 1. Explicit edges from `before`/`after` constraints (cycles are fatal)
//! 2. Implicit edges between adjacent unanchored items

use crate::config::UnresolvableHandling;
use crate::domain::entities::{ConstraintGraph, RegisteredItem, Registry};
use crate::domain::errors::{GraphError, Result, SortError};
use crate::domain::value_objects::{EdgeKind, Identifier, VertexId};
use tracing::{trace, warn};

/// Build the (not yet normalized) constraint graph of a group.
pub fn build_constraint_graph<T, I: Identifier>(
    registry: &Registry<'_, T, I>,
    handling: UnresolvableHandling,
) -> Result<ConstraintGraph> {
    let mut graph = ConstraintGraph::with_vertices(registry.len());

    add_explicit_edges(&mut graph, registry, handling)?;
    add_implicit_edges(&mut graph, registry)?;

    Ok(graph)
}

fn add_explicit_edges<T, I: Identifier>(
    graph: &mut ConstraintGraph,
    registry: &Registry<'_, T, I>,
    handling: UnresolvableHandling,
) -> Result<()> {
    for registered in registry.iter() {
        let Some(constraint) = registered.constraint else {
            continue;
        };

        for id in &constraint.before {
            if let Some(succeeding) = resolve(registry, registered, id, handling)? {
                add_explicit_edge(graph, registry, registered.vertex, succeeding)?;
            }
        }

        for id in &constraint.after {
            if let Some(preceding) = resolve(registry, registered, id, handling)? {
                add_explicit_edge(graph, registry, preceding, registered.vertex)?;
            }
        }
    }
    Ok(())
}

fn add_explicit_edge<T, I: Identifier>(
    graph: &mut ConstraintGraph,
    registry: &Registry<'_, T, I>,
    from: VertexId,
    to: VertexId,
) -> Result<()> {
    match graph.try_add_edge(from, to, EdgeKind::Explicit) {
        Ok(_) => Ok(()),
        Err(GraphError::WouldCycle { from, to }) => Err(SortError::CycleDetected {
            from: registry.describe(from),
            to: registry.describe(to),
        }),
        Err(err) => Err(SortError::Internal(err.to_string())),
    }
}

/// Implicit edges only join two neighbors that are both unanchored.
fn add_implicit_edges<T, I: Identifier>(
    graph: &mut ConstraintGraph,
    registry: &Registry<'_, T, I>,
) -> Result<()> {
    let items: Vec<&RegisteredItem<'_, T, I>> = registry.iter().collect();

    for pair in items.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        if !left.is_implicit_candidate() || !right.is_implicit_candidate() {
            continue;
        }

        match graph.try_add_edge(left.vertex, right.vertex, EdgeKind::Implicit) {
            Ok(_) => {}
            Err(GraphError::WouldCycle { from, to }) => {
                trace!(
                    from = %registry.describe(from),
                    to = %registry.describe(to),
                    "Skipping implicit edge contradicted by explicit constraints"
                );
            }
            Err(err) => return Err(SortError::Internal(err.to_string())),
        }
    }
    Ok(())
}

fn resolve<T, I: Identifier>(
    registry: &Registry<'_, T, I>,
    referrer: &RegisteredItem<'_, T, I>,
    id: &I,
    handling: UnresolvableHandling,
) -> Result<Option<VertexId>> {
    if let Some(vertex) = registry.lookup(id) {
        return Ok(Some(vertex));
    }

    match handling {
        UnresolvableHandling::Throw => Err(SortError::UnresolvableIdentifier {
            identifier: id.to_string(),
            referenced_by: referrer.identifier.to_string(),
        }),
        UnresolvableHandling::Ignore => {
            warn!(
                identifier = %id,
                referenced_by = %referrer.identifier,
                "Ignoring unresolvable order reference"
            );
            Ok(None)
        }
    }
}
