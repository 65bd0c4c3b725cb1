//! Algorithms module for binding ordering
//!
//! Contains:
//! - Identifier registry
//! - Constraint graph builder
//! - Implicit edge normalizer
//! - Effective positions
//! - Kahn's topological sort

pub mod graph_builder;
pub mod kahns;
pub mod normalizer;
pub mod positions;
pub mod registry;

pub use graph_builder::build_constraint_graph;
pub use kahns::kahns_topological_sort;
pub use normalizer::normalize;
pub use positions::effective_positions;
pub use registry::build_registry;
