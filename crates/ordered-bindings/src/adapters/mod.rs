//! # Adapters Layer (Hexagonal Architecture)
//!
//! Concrete implementations of the outbound ports: constraint lookup and
//! identifier rewrite steps.

mod constraint_table;
mod identified_as;
mod redirect;
mod transformer_chain;

pub use constraint_table::ConstraintTable;
pub use identified_as::IdentifiedAs;
pub use redirect::Redirect;
pub use transformer_chain::{TransformerChain, MAX_REWRITE_DEPTH};
