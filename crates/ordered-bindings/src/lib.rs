//! # Ordered Bindings
//!
//! Deterministic before/after ordering of the items of a multi-binding
//! group. Items declare which other items they must precede or succeed,
//! plus an optional position used to break ties; the sorter returns a
//! total order that honors every declared constraint.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (SortEntry, Registry, ConstraintGraph) and invariants
//! - **Algorithms**: Registry, graph building, normalization, Kahn's sort
//! - **Ports**: Inbound (OrderingApi) and Outbound (IdentifierResolver, ConstraintSupplier, BindingTransformer)
//! - **Adapters**: Constraint tables and identifier rewrite steps
//! - **Application**: Sorter and resolution services
//!
//! ## Example
//!
//! ```
//! use ordered_bindings::{BindingSorter, OrderConstraint, OrderingApi, SortEntry};
//!
//! let sorter = BindingSorter::new();
//! let sorted = sorter
//!     .sort(vec![
//!         SortEntry::unconstrained("first", "First"),
//!         SortEntry::unconstrained("last", "Last"),
//!         SortEntry::new("middle", "Middle", Some(OrderConstraint::new().after("First").before("Last"))),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(sorted, vec!["first", "middle", "last"]);
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{ConstraintTable, IdentifiedAs, Redirect, TransformerChain};
pub use application::{BindingResolutionService, BindingSorter};
pub use config::{DefaultPosition, DefaultPositionProvider, SortingConfig, UnresolvableHandling};
pub use domain::entities::*;
pub use domain::errors::{ConfigError, GraphError, Result, SortError};
pub use domain::value_objects::*;
pub use ports::inbound::OrderingApi;
pub use ports::outbound::{BindingTransformer, ConstraintSupplier, IdentifierResolver};
