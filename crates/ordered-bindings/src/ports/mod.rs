//! Ports module for binding ordering
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::OrderingApi;
pub use outbound::{BindingTransformer, ConstraintSupplier, IdentifierResolver};
