//! Application layer: orchestration services.

pub mod resolution;
pub mod service;

pub use resolution::BindingResolutionService;
pub use service::BindingSorter;
