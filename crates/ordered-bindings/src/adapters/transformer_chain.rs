//! Ordered chain of rewrite steps
//!
//! Steps run in registration order. A step registered with
//! [`TransformerChain::then_reapplying`] re-runs the whole chain on the
//! identifier it produced before the remaining steps see the result.

use crate::domain::errors::{Result, SortError};
use crate::domain::value_objects::{Identifier, Resolution};
use crate::ports::outbound::BindingTransformer;
use std::collections::HashSet;
use tracing::debug;

/// Upper bound on nested re-application, for rewrites that keep producing
/// fresh identifiers.
pub const MAX_REWRITE_DEPTH: usize = 32;

struct Step<I> {
    transformer: Box<dyn BindingTransformer<I> + Send + Sync>,
    reapply_on_new_identifier: bool,
}

pub struct TransformerChain<I> {
    steps: Vec<Step<I>>,
}

impl<I> Default for TransformerChain<I> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<I: Identifier> TransformerChain<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then<B>(self, transformer: B) -> Self
    where
        B: BindingTransformer<I> + Send + Sync + 'static,
    {
        self.push(transformer, false)
    }

    /// Add a step whose identifier changes are fed back through the chain.
    pub fn then_reapplying<B>(self, transformer: B) -> Self
    where
        B: BindingTransformer<I> + Send + Sync + 'static,
    {
        self.push(transformer, true)
    }

    fn push<B>(mut self, transformer: B, reapply_on_new_identifier: bool) -> Self
    where
        B: BindingTransformer<I> + Send + Sync + 'static,
    {
        self.steps.push(Step {
            transformer: Box::new(transformer),
            reapply_on_new_identifier,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn apply(&self, mut resolution: Resolution<I>, seen: &mut HashSet<I>) -> Result<Resolution<I>> {
        for step in &self.steps {
            let before = resolution.identifier.clone();
            resolution = step.transformer.transform(resolution)?;

            if !step.reapply_on_new_identifier || resolution.identifier == before {
                continue;
            }
            if seen.len() >= MAX_REWRITE_DEPTH || !seen.insert(resolution.identifier.clone()) {
                return Err(SortError::RewriteLoop {
                    identifier: resolution.identifier.to_string(),
                });
            }

            debug!(from = %before, to = %resolution.identifier, "Re-applying rewrite chain");
            resolution = self.apply(resolution, seen)?;
        }
        Ok(resolution)
    }
}

impl<I: Identifier> BindingTransformer<I> for TransformerChain<I> {
    fn transform(&self, resolution: Resolution<I>) -> Result<Resolution<I>> {
        let mut seen = HashSet::from([resolution.identifier.clone()]);
        self.apply(resolution, &mut seen)
    }
}

impl<I> std::fmt::Debug for TransformerChain<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerChain")
            .field("steps", &self.steps.len())
            .finish()
    }
}
