//! Alias rewrite step
//!
//! An item declared as "identified as X" takes part in ordering under
//! the identifier `X`. Its own constraint travels with it.

use crate::domain::errors::Result;
use crate::domain::value_objects::{Identifier, Resolution};
use crate::ports::outbound::BindingTransformer;
use std::collections::HashMap;
use tracing::trace;

#[derive(Clone, Debug)]
pub struct IdentifiedAs<I> {
    aliases: HashMap<I, I>,
}

impl<I> Default for IdentifiedAs<I> {
    fn default() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }
}

impl<I: Identifier> IdentifiedAs<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items identified by `from` are ordered as `to`.
    pub fn alias(mut self, from: impl Into<I>, to: impl Into<I>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }
}

impl<I: Identifier> BindingTransformer<I> for IdentifiedAs<I> {
    fn transform(&self, resolution: Resolution<I>) -> Result<Resolution<I>> {
        match self.aliases.get(&resolution.identifier) {
            Some(alias) => {
                trace!(from = %resolution.identifier, to = %alias, "Applying identifier alias");
                let alias = alias.clone();
                Ok(resolution.with_identifier(alias))
            }
            None => Ok(resolution),
        }
    }
}
