//! Effective positions
//!
//! An item's explicit position wins when nonzero; otherwise the default
//! position provider decides.

use crate::config::DefaultPositionProvider;
use crate::domain::entities::Registry;
use crate::domain::value_objects::Identifier;

/// Effective position of every registered item, indexed by vertex id.
pub fn effective_positions<T, I, P>(registry: &Registry<'_, T, I>, provider: &P) -> Vec<i32>
where
    I: Identifier,
    P: DefaultPositionProvider<I> + ?Sized,
{
    registry
        .iter()
        .map(|registered| match registered.position() {
            0 => provider.default_position(registered.identifier, registered.constraint),
            explicit => explicit,
        })
        .collect()
}
