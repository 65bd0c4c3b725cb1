//! Configuration for binding ordering

use crate::domain::errors::ConfigError;
use crate::domain::value_objects::{Identifier, OrderConstraint};
use serde::{Deserialize, Serialize};
use std::env;

/// What to do when a before/after reference names no item of the group
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnresolvableHandling {
    /// Fail the sort with `SortError::UnresolvableIdentifier`
    #[default]
    Throw,
    /// Drop that single reference
    Ignore,
}

/// Built-in default position policies, used when an item's position is `0`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefaultPosition {
    /// Always `0`, leaving input order as the tie-break
    #[default]
    Zero,
    /// `1` with only `before` set, `-1` with only `after` set, `0` otherwise
    Closest,
}

/// Supplies a position for items whose explicit position is `0`.
pub trait DefaultPositionProvider<I> {
    fn default_position(&self, identifier: &I, constraint: Option<&OrderConstraint<I>>) -> i32;
}

impl<I: Identifier> DefaultPositionProvider<I> for DefaultPosition {
    fn default_position(&self, _identifier: &I, constraint: Option<&OrderConstraint<I>>) -> i32 {
        match self {
            DefaultPosition::Zero => 0,
            DefaultPosition::Closest => {
                let Some(constraint) = constraint else {
                    return 0;
                };
                match (constraint.before.is_empty(), constraint.after.is_empty()) {
                    (false, true) => 1,
                    (true, false) => -1,
                    _ => 0,
                }
            }
        }
    }
}

impl<I, F> DefaultPositionProvider<I> for F
where
    F: Fn(&I, Option<&OrderConstraint<I>>) -> i32,
{
    fn default_position(&self, identifier: &I, constraint: Option<&OrderConstraint<I>>) -> i32 {
        self(identifier, constraint)
    }
}

/// Sorting configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortingConfig {
    /// Handling of references to unknown identifiers
    pub unresolvable_handling: UnresolvableHandling,
    /// Policy for items without an explicit position
    pub default_position: DefaultPosition,
}

impl SortingConfig {
    pub const UNRESOLVABLE_ENV: &'static str = "ORDERED_BINDINGS_UNRESOLVABLE";
    pub const DEFAULT_POSITION_ENV: &'static str = "ORDERED_BINDINGS_DEFAULT_POSITION";

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ORDERED_BINDINGS_UNRESOLVABLE`: `throw` or `ignore` (default: throw)
    /// - `ORDERED_BINDINGS_DEFAULT_POSITION`: `zero` or `closest` (default: zero)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::UNRESOLVABLE_ENV) {
            config.unresolvable_handling = match value.trim().to_lowercase().as_str() {
                "throw" => UnresolvableHandling::Throw,
                "ignore" => UnresolvableHandling::Ignore,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: Self::UNRESOLVABLE_ENV,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(Self::DEFAULT_POSITION_ENV) {
            config.default_position = match value.trim().to_lowercase().as_str() {
                "zero" => DefaultPosition::Zero,
                "closest" => DefaultPosition::Closest,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: Self::DEFAULT_POSITION_ENV,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn with_unresolvable_handling(mut self, handling: UnresolvableHandling) -> Self {
        self.unresolvable_handling = handling;
        self
    }

    pub fn with_default_position(mut self, policy: DefaultPosition) -> Self {
        self.default_position = policy;
        self
    }
}
