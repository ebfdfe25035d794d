//! Strategy lookup by identifier.
//!
//! Source configs carry a strategy identifier string; the registry maps it
//! to a factory so new site variants plug in without touching the
//! scheduler. A fresh strategy instance is built per resolution, so callers
//! never share client state across sources.

use std::collections::HashMap;

use nf_core::{Error, Result};

use crate::strategies::{ItWorldStrategy, ProfitStrategy, Strategy};

pub type StrategyFactory = Box<dyn Fn() -> Result<Box<dyn Strategy>> + Send + Sync>;

pub struct StrategyRegistry {
    factories: HashMap<String, StrategyFactory>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry pre-populated with every strategy shipped in this crate.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("itworld", Box::new(|| Ok(Box::new(ItWorldStrategy::new()?))));
        registry.register("profit", Box::new(|| Ok(Box::new(ProfitStrategy::new()?))));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: StrategyFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Builds the strategy registered under `name`. An unregistered name is
    /// always [`Error::UnknownStrategy`], never anything else.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Strategy>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))?;
        factory()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
