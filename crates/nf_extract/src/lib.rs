pub mod datetime;
pub mod registry;
pub mod strategies;

pub use registry::{StrategyFactory, StrategyRegistry};
pub use strategies::Strategy;

pub mod prelude {
    pub use super::registry::StrategyRegistry;
    pub use super::strategies::Strategy;
    pub use nf_core::{Article, ArticleStub, Error, Result, SourceConfig};
}
