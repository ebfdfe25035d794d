pub mod dedup;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use store::{ConfigStore, EventSink};
pub use types::{Article, ArticleStub, SourceConfig};

pub mod prelude {
    pub use super::store::{ConfigStore, EventSink};
    pub use super::types::{Article, ArticleStub, SourceConfig};
    pub use super::{Error, Result};
}
