use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP failure reaching a listing or detail page.
    /// Recoverable: the caller skips the unit of work for this cycle.
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// A source config names a strategy nobody registered.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Page structure did not match the strategy's extraction assumptions.
    #[error("parse error: {0}")]
    Parse(String),

    /// Failure in the scheduler's wait/signal machinery. Unlike the
    /// per-source errors above, this terminates the control loop.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
