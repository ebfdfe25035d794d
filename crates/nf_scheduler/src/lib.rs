pub mod scheduler;
pub mod sweep;

pub use scheduler::{CrawlScheduler, SchedulerSettings};
pub use sweep::SweepStats;
