pub mod json;
pub mod memory;

pub use json::{JsonConfigStore, JsonlEventStore};
pub use memory::{MemoryConfigStore, MemoryEventStore};
