//! Named snapshots of parameter sets, persisted as one JSON list in a
//! key-value store.

pub mod archive;
pub mod store;

pub use archive::{ScenarioArchive, SCENARIOS_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
