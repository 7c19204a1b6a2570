pub mod event_sink;
pub mod snapshot_store;

pub use event_sink::*;
pub use snapshot_store::SnapshotStore;
