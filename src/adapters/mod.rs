// Adapters layer: concrete implementations of the domain ports.

pub mod file_store;
pub mod snapshot;

pub use file_store::FileSnapshotStore;
