pub mod catalog;
pub mod graph;
pub mod popularity;
pub mod recommend;
pub mod service;
pub mod store;

pub use crate::domain::model::{Book, BookId, LibraryLimits, Recommendation, UserId};
pub use crate::domain::ports::SettingsProvider;
pub use crate::utils::error::Result;
pub use store::SnapshotStore;
