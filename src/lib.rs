pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::FileSnapshotStore;
pub use config::LibrarySettings;
pub use crate::core::{
    catalog::BookCatalog, graph::UserInteractionGraph, popularity::PopularityRanker,
    recommend::RecommendationEngine, service::LibraryService,
};
pub use domain::model::{Book, BookId, BorrowReceipt, Durability, LibraryLimits, Recommendation, UserId};
pub use utils::error::{LibraryError, Result};
