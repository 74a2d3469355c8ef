use crate::core::catalog::BookCatalog;
use crate::core::graph::UserInteractionGraph;
use crate::utils::error::Result;

/// Durable home of the whole model. Implementations replace the snapshot
/// wholesale on every `save`.
pub trait SnapshotStore {
    /// Returns the empty model when no snapshot exists yet.
    fn load(&self, borrow_limit: usize) -> Result<(BookCatalog, UserInteractionGraph)>;
    fn save(&self, catalog: &BookCatalog, graph: &UserInteractionGraph) -> Result<()>;
}
