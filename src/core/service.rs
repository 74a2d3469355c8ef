use crate::core::catalog::BookCatalog;
use crate::core::graph::UserInteractionGraph;
use crate::core::popularity::PopularityRanker;
use crate::core::recommend::RecommendationEngine;
use crate::core::store::SnapshotStore;
use crate::domain::model::{Book, BookId, BorrowReceipt, Durability, LibraryLimits, Recommendation, UserId};
use crate::utils::error::{LibraryError, Result};

/// Owns the in-memory model and writes it through to the snapshot store
/// after every successful mutation.
pub struct LibraryService<S: SnapshotStore> {
    catalog: BookCatalog,
    graph: UserInteractionGraph,
    store: S,
    max_users: Option<usize>,
    synced: bool,
}

impl<S: SnapshotStore> LibraryService<S> {
    /// Loads the model from `store`. Any load failure degrades to an empty
    /// model, as on a first run.
    pub fn open(store: S, limits: LibraryLimits) -> Self {
        let (catalog, graph) = match store.load(limits.borrow_limit) {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!("Failed to load library snapshot, starting empty: {}", e);
                (
                    BookCatalog::new(),
                    UserInteractionGraph::new(limits.borrow_limit),
                )
            }
        };

        tracing::info!(
            books = catalog.len(),
            users = graph.user_count(),
            borrow_limit = limits.borrow_limit,
            "Library opened"
        );

        Self::from_parts(store, catalog, graph).with_max_users(limits.max_users)
    }

    /// Wraps an already built model without touching the store.
    pub fn from_parts(store: S, catalog: BookCatalog, graph: UserInteractionGraph) -> Self {
        Self {
            catalog,
            graph,
            store,
            max_users: None,
            synced: true,
        }
    }

    /// Caps how many distinct users may be registered.
    pub fn with_max_users(mut self, max_users: Option<usize>) -> Self {
        self.max_users = max_users;
        self
    }

    pub fn catalog(&self) -> &BookCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &UserInteractionGraph {
        &self.graph
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `false` after a failed save, until a later save succeeds.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Records a borrow and writes the model through to the store. A failed
    /// save is reported in the receipt, not as an error.
    pub fn borrow(&mut self, user_id: UserId, book_id: BookId) -> Result<BorrowReceipt> {
        self.catalog.get(book_id)?;

        if !self.graph.contains_user(user_id) {
            if let Some(limit) = self.max_users {
                if self.graph.user_count() >= limit {
                    return Err(LibraryError::UserLimitReached { user_id, limit });
                }
            }
        }

        self.graph.add_edge(user_id, book_id)?;
        let book = self.catalog.record_borrow(book_id)?.clone();
        tracing::info!(user_id, book_id, times_borrowed = book.times_borrowed, "Book borrowed");

        let durability = match self.persist() {
            Ok(()) => Durability::Persisted,
            Err(e) => Durability::Unsynced {
                reason: e.to_string(),
            },
        };

        Ok(BorrowReceipt {
            user_id,
            book,
            durability,
        })
    }

    /// Ranked recommendations for a registered user.
    pub fn recommend(&self, user_id: UserId) -> Result<Vec<Recommendation>> {
        RecommendationEngine::new(&self.graph, &self.catalog).recommend(user_id)
    }

    /// The `k` most borrowed books.
    pub fn top_popular(&self, k: usize) -> Vec<Book> {
        PopularityRanker::new(&self.catalog).top(k)
    }

    /// Writes the model now, regardless of the sync flag.
    pub fn flush(&mut self) -> Result<()> {
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        match self.store.save(&self.catalog, &self.graph) {
            Ok(()) => {
                if !self.synced {
                    tracing::info!("Library snapshot back in sync");
                }
                self.synced = true;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Library snapshot not saved, in-memory state is unsynced: {}", e);
                self.synced = false;
                Err(e)
            }
        }
    }
}
