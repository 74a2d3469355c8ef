use serde::{Deserialize, Serialize};

pub type BookId = i64;
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub times_borrowed: u64,
}

impl Book {
    pub fn new(id: BookId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            times_borrowed: 0,
        }
    }

    pub fn with_times_borrowed(mut self, times_borrowed: u64) -> Self {
        self.times_borrowed = times_borrowed;
        self
    }
}

/// A recommended book together with its accumulated co-borrow score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub book: Book,
    pub score: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryLimits {
    /// Maximum number of books a single user may hold.
    pub borrow_limit: usize,
    /// Maximum number of registered users; `None` means unbounded.
    pub max_users: Option<usize>,
}

impl Default for LibraryLimits {
    fn default() -> Self {
        Self {
            borrow_limit: 20,
            max_users: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Durability {
    Persisted,
    /// The borrow is committed in memory but the snapshot could not be written.
    Unsynced { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowReceipt {
    pub user_id: UserId,
    pub book: Book,
    pub durability: Durability,
}

impl BorrowReceipt {
    pub fn is_persisted(&self) -> bool {
        matches!(self.durability, Durability::Persisted)
    }
}
