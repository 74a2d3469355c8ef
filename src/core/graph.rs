use crate::domain::model::{BookId, UserId};
use crate::utils::error::{LibraryError, Result};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
struct Shelf {
    // Every recorded entry in borrow order, written back verbatim. May hold
    // loaded ids that never resolved to an edge.
    history: Vec<BookId>,
    // Resolved edges, a subset of `history`.
    books: HashSet<BookId>,
}

/// Bipartite user→book borrowing relation with a reverse book→user index.
///
/// Both directions are updated together by every insertion path, so
/// `borrowers(b)` contains `u` exactly when `neighbors(u)` contains `b`.
#[derive(Debug, Clone)]
pub struct UserInteractionGraph {
    borrow_limit: usize,
    users: Vec<UserId>,
    forward: HashMap<UserId, Shelf>,
    reverse: HashMap<BookId, HashSet<UserId>>,
}

impl UserInteractionGraph {
    /// Creates an empty graph that caps each user at `borrow_limit` books.
    pub fn new(borrow_limit: usize) -> Self {
        Self {
            borrow_limit,
            users: Vec::new(),
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    pub fn borrow_limit(&self) -> usize {
        self.borrow_limit
    }

    /// Registers `user_id` if it is new. Returns `true` when it was added.
    pub fn register_user(&mut self, user_id: UserId) -> bool {
        if self.forward.contains_key(&user_id) {
            return false;
        }
        self.users.push(user_id);
        self.forward.insert(user_id, Shelf::default());
        true
    }

    /// Whether `user_id` has been registered, with or without borrows.
    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.forward.contains_key(&user_id)
    }

    /// Users in registration order.
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Whether the edge `user_id → book_id` exists.
    pub fn has_borrowed(&self, user_id: UserId, book_id: BookId) -> bool {
        self.forward
            .get(&user_id)
            .is_some_and(|shelf| shelf.books.contains(&book_id))
    }

    /// Books borrowed by `user_id`, or `None` for an unknown user.
    pub fn neighbors(&self, user_id: UserId) -> Option<&HashSet<BookId>> {
        self.forward.get(&user_id).map(|shelf| &shelf.books)
    }

    /// The recorded borrow history of `user_id` in the order it was written.
    pub fn borrowed_in_order(&self, user_id: UserId) -> Option<&[BookId]> {
        self.forward.get(&user_id).map(|shelf| shelf.history.as_slice())
    }

    /// Length of the recorded history, the figure checked against the limit.
    pub fn borrowed_count(&self, user_id: UserId) -> usize {
        self.forward.get(&user_id).map_or(0, |shelf| shelf.history.len())
    }

    /// Users holding an edge to `book_id`.
    pub fn borrowers(&self, book_id: BookId) -> Option<&HashSet<UserId>> {
        self.reverse.get(&book_id)
    }

    /// Checks whether `add_edge` would succeed, without touching the graph.
    pub fn check_edge(&self, user_id: UserId, book_id: BookId) -> Result<()> {
        if self.has_borrowed(user_id, book_id) {
            return Err(LibraryError::AlreadyBorrowed { user_id, book_id });
        }
        if self.borrowed_count(user_id) >= self.borrow_limit {
            return Err(LibraryError::CapacityExceeded {
                user_id,
                limit: self.borrow_limit,
            });
        }
        Ok(())
    }

    /// Records that `user_id` borrowed `book_id`, registering the user on
    /// success. A rejected edge leaves the graph unchanged.
    pub fn add_edge(&mut self, user_id: UserId, book_id: BookId) -> Result<()> {
        self.check_edge(user_id, book_id)?;
        self.register_user(user_id);
        if let Some(shelf) = self.forward.get_mut(&user_id) {
            shelf.history.push(book_id);
            shelf.books.insert(book_id);
        }
        self.reverse.entry(book_id).or_default().insert(user_id);
        Ok(())
    }

    /// Appends an entry read from a snapshot. The borrow limit is not applied
    /// because history never shrinks. The entry always joins the history;
    /// it becomes an edge only when `resolved` and not already linked.
    /// Returns `true` when an edge was added.
    pub(crate) fn restore_entry(&mut self, user_id: UserId, book_id: BookId, resolved: bool) -> bool {
        self.register_user(user_id);
        let Some(shelf) = self.forward.get_mut(&user_id) else {
            return false;
        };
        shelf.history.push(book_id);
        let linked = resolved && shelf.books.insert(book_id);
        if linked {
            self.reverse.entry(book_id).or_default().insert(user_id);
        }
        linked
    }

    /// Number of books both users have borrowed.
    pub fn shared_count(&self, a: UserId, b: UserId) -> usize {
        match (self.neighbors(a), self.neighbors(b)) {
            (Some(left), Some(right)) => {
                let (small, large) = if left.len() <= right.len() {
                    (left, right)
                } else {
                    (right, left)
                };
                small.iter().filter(|id| large.contains(id)).count()
            }
            _ => 0,
        }
    }
}
