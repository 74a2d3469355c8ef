use crate::domain::model::{Book, BookId};
use crate::utils::error::{LibraryError, Result};
use std::collections::HashMap;

/// Id-keyed book store. Iteration follows insertion order so a loaded
/// snapshot is written back unchanged.
#[derive(Debug, Clone, Default)]
pub struct BookCatalog {
    books: Vec<Book>,
    index: HashMap<BookId, usize>,
}

impl BookCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a book. Ids must be unique and titles a single non-empty token.
    pub fn insert(&mut self, book: Book) -> Result<()> {
        if self.index.contains_key(&book.id) {
            return Err(LibraryError::DuplicateBook { book_id: book.id });
        }
        validate_title(&book)?;

        self.index.insert(book.id, self.books.len());
        self.books.push(book);
        Ok(())
    }

    /// Looks a book up by id, failing with `BookNotFound`.
    pub fn get(&self, id: BookId) -> Result<&Book> {
        self.index
            .get(&id)
            .and_then(|&slot| self.books.get(slot))
            .ok_or(LibraryError::BookNotFound { book_id: id })
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.index.contains_key(&id)
    }

    /// Increments the borrow counter of `id` and returns the updated book.
    pub fn record_borrow(&mut self, id: BookId) -> Result<&Book> {
        let book = self
            .index
            .get(&id)
            .and_then(|&slot| self.books.get_mut(slot))
            .ok_or(LibraryError::BookNotFound { book_id: id })?;

        book.times_borrowed += 1;
        Ok(book)
    }

    /// Every book, in insertion order.
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

fn validate_title(book: &Book) -> Result<()> {
    if book.title.is_empty() {
        return Err(LibraryError::InvalidTitle {
            book_id: book.id,
            reason: "title is empty".to_string(),
        });
    }
    if book.title.chars().any(char::is_whitespace) {
        return Err(LibraryError::InvalidTitle {
            book_id: book.id,
            reason: "title contains whitespace".to_string(),
        });
    }
    Ok(())
}
