//! Line-oriented text codec for the library snapshot.
//!
//! Books:  `<id> <title> <times_borrowed>`
//! Users:  `<id> <count> <book_1> ... <book_count>`
//!
//! Writers emit single spaces and a trailing newline per record. Readers
//! accept any whitespace, trailing blanks and empty lines.

use crate::core::catalog::BookCatalog;
use crate::core::graph::UserInteractionGraph;
use crate::domain::model::Book;
use crate::utils::error::{LibraryError, Result};
use std::str::FromStr;

pub const BOOKS_STREAM: &str = "books";
pub const USERS_STREAM: &str = "users";

pub fn encode_books(catalog: &BookCatalog) -> String {
    catalog
        .all()
        .iter()
        .map(|book| format!("{} {} {}\n", book.id, book.title, book.times_borrowed))
        .collect()
}

/// Writes each user's recorded history as loaded, including entries that
/// never resolved to a catalog book.
pub fn encode_users(graph: &UserInteractionGraph) -> String {
    let mut out = String::new();
    for &user_id in graph.users() {
        let books = graph.borrowed_in_order(user_id).unwrap_or_default();
        out.push_str(&format!("{} {}", user_id, books.len()));
        for book_id in books {
            out.push_str(&format!(" {}", book_id));
        }
        out.push('\n');
    }
    out
}

/// Parses the books stream. Duplicate ids and malformed lines are errors.
pub fn decode_books(content: &str) -> Result<BookCatalog> {
    let mut catalog = BookCatalog::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let [id, title, times] = fields.as_slice() else {
            return Err(format_error(
                BOOKS_STREAM,
                line_no,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        let book = Book::new(parse_field(BOOKS_STREAM, line_no, "id", id)?, *title)
            .with_times_borrowed(parse_field(BOOKS_STREAM, line_no, "times_borrowed", times)?);

        catalog.insert(book).map_err(|e| match e {
            LibraryError::DuplicateBook { book_id } => {
                format_error(BOOKS_STREAM, line_no, format!("duplicate book id {}", book_id))
            }
            other => other,
        })?;
    }

    Ok(catalog)
}

/// Rebuilds the graph from the users stream. Entries that point at books
/// missing from `catalog`, and repeated entries, stay in the user's history
/// so they are saved back, but add no edge.
pub fn decode_users(
    content: &str,
    catalog: &BookCatalog,
    borrow_limit: usize,
) -> Result<UserInteractionGraph> {
    let mut graph = UserInteractionGraph::new(borrow_limit);

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();
        let Some(id) = fields.next() else {
            continue;
        };
        let user_id = parse_field(USERS_STREAM, line_no, "id", id)?;

        let count: usize = match fields.next() {
            Some(raw) => parse_field(USERS_STREAM, line_no, "borrowed_count", raw)?,
            None => {
                return Err(format_error(USERS_STREAM, line_no, "missing borrowed count".to_string()))
            }
        };

        let book_ids = fields
            .map(|raw| parse_field(USERS_STREAM, line_no, "book id", raw))
            .collect::<Result<Vec<i64>>>()?;
        if book_ids.len() != count {
            return Err(format_error(
                USERS_STREAM,
                line_no,
                format!("declared {} books but listed {}", count, book_ids.len()),
            ));
        }

        if !graph.register_user(user_id) {
            return Err(format_error(
                USERS_STREAM,
                line_no,
                format!("duplicate user id {}", user_id),
            ));
        }

        for book_id in book_ids {
            let known = catalog.contains(book_id);
            if graph.restore_entry(user_id, book_id, known) {
                continue;
            }
            if known {
                tracing::warn!(user_id, book_id, line = line_no, "Duplicate borrow kept in history only");
            } else {
                tracing::warn!(user_id, book_id, line = line_no, "Borrow of unknown book kept in history only");
            }
        }

        if graph.borrowed_count(user_id) > borrow_limit {
            tracing::warn!(
                user_id,
                borrowed = graph.borrowed_count(user_id),
                borrow_limit,
                "User already holds more books than the borrow limit"
            );
        }
    }

    Ok(graph)
}

fn parse_field<T: FromStr>(stream: &'static str, line: usize, field: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        format_error(stream, line, format!("{} '{}' is not a valid number", field, raw))
    })
}

fn format_error(stream: &'static str, line: usize, reason: String) -> LibraryError {
    LibraryError::SnapshotFormat {
        stream,
        line,
        reason,
    }
}
