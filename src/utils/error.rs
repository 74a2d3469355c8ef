use crate::domain::model::{BookId, UserId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Book {book_id} not found")]
    BookNotFound { book_id: BookId },

    #[error("User {user_id} is unknown")]
    UnknownUser { user_id: UserId },

    #[error("User {user_id} has already borrowed book {book_id}")]
    AlreadyBorrowed { user_id: UserId, book_id: BookId },

    #[error("User {user_id} reached the borrow limit of {limit}")]
    CapacityExceeded { user_id: UserId, limit: usize },

    #[error("Cannot register user {user_id}: user limit of {limit} reached")]
    UserLimitReached { user_id: UserId, limit: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed {stream} snapshot at line {line}: {reason}")]
    SnapshotFormat {
        stream: &'static str,
        line: usize,
        reason: String,
    },

    #[error("Invalid title for book {book_id}: {reason}")]
    InvalidTitle { book_id: BookId, reason: String },

    #[error("Book {book_id} already exists in the catalog")]
    DuplicateBook { book_id: BookId },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Conflict,
    Capacity,
    Storage,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

impl LibraryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BookNotFound { .. } | Self::UnknownUser { .. } => ErrorCategory::Lookup,
            Self::AlreadyBorrowed { .. } | Self::DuplicateBook { .. } => ErrorCategory::Conflict,
            Self::CapacityExceeded { .. } | Self::UserLimitReached { .. } => {
                ErrorCategory::Capacity
            }
            Self::IoError(_) => ErrorCategory::Storage,
            Self::SnapshotFormat { .. } | Self::InvalidTitle { .. } => ErrorCategory::Data,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// Rejected requests are `Low`: the model is untouched and the session goes on.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::Conflict | ErrorCategory::Capacity => {
                ErrorSeverity::Low
            }
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    /// Stable, per-kind message shown to people at the shell.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::BookNotFound { book_id } => format!("Invalid book ID: {}", book_id),
            Self::UnknownUser { user_id } => format!("Invalid user: {}", user_id),
            Self::AlreadyBorrowed { .. } => "Book already borrowed by this user".to_string(),
            Self::CapacityExceeded { limit, .. } => {
                format!("Borrow limit reached ({} books)", limit)
            }
            Self::UserLimitReached { limit, .. } => {
                format!("User limit reached ({} users)", limit)
            }
            Self::IoError(e) => format!("Could not access library data: {}", e),
            Self::SnapshotFormat { stream, line, .. } => {
                format!("Library data is corrupted ({} file, line {})", stream, line)
            }
            Self::InvalidTitle { book_id, .. } => {
                format!("Book {} has a title that cannot be stored", book_id)
            }
            Self::DuplicateBook { book_id } => format!("Book {} is listed twice", book_id),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::BookNotFound { .. } => "Check the book ID against the popular list",
            Self::UnknownUser { .. } => "Borrow a book first to register the user",
            Self::AlreadyBorrowed { .. } => "Pick a different book",
            Self::CapacityExceeded { .. } => "Raise --borrow-limit or use another user",
            Self::UserLimitReached { .. } => "Raise --max-users or reuse an existing user",
            Self::IoError(_) => "Check that the data directory exists and is writable",
            Self::SnapshotFormat { .. } => {
                "Fix or remove the offending line in the data directory"
            }
            Self::InvalidTitle { .. } => "Use a single-word title, e.g. C_Programming",
            Self::DuplicateBook { .. } => "Remove the duplicate line from books.txt",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
