use crate::adapters::snapshot::{decode_books, decode_users, encode_books, encode_users};
use crate::core::catalog::BookCatalog;
use crate::core::graph::UserInteractionGraph;
use crate::core::store::SnapshotStore;
use crate::domain::ports::SettingsProvider;
use crate::utils::error::Result;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const DEFAULT_BOOKS_FILE: &str = "books.txt";
pub const DEFAULT_USERS_FILE: &str = "users.txt";

/// Snapshot kept as two text files. Each file is replaced atomically: the
/// new content is written to a temporary file in the same directory, synced,
/// then renamed over the old one.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    books_path: PathBuf,
    users_path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(books_path: impl Into<PathBuf>, users_path: impl Into<PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            users_path: users_path.into(),
        }
    }

    /// `books.txt` and `users.txt` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_BOOKS_FILE), dir.join(DEFAULT_USERS_FILE))
    }

    /// Paths taken from resolved settings.
    pub fn from_settings<C: SettingsProvider>(settings: &C) -> Self {
        let dir = Path::new(settings.data_dir());
        Self::new(dir.join(settings.books_file()), dir.join(settings.users_file()))
    }

    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    pub fn users_path(&self) -> &Path {
        &self.users_path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, borrow_limit: usize) -> Result<(BookCatalog, UserInteractionGraph)> {
        let catalog = match read_optional(&self.books_path)? {
            Some(content) => decode_books(&content)?,
            None => {
                tracing::info!("No book snapshot at {}, starting empty", self.books_path.display());
                BookCatalog::new()
            }
        };

        let graph = match read_optional(&self.users_path)? {
            Some(content) => decode_users(&content, &catalog, borrow_limit)?,
            None => {
                tracing::info!("No user snapshot at {}, starting empty", self.users_path.display());
                UserInteractionGraph::new(borrow_limit)
            }
        };

        tracing::debug!(
            books = catalog.len(),
            users = graph.user_count(),
            "Loaded library snapshot"
        );
        Ok((catalog, graph))
    }

    fn save(&self, catalog: &BookCatalog, graph: &UserInteractionGraph) -> Result<()> {
        write_atomically(&self.books_path, encode_books(catalog).as_bytes())?;
        write_atomically(&self.users_path, encode_users(graph).as_bytes())?;
        tracing::debug!(
            books = catalog.len(),
            users = graph.user_count(),
            "Saved library snapshot"
        );
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
