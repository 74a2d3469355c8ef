#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::file_store::{DEFAULT_BOOKS_FILE, DEFAULT_USERS_FILE};
use crate::core::SettingsProvider;
use crate::domain::model::LibraryLimits;
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::{
    validate_file_name, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_TOP_K: usize = 3;

/// Fully resolved settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySettings {
    pub data_dir: String,
    pub books_file: String,
    pub users_file: String,
    pub limits: LibraryLimits,
    pub top_k: usize,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            books_file: DEFAULT_BOOKS_FILE.to_string(),
            users_file: DEFAULT_USERS_FILE.to_string(),
            limits: LibraryLimits::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl LibrarySettings {
    /// Overlays every value present in `config`.
    pub fn apply_toml(&mut self, config: &TomlConfig) {
        if let Some(library) = &config.library {
            if let Some(limit) = library.borrow_limit {
                self.limits.borrow_limit = limit;
            }
            if library.max_users.is_some() {
                self.limits.max_users = library.max_users;
            }
            if let Some(top_k) = library.top_k {
                self.top_k = top_k;
            }
        }

        if let Some(storage) = &config.storage {
            if let Some(dir) = &storage.data_dir {
                self.data_dir = dir.clone();
            }
            if let Some(books) = &storage.books_file {
                self.books_file = books.clone();
            }
            if let Some(users) = &storage.users_file {
                self.users_file = users.clone();
            }
        }
    }
}

impl Validate for LibrarySettings {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.data_dir)?;
        validate_file_name("storage.books_file", &self.books_file)?;
        validate_file_name("storage.users_file", &self.users_file)?;
        validate_positive_number("library.borrow_limit", self.limits.borrow_limit, 1)?;
        validate_positive_number("library.top_k", self.top_k, 1)?;
        if let Some(max_users) = self.limits.max_users {
            validate_positive_number("library.max_users", max_users, 1)?;
        }
        if self.books_file == self.users_file {
            return Err(LibraryError::InvalidConfigValueError {
                field: "storage.users_file".to_string(),
                value: self.users_file.clone(),
                reason: "Books and users must live in different files".to_string(),
            });
        }
        Ok(())
    }
}

impl SettingsProvider for LibrarySettings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn books_file(&self) -> &str {
        &self.books_file
    }

    fn users_file(&self) -> &str {
        &self.users_file
    }

    fn limits(&self) -> LibraryLimits {
        self.limits
    }

    fn top_k(&self) -> usize {
        self.top_k
    }
}
