use crate::config::toml_config::TomlConfig;
use crate::config::LibrarySettings;
use crate::domain::model::{BookId, UserId};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "library-recommender")]
#[command(about = "Track library borrowing and suggest books from shared reading history")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding books.txt and users.txt
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Maximum number of books one user may borrow
    #[arg(long, global = true)]
    pub borrow_limit: Option<usize>,

    /// Maximum number of registered users
    #[arg(long, global = true)]
    pub max_users: Option<usize>,

    /// Number of books in the popular list
    #[arg(long, global = true)]
    pub top_k: Option<usize>,

    /// Print command results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive menu (default)
    Shell,
    /// Borrow a book for a user
    Borrow {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        book: BookId,
    },
    /// Recommend books for a user
    Recommend {
        #[arg(long)]
        user: UserId,
    },
    /// Show the most borrowed books
    Popular {
        /// Overrides --top-k for this call
        #[arg(long)]
        top: Option<usize>,
    },
}

impl Command {
    /// Exit status for a run that ends with unsaved changes. The shell has
    /// already shown the durability warning, so leaving it exits cleanly.
    pub fn unsynced_exit_code(&self) -> i32 {
        match self {
            Command::Shell => 0,
            _ => 2,
        }
    }
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Shell)
    }

    /// Defaults, then the TOML file if one was given, then explicit flags.
    pub fn resolve(&self) -> Result<LibrarySettings> {
        let mut settings = LibrarySettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path);
            settings.apply_toml(&TomlConfig::from_file(path)?);
        }

        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(limit) = self.borrow_limit {
            settings.limits.borrow_limit = limit;
        }
        if self.max_users.is_some() {
            settings.limits.max_users = self.max_users;
        }
        if let Some(top_k) = self.top_k {
            settings.top_k = top_k;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_to_shell() {
        let cli = CliConfig::parse_from(["library-recommender"]);
        assert_eq!(cli.command(), Command::Shell);
        let settings = cli.resolve().unwrap();
        assert_eq!(settings, LibrarySettings::default());
    }

    #[test]
    fn test_parse_borrow_subcommand() {
        let cli = CliConfig::parse_from([
            "library-recommender",
            "borrow",
            "--user",
            "7",
            "--book",
            "101",
            "--json",
        ]);
        assert_eq!(cli.command(), Command::Borrow { user: 7, book: 101 });
        assert!(cli.json);
    }

    #[test]
    fn test_flags_override_toml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[library]\nborrow_limit = 4\ntop_k = 5\n[storage]\ndata_dir = \"/srv/lib\"\n")
            .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = CliConfig::parse_from([
            "library-recommender",
            "--config",
            path,
            "--borrow-limit",
            "9",
        ]);
        let settings = cli.resolve().unwrap();
        assert_eq!(settings.limits.borrow_limit, 9);
        assert_eq!(settings.top_k, 5);
        assert_eq!(settings.data_dir, "/srv/lib");
    }

    #[test]
    fn test_unsynced_exit_code_only_fails_one_shot_commands() {
        assert_eq!(Command::Shell.unsynced_exit_code(), 0);
        assert_eq!(Command::Borrow { user: 7, book: 101 }.unsynced_exit_code(), 2);
        assert_eq!(Command::Popular { top: None }.unsynced_exit_code(), 2);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = CliConfig::parse_from(["library-recommender", "--top-k", "0"]);
        assert!(cli.resolve().is_err());
    }
}
