use anyhow::Context;
use clap::Parser;
use library_recommender::app::report::{render_borrow, render_popular, render_recommendations};
use library_recommender::app::Shell;
use library_recommender::core::SettingsProvider;
use library_recommender::utils::error::{ErrorSeverity, LibraryError};
use library_recommender::utils::logger;
use library_recommender::{CliConfig, Command, FileSnapshotStore, LibraryService};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting library-recommender");

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    let store = FileSnapshotStore::from_settings(&settings);
    tracing::info!("📁 Library data in {}", settings.data_dir());
    let mut service = LibraryService::open(store, settings.limits());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let command = config.command();
    let unsynced_exit_code = command.unsynced_exit_code();

    let outcome = match command {
        Command::Shell => {
            Shell::new(&mut service, io::stdin().lock(), &mut out, settings.top_k()).run()
        }
        Command::Borrow { user, book } => service
            .borrow(user, book)
            .and_then(|receipt| render_borrow(&mut out, &receipt, config.json)),
        Command::Recommend { user } => service
            .recommend(user)
            .and_then(|recs| render_recommendations(&mut out, &recs, config.json)),
        Command::Popular { top } => {
            let k = top.unwrap_or_else(|| settings.top_k());
            render_popular(&mut out, &service.top_popular(k), k, config.json)
        }
    };
    out.flush().context("failed to flush stdout")?;

    if let Err(e) = outcome {
        exit_with(&e);
    }

    if !service.is_synced() {
        tracing::warn!("Exiting with unsaved changes");
        if unsynced_exit_code > 0 {
            std::process::exit(unsynced_exit_code);
        }
    }

    Ok(())
}

fn exit_with(e: &LibraryError) {
    tracing::error!(
        "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
