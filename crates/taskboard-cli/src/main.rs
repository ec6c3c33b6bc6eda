//! # taskboard
//!
//! Command line front end: resolves settings, opens the file-backed store and
//! runs one command against it.

#![deny(unsafe_code)]

mod commands;
mod render;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use taskboard_core::logging::init_subscriber;
use taskboard_settings::get_settings;
use taskboard_store::BoardStore;
use taskboard_users::{PasswordHasher, UserDirectory};
use tracing::{debug, info};

use crate::commands::Command;

/// Task assignment board.
#[derive(Parser, Debug)]
#[command(name = "taskboard", about = "Assign tasks, track completion, rank users")]
struct Cli {
    /// Data directory (overrides settings).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = get_settings();
    init_subscriber(&settings.logging.level);

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.storage.data_dir));
    debug!(data_dir = %data_dir.display(), "opening store");
    let store = BoardStore::open(&data_dir);
    let hasher = PasswordHasher::new(settings.security.pbkdf2_iterations);

    if settings.seed.demo_accounts {
        let added = UserDirectory::with_hasher(&store, hasher)
            .seed_demo_accounts()
            .context("Failed to seed demo accounts")?;
        if added > 0 {
            info!(added, "demo accounts ready");
        }
    }

    let rendered = commands::execute(&cli.command, &store, hasher)?;

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        let encoded = serde_json::to_string_pretty(&rendered.json)?;
        writeln!(stdout, "{encoded}")?;
    } else {
        writeln!(stdout, "{}", rendered.text)?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
