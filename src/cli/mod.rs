//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SurelockError};

/// Environment variable that supplies the master password (CI, scripts).
pub const MASTER_PASSWORD_ENV: &str = "SURELOCK_PASSWORD";

/// Environment variable that supplies a new entry's password.
pub const ENTRY_PASSWORD_ENV: &str = "SURELOCK_ENTRY_PASSWORD";

/// SureLock CLI: encrypted password vault.
#[derive(Parser)]
#[command(name = "surelock", about = "Encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault database file (default: surelock.db)
    #[arg(short, long, global = true, env = "SURELOCK_FILE")]
    pub file: Option<String>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault file
    Init,

    /// Add a new entry
    Add {
        /// Name of the new entry (e.g. gmail)
        entry: String,
        /// Username for the entry
        username: String,
        /// Category to add the entry to (default: root)
        category: Option<String>,
        /// Description of the entry
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// View an entry's password
    View {
        /// Entry whose password you want to see
        entry: String,
        /// Category of the entry (default: root)
        category: Option<String>,
        /// Do not copy the password to the clipboard
        #[arg(long)]
        no_clipboard: bool,
    },

    /// Delete an entry
    #[command(alias = "delete")]
    Del {
        /// Entry to delete
        entry: String,
        /// Category of the entry (default: root)
        category: Option<String>,
    },

    /// Show a category, or every category
    Show {
        /// Category to show (shows all when omitted)
        category: Option<String>,
        /// List categories with their entry counts
        #[arg(short = 'c', long)]
        list_categories: bool,
    },

    /// Add a category
    #[command(alias = "add_category")]
    AddCategory {
        /// Name of the new category
        category: String,
    },

    /// Delete a category and all of its entries
    #[command(alias = "delete_category")]
    DeleteCategory {
        /// Category to delete
        category: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.surelock.toml` from the current directory (or defaults).
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Build the full path to the vault file from the CLI arguments.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(settings.vault_path(&cwd, cli.file.as_deref()))
}

/// Resolve the category argument, falling back to the configured default.
pub fn category_or_default(category: Option<&str>, settings: &Settings) -> String {
    category.map_or_else(|| settings.default_category.clone(), str::to_string)
}

/// Get the master password, trying in order:
/// 1. `SURELOCK_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_master_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(MASTER_PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| SurelockError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Get the password for a new entry, trying in order:
/// 1. `SURELOCK_ENTRY_PASSWORD` env var
/// 2. Piped stdin (stdin is not a terminal)
/// 3. Interactive prompt with confirmation
pub fn prompt_entry_password(entry: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(ENTRY_PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']);
        return Ok(Zeroizing::new(trimmed.to_string()));
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {entry}"))
        .with_confirmation("Confirm password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| SurelockError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
