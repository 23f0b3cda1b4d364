//! `surelock view` — decrypt an entry's password, print it and copy it
//! to the clipboard.

use crate::cli::output;
use crate::cli::{category_or_default, load_settings, prompt_master_password, vault_path, Cli};
use crate::errors::{Result, SurelockError};
use crate::vault::Vault;

/// Execute the `view` command.
pub fn execute(cli: &Cli, entry: &str, category: Option<&str>, no_clipboard: bool) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;
    let category = category_or_default(category, &settings);

    let vault = Vault::open(&path)?;

    // Fail fast on a missing entry, before asking for the master password.
    if !vault.entry_exists(&category, entry)? {
        return Err(SurelockError::EntryNotFound {
            category,
            entry: entry.to_string(),
        });
    }

    let master = prompt_master_password()?;
    let revealed = vault.retrieve_entry(&category, entry, master.as_bytes())?;
    vault.close()?;

    println!("{}", revealed.password.as_str());

    if !no_clipboard {
        match copy_to_clipboard(&revealed.password) {
            Ok(()) => output::note("Password copied to clipboard."),
            Err(e) => output::warning(&format!("Could not copy to clipboard: {e}")),
        }
    }

    Ok(())
}

fn copy_to_clipboard(text: &str) -> std::result::Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_owned())
}
