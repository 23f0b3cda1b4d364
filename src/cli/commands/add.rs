//! `surelock add` — encrypt and store a new entry.

use crate::cli::output;
use crate::cli::{
    category_or_default, load_settings, prompt_entry_password, prompt_master_password,
    vault_path, Cli,
};
use crate::errors::{Result, SurelockError};
use crate::vault::{schema, Vault};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    entry: &str,
    username: &str,
    category: Option<&str>,
    description: &str,
) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;
    let category = category_or_default(category, &settings);

    // `insert_entry` creates the category in the same transaction.
    schema::validate_category_name(&category)?;
    let mut vault = Vault::open(&path)?;

    // Check before prompting so the user does not type a password for nothing.
    if vault.entry_exists(&category, entry)? {
        output::tip(&format!(
            "Run `surelock del {entry} {category}` first to replace it."
        ));
        return Err(SurelockError::DuplicateEntry {
            category,
            entry: entry.to_string(),
        });
    }

    let master = prompt_master_password()?;
    let password = prompt_entry_password(entry)?;

    vault.insert_entry(
        &category,
        entry,
        username,
        &password,
        description,
        master.as_bytes(),
    )?;
    vault.close()?;

    output::success(&format!("Added '{entry}' to category '{category}'"));
    Ok(())
}
