//! `surelock add-category` and `surelock delete-category`.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{load_settings, vault_path, Cli};
use crate::errors::{Result, SurelockError};
use crate::vault::Vault;

/// Execute the `add-category` command.
pub fn execute_add(cli: &Cli, category: &str) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    let vault = Vault::open(&path)?;
    let existed = vault.category_exists(category)?;
    vault.create_category(category)?;
    vault.close()?;

    if existed {
        output::info(&format!("Category '{category}' already exists."));
    } else {
        output::success(&format!("Created category '{category}'"));
    }
    Ok(())
}

/// Execute the `delete-category` command.
pub fn execute_delete(cli: &Cli, category: &str, force: bool) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    let vault = Vault::open(&path)?;
    if !vault.category_exists(category)? {
        return Err(SurelockError::CategoryNotFound(category.to_string()));
    }

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let count = vault.retrieve_category(category)?.len();
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete category '{category}' and its {count} entr{}?",
                if count == 1 { "y" } else { "ies" }
            ))
            .default(false)
            .interact()
            .map_err(|e| SurelockError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.delete_category(category)?;
    vault.close()?;

    output::success(&format!("Deleted category '{category}'"));
    Ok(())
}
