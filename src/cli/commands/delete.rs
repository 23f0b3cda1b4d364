//! `surelock del` — remove an entry from a category.

use crate::cli::output;
use crate::cli::{category_or_default, load_settings, vault_path, Cli};
use crate::errors::Result;
use crate::vault::Vault;

/// Execute the `del` command.
pub fn execute(cli: &Cli, entry: &str, category: Option<&str>) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;
    let category = category_or_default(category, &settings);

    let vault = Vault::open(&path)?;
    let removed = vault.delete_entry(&category, entry)?;
    vault.close()?;

    if removed {
        output::success(&format!("Deleted '{entry}' from category '{category}'"));
    } else {
        output::info(&format!(
            "No entry named '{entry}' in category '{category}', nothing to delete."
        ));
    }

    Ok(())
}
