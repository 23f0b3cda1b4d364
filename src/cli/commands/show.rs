//! `surelock show` — list categories and entries without decrypting.

use crate::cli::output;
use crate::cli::{load_settings, vault_path, Cli};
use crate::errors::Result;
use crate::vault::Vault;

/// Execute the `show` command.
///
/// - `--list-categories`: category names with entry counts.
/// - a category name: that category's entries.
/// - neither: every category's entries.
pub fn execute(cli: &Cli, category: Option<&str>, list_categories: bool) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;
    let vault = Vault::open(&path)?;

    if list_categories {
        output::print_categories_table(&vault.list_categories()?);
        return vault.close();
    }

    match category {
        Some(name) => {
            let entries = vault.retrieve_category(name)?;
            output::print_entries_table(name, &entries);
        }
        None => {
            let categories = vault.list_categories()?;
            if categories.is_empty() {
                output::print_categories_table(&categories);
            }
            for summary in &categories {
                let entries = vault.retrieve_category(&summary.name)?;
                output::print_entries_table(&summary.name, &entries);
            }
        }
    }

    vault.close()
}
