//! `surelock init` — create a new, empty vault file.

use crate::cli::output;
use crate::cli::{load_settings, vault_path, Cli};
use crate::errors::Result;
use crate::vault::Vault;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    if path.exists() {
        output::tip("Use `surelock add` to add entries to the existing vault.");
    }
    let vault = Vault::init(&path, settings.kdf_iterations)?;
    vault.close()?;

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `surelock add <ENTRY> <USERNAME>` to add an entry.");
    output::tip("Run `surelock show` to list your entries.");

    Ok(())
}
