use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SureLock.
#[derive(Debug, Error)]
pub enum SurelockError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong password or corrupted data")]
    WrongPasswordOrCorruptData,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("No vault at {0} — run `surelock init` first")]
    VaultNotInitialized(PathBuf),

    #[error("Vault already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("No category named '{0}'")]
    CategoryNotFound(String),

    #[error("No entry named '{entry}' in category '{category}'")]
    EntryNotFound { category: String, entry: String },

    #[error("Entry '{entry}' already exists in category '{category}'")]
    DuplicateEntry { category: String, entry: String },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for SureLock results.
pub type Result<T> = std::result::Result<T, SurelockError>;
