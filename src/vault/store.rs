//! High-level vault operations used by CLI commands.
//!
//! `Vault` wraps the SQLite layout and the crypto layer so that the rest
//! of the application can work with simple method calls like
//! `vault.insert_entry("root", "gmail", "me", "s3cr3t", "", master)`.
//!
//! The vault never holds a key: every operation that touches a password
//! takes the master password, derives the key, and drops it on return.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::crypto::cipher::{decrypt, decrypt_to_string, encrypt};
use crate::crypto::kdf::{derive_key, KdfParams};
use crate::crypto::keys::MasterKey;
use crate::errors::{Result, SurelockError};

use super::entry::{CategorySummary, Entry, RevealedEntry};
use super::schema::{self, quote_ident};

/// Known plaintext encrypted under the master key to detect a wrong
/// master password before anything is written.
const VERIFIER_PLAINTEXT: &[u8] = b"surelock:master-key-check";

/// The main vault handle.  Create one with `Vault::init` or `Vault::open`.
///
/// The SQLite connection is closed when the handle is dropped.
pub struct Vault {
    /// Path to the vault file on disk.
    path: PathBuf,

    conn: Connection,

    /// Key derivation parameters (per-vault, or the legacy constants).
    kdf: KdfParams,

    /// `true` if the file predates the metadata table.
    legacy: bool,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a brand-new, empty vault file at `path`.
    ///
    /// Generates a random salt and stores it, with the PBKDF2 iteration
    /// count, in the vault's metadata table.  Fails with `AlreadyExists`
    /// if anything is already at `path`.
    ///
    /// The file is written under a staging name and renamed into place
    /// once its metadata is committed, so a failed `init` never leaves a
    /// file at `path` that would later open as a legacy vault.
    pub fn init(path: &Path, iterations: u32) -> Result<Self> {
        if path.exists() {
            return Err(SurelockError::AlreadyExists(path.to_path_buf()));
        }

        let kdf = KdfParams::generate(iterations);
        kdf.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Left over from an interrupted init, with its rollback journal.
        let staging = staging_path(path);
        let mut journal = staging.as_os_str().to_owned();
        journal.push("-journal");
        for stale in [staging.clone(), PathBuf::from(journal)] {
            if stale.exists() {
                std::fs::remove_file(&stale)?;
            }
        }
        build_vault_file(path, &staging, &kdf)?;

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        debug!(path = %path.display(), iterations, "initialized vault");

        Ok(Self {
            path: path.to_path_buf(),
            conn,
            kdf,
            legacy: false,
        })
    }

    /// Open an existing vault file.
    ///
    /// Fails with `VaultNotInitialized` if nothing exists at `path`.
    /// Files without a metadata table are opened as legacy vaults.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SurelockError::VaultNotInitialized(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // The first query fails if the file is not an SQLite database.
        let has_meta = schema::has_meta(&conn).map_err(|e| match e {
            SurelockError::Storage(inner) => SurelockError::InvalidVaultFormat(inner.to_string()),
            other => other,
        })?;

        let (kdf, legacy) = if has_meta {
            (schema::read_kdf(&conn)?, false)
        } else {
            (KdfParams::legacy(), true)
        };

        debug!(path = %path.display(), legacy, "opened vault");

        Ok(Self {
            path: path.to_path_buf(),
            conn,
            kdf,
            legacy,
        })
    }

    /// Close the underlying file, reporting any error from SQLite.
    ///
    /// Dropping the vault also closes it; this only surfaces the error.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| SurelockError::Storage(e))
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Ensure a category exists.  Creating an existing category is a no-op.
    pub fn create_category(&self, name: &str) -> Result<()> {
        schema::validate_category_name(name)?;
        schema::create_category_table(&self.conn, name)?;
        debug!(category = name, "ensured category");
        Ok(())
    }

    /// List every category with its entry count, in creation order.
    pub fn list_categories(&self) -> Result<Vec<CategorySummary>> {
        let mut summaries = Vec::new();
        for name in schema::list_category_tables(&self.conn)? {
            let count: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", quote_ident(&name)),
                [],
                |row| row.get(0),
            )?;
            summaries.push(CategorySummary {
                name,
                entry_count: usize::try_from(count).unwrap_or_default(),
            });
        }
        Ok(summaries)
    }

    /// Returns `true` if the vault has a category with this name.
    pub fn category_exists(&self, name: &str) -> Result<bool> {
        schema::has_category(&self.conn, name)
    }

    /// Remove a category and every entry in it.
    pub fn delete_category(&self, name: &str) -> Result<()> {
        if !schema::has_category(&self.conn, name)? {
            return Err(SurelockError::CategoryNotFound(name.to_string()));
        }
        self.conn
            .execute_batch(&format!("DROP TABLE {}", quote_ident(name)))?;
        debug!(category = name, "deleted category");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------

    /// Encrypt `password` under the master password and add the entry.
    ///
    /// The category is created if it does not exist yet.  An existing
    /// entry with the same name is never overwritten: the call fails with
    /// `DuplicateEntry`.  Everything happens in one transaction, so a
    /// failure leaves the vault unchanged.
    pub fn insert_entry(
        &mut self,
        category: &str,
        entry: &str,
        username: &str,
        password: &str,
        description: &str,
        master_password: &[u8],
    ) -> Result<()> {
        schema::validate_category_name(category)?;
        schema::validate_entry_name(entry)?;

        let legacy = self.legacy;
        let tx = self.conn.transaction()?;

        schema::create_category_table(&tx, category)?;
        if find_entry(&tx, category, entry)?.is_some() {
            return Err(SurelockError::DuplicateEntry {
                category: category.to_string(),
                entry: entry.to_string(),
            });
        }

        let key = derive_key(master_password, &self.kdf)?;
        if !legacy {
            check_or_set_verifier(&tx, &key)?;
        }

        let encrypted_password = encrypt(&key, password.as_bytes())?;
        drop(key);

        tx.execute(
            &format!("INSERT INTO {} VALUES (?1, ?2, ?3, ?4)", quote_ident(category)),
            params![entry, encrypted_password, username, description],
        )?;
        tx.commit()?;

        debug!(category, entry, "inserted entry");
        Ok(())
    }

    /// Look up an entry and decrypt its password.
    ///
    /// Fails with `EntryNotFound` if the category or the entry does not
    /// exist, and with `WrongPasswordOrCorruptData` if decryption fails.
    pub fn retrieve_entry(
        &self,
        category: &str,
        entry: &str,
        master_password: &[u8],
    ) -> Result<RevealedEntry> {
        let stored = find_entry(&self.conn, category, entry)?.ok_or_else(|| {
            SurelockError::EntryNotFound {
                category: category.to_string(),
                entry: entry.to_string(),
            }
        })?;
        self.reveal(&stored, master_password)
    }

    /// Decrypt the password of an entry already read from the vault.
    pub fn reveal(&self, entry: &Entry, master_password: &[u8]) -> Result<RevealedEntry> {
        let key = derive_key(master_password, &self.kdf)?;
        check_verifier(&self.conn, &key)?;

        let password = decrypt_to_string(&key, &entry.encrypted_password)?;
        Ok(RevealedEntry {
            name: entry.name.clone(),
            username: entry.username.clone(),
            password,
            description: entry.description.clone(),
        })
    }

    /// List every entry in a category, in storage order, without
    /// decrypting anything.
    pub fn retrieve_category(&self, category: &str) -> Result<Vec<Entry>> {
        if !schema::has_category(&self.conn, category)? {
            return Err(SurelockError::CategoryNotFound(category.to_string()));
        }

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} ORDER BY rowid", quote_ident(category)))?;
        let rows = stmt.query_map([], entry_from_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Returns `true` if `category` holds an entry named `entry`.
    pub fn entry_exists(&self, category: &str, entry: &str) -> Result<bool> {
        Ok(find_entry(&self.conn, category, entry)?.is_some())
    }

    /// Remove an entry.
    ///
    /// Idempotent: deleting a missing entry (or an entry in a missing
    /// category) is a no-op.  Returns `true` if a row was removed.
    pub fn delete_entry(&self, category: &str, entry: &str) -> Result<bool> {
        if !schema::has_category(&self.conn, category)? {
            return Ok(false);
        }
        let column = schema::entry_column(&self.conn, category)?;
        let removed = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1",
                quote_ident(category),
                quote_ident(&column)
            ),
            params![entry],
        )?;
        debug!(category, entry, removed, "deleted entry");
        Ok(removed > 0)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the key derivation parameters of this vault.
    pub fn kdf_params(&self) -> &KdfParams {
        &self.kdf
    }

    /// Returns `true` if this is a legacy vault (shared salt, no metadata).
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }
}

/// Sibling path a new vault is written to before it is renamed into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".init");
    PathBuf::from(name)
}

/// Write a complete, empty vault at `staging` and move it to `path`.
///
/// On any failure the staging file is removed and nothing exists at `path`.
fn build_vault_file(path: &Path, staging: &Path, kdf: &KdfParams) -> Result<()> {
    let result = write_vault_file(staging, kdf).and_then(|()| {
        std::fs::rename(staging, path)?;
        Ok(())
    });
    if result.is_err() {
        let _ = std::fs::remove_file(staging);
    }
    result
}

fn write_vault_file(staging: &Path, kdf: &KdfParams) -> Result<()> {
    let mut conn = Connection::open(staging)?;

    // Restrict the vault file to the owner.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(staging, perms)?;
    }

    let tx = conn.transaction()?;
    schema::write_meta(&tx, kdf)?;
    tx.commit()?;

    conn.close().map_err(|(_, e)| SurelockError::Storage(e))
}

/// Build an `Entry` from a `SELECT *` row of a category table.
fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        name: schema::text_column(row, 0)?,
        encrypted_password: schema::text_column(row, 1)?,
        username: schema::text_column(row, 2)?,
        description: schema::text_column(row, 3)?,
    })
}

/// Fetch one entry, or `None` if the category or entry is missing.
fn find_entry(conn: &Connection, category: &str, entry: &str) -> Result<Option<Entry>> {
    if !schema::has_category(conn, category)? {
        return Ok(None);
    }
    let column = schema::entry_column(conn, category)?;
    let found = conn
        .query_row(
            &format!(
                "SELECT * FROM {} WHERE {} = ?1",
                quote_ident(category),
                quote_ident(&column)
            ),
            params![entry],
            entry_from_row,
        )
        .optional()?;
    Ok(found)
}

/// Check `key` against the stored verifier, if the vault has one.
fn check_verifier(conn: &Connection, key: &MasterKey) -> Result<bool> {
    if !schema::has_meta(conn)? {
        return Ok(false);
    }
    let Some(stored) = schema::get_meta(conn, schema::META_VERIFIER)? else {
        return Ok(false);
    };

    let plaintext = decrypt(key, &stored)?;
    if bool::from(plaintext.as_slice().ct_eq(VERIFIER_PLAINTEXT)) {
        Ok(true)
    } else {
        Err(SurelockError::WrongPasswordOrCorruptData)
    }
}

/// Check `key` against the verifier, recording one if none exists yet.
fn check_or_set_verifier(conn: &Connection, key: &MasterKey) -> Result<()> {
    if !check_verifier(conn, key)? {
        let verifier = encrypt(key, VERIFIER_PLAINTEXT)?;
        schema::set_meta(conn, schema::META_VERIFIER, &verifier)?;
        debug!("recorded master password verifier");
    }
    Ok(())
}
