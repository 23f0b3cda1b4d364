//! SQLite layout of a vault file.
//!
//! A vault file holds one table per category plus a small metadata table:
//!
//! ```text
//! "<category>"  (entry TEXT NOT NULL UNIQUE, password TEXT NOT NULL,
//!                username TEXT NOT NULL, description TEXT NOT NULL)
//! surelock_meta (key TEXT PRIMARY KEY, value TEXT NOT NULL)
//! ```
//!
//! Entry rows are read by column position, not by name, so tables in
//! legacy vault files (which predate the metadata table) read the same
//! way as new ones.  A file without `surelock_meta` is a legacy vault.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::crypto::kdf::{KdfParams, Prf};
use crate::errors::{Result, SurelockError};

/// Name of the metadata table.
pub const META_TABLE: &str = "surelock_meta";

/// Metadata keys.
pub const META_KDF_PRF: &str = "kdf_prf";
pub const META_KDF_ITERATIONS: &str = "kdf_iterations";
pub const META_KDF_SALT: &str = "kdf_salt";
pub const META_VERIFIER: &str = "verifier";

/// Longest accepted category name.
const MAX_CATEGORY_LEN: usize = 64;

/// Longest accepted entry name.
const MAX_ENTRY_LEN: usize = 256;

/// Quote a category name for use as an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Validate a category name before a table is created for it.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Names starting with `sqlite_` or `surelock_` are reserved.
pub fn validate_category_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SurelockError::InvalidName(
            "category name cannot be empty".into(),
        ));
    }
    if name.len() > MAX_CATEGORY_LEN {
        return Err(SurelockError::InvalidName(format!(
            "category name cannot exceed {MAX_CATEGORY_LEN} characters"
        )));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(SurelockError::InvalidName(format!(
            "category name '{name}' contains invalid characters; only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    if is_reserved(name) {
        return Err(SurelockError::InvalidName(format!(
            "category name '{name}' is reserved"
        )));
    }
    Ok(())
}

/// Validate an entry name: non-empty, bounded, no control characters.
pub fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SurelockError::InvalidName("entry name cannot be empty".into()));
    }
    if name.len() > MAX_ENTRY_LEN {
        return Err(SurelockError::InvalidName(format!(
            "entry name cannot exceed {MAX_ENTRY_LEN} characters"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(SurelockError::InvalidName(format!(
            "entry name '{}' contains control characters",
            name.escape_debug()
        )));
    }
    Ok(())
}

fn is_reserved(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.starts_with("sqlite_") || lower.starts_with("surelock_")
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Returns `true` if `name` is an existing category table.
pub fn has_category(conn: &Connection, name: &str) -> Result<bool> {
    if is_reserved(name) {
        return Ok(false);
    }
    has_table(conn, name)
}

fn has_table(conn: &Connection, name: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Category table names in creation order.
pub fn list_category_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' AND name != ?1
         ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![META_TABLE], |row| row.get::<_, String>(0))?;

    let mut names = Vec::new();
    for row in rows {
        names.push(row?);
    }
    Ok(names)
}

/// Create a category table if it does not exist yet.
pub fn create_category_table(conn: &Connection, name: &str) -> Result<()> {
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (
            entry       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            username    TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT ''
        )",
        quote_ident(name)
    );
    conn.execute_batch(&sql)?;
    Ok(())
}

/// Name of the first column of a category table (the entry name).
pub fn entry_column(conn: &Connection, table: &str) -> Result<String> {
    let column = conn
        .query_row(
            "SELECT name FROM pragma_table_info(?1) ORDER BY cid LIMIT 1",
            params![table],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    column.ok_or_else(|| {
        SurelockError::InvalidVaultFormat(format!("category '{table}' has no columns"))
    })
}

/// Read a text column, accepting BLOB (as UTF-8) and NULL (as empty).
pub fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Returns `true` if the file carries the metadata table.
pub fn has_meta(conn: &Connection) -> Result<bool> {
    has_table(conn, META_TABLE)
}

/// Create the metadata table and record the key derivation parameters.
pub fn write_meta(conn: &Connection, kdf: &KdfParams) -> Result<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {META_TABLE} (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )"
    ))?;
    set_meta(conn, META_KDF_PRF, kdf.prf.as_str())?;
    set_meta(conn, META_KDF_ITERATIONS, &kdf.iterations.to_string())?;
    set_meta(conn, META_KDF_SALT, &BASE64.encode(&kdf.salt))?;
    Ok(())
}

/// Load the key derivation parameters from the metadata table.
pub fn read_kdf(conn: &Connection) -> Result<KdfParams> {
    let prf: Prf = require_meta(conn, META_KDF_PRF)?.parse()?;
    let iterations = require_meta(conn, META_KDF_ITERATIONS)?
        .parse::<u32>()
        .map_err(|e| SurelockError::InvalidVaultFormat(format!("bad iteration count: {e}")))?;
    let salt = BASE64
        .decode(require_meta(conn, META_KDF_SALT)?)
        .map_err(|e| SurelockError::InvalidVaultFormat(format!("bad salt encoding: {e}")))?;

    Ok(KdfParams {
        prf,
        iterations,
        salt,
    })
}

pub fn get_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            &format!("SELECT value FROM {META_TABLE} WHERE key = ?1"),
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set_meta(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        &format!("INSERT OR REPLACE INTO {META_TABLE} (key, value) VALUES (?1, ?2)"),
        params![key, value],
    )?;
    Ok(())
}

fn require_meta(conn: &Connection, key: &str) -> Result<String> {
    get_meta(conn, key)?
        .ok_or_else(|| SurelockError::InvalidVaultFormat(format!("missing '{key}' metadata")))
}
