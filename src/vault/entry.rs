//! Entry types stored inside a vault.

use std::fmt;

use zeroize::Zeroizing;

/// A single credential entry as stored on disk.
///
/// `encrypted_password` is the base64 `IV || ciphertext` text produced by
/// `crypto::encrypt`; it is only decrypted on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry name, unique within its category (e.g. "gmail").
    pub name: String,

    /// The encrypted password (base64).
    pub encrypted_password: String,

    pub username: String,

    pub description: String,
}

/// An entry whose password has been decrypted.
///
/// The plaintext password is wiped from memory when this is dropped.
pub struct RevealedEntry {
    pub name: String,
    pub username: String,
    pub password: Zeroizing<String>,
    pub description: String,
}

impl fmt::Debug for RevealedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealedEntry")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("description", &self.description)
            .finish()
    }
}

/// A category name with its number of entries.
///
/// Returned by `Vault::list_categories` in storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub entry_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revealed_entry_debug_hides_password() {
        let entry = RevealedEntry {
            name: "gmail".into(),
            username: "me".into(),
            password: Zeroizing::new("s3cr3t".into()),
            description: String::new(),
        };
        let shown = format!("{entry:?}");
        assert!(shown.contains("gmail"));
        assert!(!shown.contains("s3cr3t"));
    }
}
