//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - `Entry`, `RevealedEntry` and `CategorySummary` types (`entry`)
//! - The SQLite layout of a vault file (`schema`)
//! - The high-level `Vault` handle for creating, opening, and managing vaults (`store`)

pub mod entry;
pub mod schema;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{CategorySummary, Entry, RevealedEntry};
pub use store::Vault;
