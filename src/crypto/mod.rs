//! Cryptographic primitives for SureLock.
//!
//! This module provides:
//! - AES-256-CBC encryption and decryption of single secrets (`cipher`)
//! - PBKDF2 password-based key derivation (`kdf`)
//! - The zeroizing `MasterKey` wrapper (`keys`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use cipher::{decrypt, decrypt_to_string, encrypt};
pub use kdf::{derive_key, generate_salt, KdfParams, Prf};
pub use keys::MasterKey;
