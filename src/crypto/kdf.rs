//! Password-based key derivation using PBKDF2-HMAC.
//!
//! Each vault stores its own `KdfParams` (PRF, iteration count and a
//! random salt), so the same master password produces unrelated keys in
//! different vault files.  `KdfParams::legacy` reproduces the fixed
//! parameters of vault files written before salts were stored per vault;
//! it is only ever used to open such files.

use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha1::Sha1;
use sha2::Sha256;
use zeroize::Zeroize;

use super::keys::{MasterKey, KEY_LEN};
use crate::errors::{Result, SurelockError};

/// Length of a freshly generated salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Iteration count used for new vaults when nothing is configured.
pub const DEFAULT_ITERATIONS: u32 = 210_000;

/// Lowest iteration count accepted for any vault.
pub const MIN_ITERATIONS: u32 = 1_000;

/// Salt shared by every vault written before per-vault salts existed.
const LEGACY_SALT: &[u8] = b"we are salty";

/// Iteration count shared by every legacy vault.
const LEGACY_ITERATIONS: u32 = 1_000;

/// The HMAC hash function PBKDF2 runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prf {
    Sha256,
    /// Only used by legacy vaults.
    Sha1,
}

impl Prf {
    pub fn as_str(self) -> &'static str {
        match self {
            Prf::Sha256 => "sha256",
            Prf::Sha1 => "sha1",
        }
    }
}

impl fmt::Display for Prf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prf {
    type Err = SurelockError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha256" => Ok(Prf::Sha256),
            "sha1" => Ok(Prf::Sha1),
            other => Err(SurelockError::InvalidVaultFormat(format!(
                "unknown key derivation function '{other}'"
            ))),
        }
    }
}

/// Everything needed to turn a master password into a `MasterKey`.
///
/// None of these values are secret; they are stored in the vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KdfParams {
    pub prf: Prf,
    pub iterations: u32,
    pub salt: Vec<u8>,
}

impl KdfParams {
    /// Fresh parameters for a new vault: PBKDF2-HMAC-SHA256 with a
    /// random 32-byte salt.
    pub fn generate(iterations: u32) -> Self {
        Self {
            prf: Prf::Sha256,
            iterations,
            salt: generate_salt().to_vec(),
        }
    }

    /// The fixed parameters of legacy vault files
    /// (PBKDF2-HMAC-SHA1, 1000 iterations, shared salt).
    pub fn legacy() -> Self {
        Self {
            prf: Prf::Sha1,
            iterations: LEGACY_ITERATIONS,
            salt: LEGACY_SALT.to_vec(),
        }
    }

    /// Reject parameters too weak to be used.
    pub fn validate(&self) -> Result<()> {
        if self.iterations < MIN_ITERATIONS {
            return Err(SurelockError::KeyDerivationFailed(format!(
                "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
                self.iterations
            )));
        }
        if self.salt.is_empty() {
            return Err(SurelockError::KeyDerivationFailed(
                "salt cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Derive a 32-byte master key from a password.
///
/// The same password + params always produce the same key.
pub fn derive_key(password: &[u8], params: &KdfParams) -> Result<MasterKey> {
    params.validate()?;

    let mut key = [0u8; KEY_LEN];
    match params.prf {
        Prf::Sha256 => pbkdf2_hmac::<Sha256>(password, &params.salt, params.iterations, &mut key),
        Prf::Sha1 => pbkdf2_hmac::<Sha1>(password, &params.salt, params.iterations, &mut key),
    }

    let master_key = MasterKey::new(key);
    key.zeroize();
    Ok(master_key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> KdfParams {
        KdfParams::generate(MIN_ITERATIONS)
    }

    #[test]
    fn generate_uses_sha256_and_random_salt() {
        let a = fast_params();
        let b = fast_params();
        assert_eq!(a.prf, Prf::Sha256);
        assert_eq!(a.salt.len(), SALT_LEN);
        assert_ne!(a.salt, b.salt);
    }

    #[test]
    fn legacy_params_are_fixed() {
        let params = KdfParams::legacy();
        assert_eq!(params.prf, Prf::Sha1);
        assert_eq!(params.iterations, 1_000);
        assert_eq!(params.salt, b"we are salty".to_vec());
    }

    #[test]
    fn rejects_too_few_iterations() {
        let params = KdfParams::generate(10);
        assert!(matches!(
            derive_key(b"pw", &params),
            Err(SurelockError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn rejects_empty_salt() {
        let params = KdfParams {
            salt: Vec::new(),
            ..fast_params()
        };
        assert!(derive_key(b"pw", &params).is_err());
    }

    #[test]
    fn different_prf_changes_key() {
        let sha256 = fast_params();
        let sha1 = KdfParams {
            prf: Prf::Sha1,
            ..sha256.clone()
        };
        let k1 = derive_key(b"pw", &sha256).unwrap();
        let k2 = derive_key(b"pw", &sha1).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn pbkdf2_sha1_matches_rfc6070_vector() {
        // RFC 6070: P = "password", S = "salt", c = 1.
        let mut out = [0u8; 20];
        pbkdf2_hmac::<Sha1>(b"password", b"salt", 1, &mut out);
        assert_eq!(
            out,
            [
                0x0c, 0x60, 0xc8, 0x0f, 0x96, 0x1f, 0x0e, 0x71, 0xf3, 0xa9, 0xb5, 0x24, 0xaf,
                0x60, 0x12, 0x06, 0x2f, 0xe0, 0x37, 0xa6
            ]
        );
    }

    #[test]
    fn prf_parses_and_displays() {
        assert_eq!("sha256".parse::<Prf>().unwrap(), Prf::Sha256);
        assert_eq!("sha1".parse::<Prf>().unwrap(), Prf::Sha1);
        assert!("md5".parse::<Prf>().is_err());
        assert_eq!(Prf::Sha256.to_string(), "sha256");
    }
}
