//! AES-256-CBC encryption of individual secrets.
//!
//! Each call to `encrypt` generates a fresh random 16-byte IV, pads the
//! plaintext PKCS#7-style and prepends the IV to the ciphertext.  The
//! result is base64 encoded so it can be stored as a text column.
//!
//! Layout before base64:
//!   [ 16-byte IV | ciphertext (N * 16 bytes) ]
//!
//! There is no authentication tag.  A wrong key is detected only because
//! the decrypted padding or text is usually invalid, so a small fraction
//! of wrong keys decrypt to garbage that passes both checks.

use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::Zeroizing;

use super::keys::MasterKey;
use crate::errors::{Result, SurelockError};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Size of the CBC initialization vector (one block).
pub const IV_LEN: usize = BLOCK_LEN;

/// Encrypt `plaintext` under `key`.
///
/// Returns `base64(IV || ciphertext)`.
pub fn encrypt(key: &MasterKey, plaintext: &[u8]) -> Result<String> {
    let mut iv = [0u8; IV_LEN];
    rand::rng().fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
        .map_err(|e| SurelockError::EncryptionFailed(format!("invalid key or IV length: {e}")))?;

    // Pkcs7 appends a full block when the plaintext is already aligned.
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(blob))
}

/// Decrypt a value produced by `encrypt`.
///
/// Every failure (bad base64, bad length, bad padding) is reported as
/// `WrongPasswordOrCorruptData`.
pub fn decrypt(key: &MasterKey, encoded: &str) -> Result<Zeroizing<Vec<u8>>> {
    let blob = BASE64
        .decode(encoded)
        .map_err(|_| SurelockError::WrongPasswordOrCorruptData)?;

    // At least one IV and one block, and a whole number of blocks.
    if blob.len() < IV_LEN + BLOCK_LEN || (blob.len() - IV_LEN) % BLOCK_LEN != 0 {
        return Err(SurelockError::WrongPasswordOrCorruptData);
    }

    let (iv, ciphertext) = blob.split_at(IV_LEN);
    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| SurelockError::WrongPasswordOrCorruptData)?;

    let padded = Zeroizing::new(
        cipher
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
            .map_err(|_| SurelockError::WrongPasswordOrCorruptData)?,
    );

    let len = unpadded_len(&padded)?;
    Ok(Zeroizing::new(padded[..len].to_vec()))
}

/// Decrypt a value produced by `encrypt` and require it to be UTF-8 text.
pub fn decrypt_to_string(key: &MasterKey, encoded: &str) -> Result<Zeroizing<String>> {
    let bytes = decrypt(key, encoded)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| SurelockError::WrongPasswordOrCorruptData)?;
    Ok(Zeroizing::new(text.to_owned()))
}

/// Length of `padded` once the trailing padding is removed.
///
/// The last byte is taken at face value as the padding length; the
/// padding bytes themselves are not inspected.
fn unpadded_len(padded: &[u8]) -> Result<usize> {
    let n = match padded.last() {
        Some(&n) => usize::from(n),
        None => return Err(SurelockError::WrongPasswordOrCorruptData),
    };
    if n == 0 || n > padded.len() {
        return Err(SurelockError::WrongPasswordOrCorruptData);
    }
    Ok(padded.len() - n)
}
