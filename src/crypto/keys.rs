//! The in-memory master key.

use std::fmt;

use zeroize::Zeroize;

/// Length of the derived master key (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A wrapper around a 32-byte master key that automatically zeroes
/// its memory when dropped.
///
/// A `MasterKey` is derived once per vault operation and dropped when
/// the operation returns. It is never written to disk.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey([redacted])")
    }
}

impl PartialEq for MasterKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.bytes[..].ct_eq(&other.bytes[..]).into()
    }
}

impl Eq for MasterKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let key = MasterKey::new([0x42u8; KEY_LEN]);
        let shown = format!("{key:?}");
        assert!(!shown.contains("42"));
        assert!(shown.contains("redacted"));
    }

    #[test]
    fn equality_compares_bytes() {
        assert_eq!(MasterKey::new([1u8; KEY_LEN]), MasterKey::new([1u8; KEY_LEN]));
        assert_ne!(MasterKey::new([1u8; KEY_LEN]), MasterKey::new([2u8; KEY_LEN]));
    }
}
