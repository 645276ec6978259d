//! # Key Derivation
//!
//! Turns a passphrase into a fixed-size AES key by taking a single SHA-256
//! pass over its UTF-8 bytes. There is no salt and no work factor: the same
//! passphrase always yields the same 32-byte key, and any input (including
//! the empty string) is accepted.

use secrecy::{ExposeSecret, SecretBox, SecretString};
use sha2::{Digest as _, Sha256};

use crate::config::KEY_SIZE;

/// A derived 256-bit AES key.
///
/// Lives for a single invocation and is zeroized on drop.
pub struct Key {
    inner: SecretBox<[u8; KEY_SIZE]>,
}

impl Key {
    /// Derives the key as `SHA-256(passphrase)`.
    #[must_use]
    pub fn derive(passphrase: &SecretString) -> Self {
        let hash: [u8; KEY_SIZE] = Sha256::digest(passphrase.expose_secret().as_bytes()).into();
        Self { inner: SecretBox::new(Box::new(hash)) }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        self.inner.expose_secret()
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_empty_passphrase() {
        let key = Key::derive(&SecretString::from(""));
        assert_eq!(key.as_bytes().len(), KEY_SIZE);
        assert_eq!(hex::encode(key.as_bytes()), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
    }

    #[test]
    fn test_derive_known_answer() {
        let key = Key::derive(&SecretString::from("abc"));
        assert_eq!(hex::encode(key.as_bytes()), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn test_derive_deterministic() {
        let key1 = Key::derive(&SecretString::from("any string"));
        let key2 = Key::derive(&SecretString::from("any string"));
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_distinct_passphrases() {
        let key1 = Key::derive(&SecretString::from("correcthorsebatterystaple"));
        let key2 = Key::derive(&SecretString::from("correcthorsebatterystaplf"));
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = Key::derive(&SecretString::from("abc"));
        assert_eq!(format!("{key:?}"), "Key([REDACTED])");
    }
}
