use aes::{Aes128, Aes192, Aes256};
use cfb_mode::cipher::{BlockCipher, BlockEncryptMut, KeyInit, KeyIvInit};
use cfb_mode::{BufDecryptor, BufEncryptor};

use crate::config::IV_SIZE;
use crate::error::{Error, Result};
use crate::types::ProcessorMode;

/// One direction of a CFB keystream over block cipher `C`.
///
/// The buffered variants keep their position between calls, so data can be
/// fed in chunks of any length.
enum Direction<C: BlockEncryptMut + BlockCipher> {
    Encrypt(BufEncryptor<C>),
    Decrypt(BufDecryptor<C>),
}

impl<C> Direction<C>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    fn new(key: &[u8], iv: &[u8; IV_SIZE], mode: ProcessorMode) -> Result<Self> {
        let invalid = |_| Error::InvalidKey(key.len());
        Ok(match mode {
            ProcessorMode::Encrypt => Self::Encrypt(BufEncryptor::<C>::new_from_slices(key, iv).map_err(invalid)?),
            ProcessorMode::Decrypt => Self::Decrypt(BufDecryptor::<C>::new_from_slices(key, iv).map_err(invalid)?),
        })
    }

    #[inline]
    fn apply(&mut self, data: &mut [u8]) {
        match self {
            Self::Encrypt(cfb) => cfb.encrypt(data),
            Self::Decrypt(cfb) => cfb.decrypt(data),
        }
    }
}

/// An AES-CFB keystream seeded by a key and an IV.
///
/// The AES variant is picked from the key length. The transform is length
/// preserving: every input byte produces exactly one output byte.
pub struct Keystream {
    inner: Variant,
}

enum Variant {
    Aes128(Direction<Aes128>),
    Aes192(Direction<Aes192>),
    Aes256(Direction<Aes256>),
}

impl Keystream {
    /// Builds a keystream for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] unless `key` is 16, 24 or 32 bytes long.
    pub fn new(key: &[u8], iv: &[u8; IV_SIZE], mode: ProcessorMode) -> Result<Self> {
        let inner = match key.len() {
            16 => Variant::Aes128(Direction::new(key, iv, mode)?),
            24 => Variant::Aes192(Direction::new(key, iv, mode)?),
            32 => Variant::Aes256(Direction::new(key, iv, mode)?),
            len => return Err(Error::InvalidKey(len)),
        };
        tracing::debug!(key_bits = key.len() * 8, %mode, "keystream ready");
        Ok(Self { inner })
    }

    /// Transforms `data` in place, continuing from wherever the last call stopped.
    #[inline]
    pub fn apply(&mut self, data: &mut [u8]) {
        match &mut self.inner {
            Variant::Aes128(cfb) => cfb.apply(data),
            Variant::Aes192(cfb) => cfb.apply(data),
            Variant::Aes256(cfb) => cfb.apply(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IV: [u8; IV_SIZE] = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f];

    fn roundtrip(key: &[u8], data: &[u8]) -> Vec<u8> {
        let mut buf = data.to_vec();
        Keystream::new(key, &IV, ProcessorMode::Encrypt).unwrap().apply(&mut buf);
        assert_ne!(buf, data);
        Keystream::new(key, &IV, ProcessorMode::Decrypt).unwrap().apply(&mut buf);
        buf
    }

    #[test]
    fn test_cfb128_aes128_known_answer() {
        // NIST SP 800-38A F.3.13, first block.
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let mut block = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        Keystream::new(&key, &IV, ProcessorMode::Encrypt).unwrap().apply(&mut block);
        assert_eq!(hex::encode(&block), "3b3fd92eb72dad20333449f8e83cfb4a");
    }

    #[test]
    fn test_roundtrip_all_key_sizes() {
        let data = b"The quick brown fox jumps over the lazy dog";
        for len in [16, 24, 32] {
            let key = vec![0x42u8; len];
            assert_eq!(roundtrip(&key, data), data);
        }
    }

    #[test]
    fn test_chunked_matches_whole() {
        let key = [7u8; 32];
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();

        let mut whole = data.clone();
        Keystream::new(&key, &IV, ProcessorMode::Encrypt).unwrap().apply(&mut whole);

        let mut chunked = data.clone();
        let mut stream = Keystream::new(&key, &IV, ProcessorMode::Encrypt).unwrap();
        for chunk in chunked.chunks_mut(7) {
            stream.apply(chunk);
        }

        assert_eq!(whole, chunked);
    }

    #[test]
    fn test_length_preserving() {
        let key = [1u8; 32];
        let mut buf = vec![0u8; 33];
        Keystream::new(&key, &IV, ProcessorMode::Encrypt).unwrap().apply(&mut buf);
        assert_eq!(buf.len(), 33);
    }

    #[test]
    fn test_invalid_key_length() {
        for len in [0, 15, 20, 33] {
            let key = vec![0u8; len];
            let err = Keystream::new(&key, &IV, ProcessorMode::Encrypt).err().unwrap();
            assert!(matches!(err, Error::InvalidKey(n) if n == len));
        }
    }
}
