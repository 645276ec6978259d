//! Content fingerprints using SHA-256.
//!
//! [`struct@Digest`] consumes an async reader until EOF and keeps the 32-byte
//! result. Digests are only used to tell whether files hold the same bytes;
//! they carry no integrity guarantee against deliberate tampering.

use std::fmt::{Display, Formatter};

use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::{CHUNK_SIZE, HASH_SIZE};

/// A computed SHA-256 digest.
#[derive(Clone, Copy, Debug)]
pub struct Digest {
    hash: [u8; HASH_SIZE],
}

impl Digest {
    /// Hashes everything `reader` yields until EOF.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if any read fails.
    pub async fn new<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(Self { hash: hasher.finalize().into() })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.hash
    }

    /// Lowercase hex encoding, as reported to the user.
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.hash.ct_eq(&other.hash))
    }
}

impl Eq for Digest {}

impl Display for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
