use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the cipher engine, the digest utility and option validation.
///
/// Every variant is terminal for the invocation; nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// A required command-line value is missing or violates policy.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file could not be opened, created, read or written.
    #[error("{action} failed: {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The ciphertext is shorter than the IV prefix.
    #[error("truncated input: {} holds {len} bytes, need at least {need} for the IV", .path.display())]
    TruncatedInput { path: PathBuf, len: u64, need: usize },

    /// The key length is not a valid AES key size.
    #[error("invalid key length: {0} bytes (expected 16, 24 or 32)")]
    InvalidKey(usize),

    /// The operating system random source failed.
    #[error("random source failed: {0}")]
    Random(String),

    /// A file's digest differs from the first file's digest.
    #[error("digest mismatch: {} is {actual}, expected {expected}", .path.display())]
    DigestMismatch { path: PathBuf, expected: String, actual: String },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { action, path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
