//! Global Configuration Constants
//!
//! Sizes, file naming rules and policy limits shared by the cipher engine,
//! the digest utility and the command layer. Nothing here is read from the
//! environment or from disk; every value is fixed at compile time.

/// Suffix appended to encrypted files when no output path is given.
///
/// Decryption strips this suffix again to pick its default destination.
pub const FILE_EXTENSION: &str = ".enc";

// === Cipher Parameters ===

/// Size of the initialization vector in bytes.
///
/// Equal to the AES block size. Encrypted files start with exactly this many
/// IV bytes, and decryption consumes them before producing plaintext.
pub const IV_SIZE: usize = 16;

/// Size of the derived key in bytes.
///
/// The key deriver always emits a SHA-256 digest, so this selects AES-256.
pub const KEY_SIZE: usize = 32;

/// Minimum passphrase length, in UTF-8 bytes, accepted for encryption.
///
/// This is a usability guard only. The passphrase is always hashed to a
/// 32-byte key, so the minimum does not bound the key's strength.
pub const PASSPHRASE_MIN_LENGTH: usize = 16;

// === I/O Parameters ===

/// Buffer size for streaming file contents through the cipher and hasher.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Permission bits for newly created output files (before umask, unix only).
pub const OUTPUT_FILE_MODE: u32 = 0o666;

// === Digest Parameters ===

/// Size of a SHA-256 digest in bytes.
pub const HASH_SIZE: usize = 32;
