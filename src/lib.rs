//! cfbcrypt - streaming AES-CFB file encryption and SHA-256 file comparison.
//!
//! - Key derivation: one SHA-256 pass over the passphrase, giving a 32-byte key
//! - Encryption: a fresh random 16-byte IV is written first, followed by the
//!   AES-CFB ciphertext, which has the same length as the plaintext
//! - Digests: one task per file, merged under a single lock, then compared
//!   against the first file

pub mod app;
pub mod cipher;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod processor;
pub mod types;
pub mod ui;

pub use error::{Error, Result};
