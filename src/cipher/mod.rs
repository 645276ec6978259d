//! # Cryptographic Primitives
//!
//! - [`Key`]: passphrase to 32-byte AES key via one SHA-256 pass
//! - [`Keystream`]: AES-CFB keystream, variant chosen by key length
//! - [`struct@Digest`]: streaming SHA-256 fingerprint of a reader
//!
//! None of these touch the filesystem; the processor and digest modules
//! own all file handles.

mod derive;
mod hash;
mod stream;

pub use derive::Key;
pub use hash::Digest;
pub use stream::Keystream;
