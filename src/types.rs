//! Common type definitions.
//!
//! - [`ProcessorMode`]: direction of a cipher run
//! - [`Operation`]: a fully validated invocation, built once from the command line

use std::path::PathBuf;

use secrecy::SecretString;
use strum::Display;

/// Direction of a cipher operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ProcessorMode {
    Encrypt,
    Decrypt,
}

impl ProcessorMode {
    /// Present participle used in progress log lines.
    #[inline]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypting",
            Self::Decrypt => "decrypting",
        }
    }

    /// Past tense used in the final result line.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypted",
            Self::Decrypt => "Decrypted",
        }
    }
}

/// What a single invocation will do.
///
/// Immutable once built; every path and passphrase it needs has already been
/// defaulted and checked.
#[derive(Debug)]
pub enum Operation {
    /// Run the cipher engine over `input`, writing `output`.
    Cipher { mode: ProcessorMode, input: PathBuf, output: PathBuf, passphrase: SecretString },

    /// Hash `paths` and, when there are several, compare them to the first.
    Digest { paths: Vec<PathBuf> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display() {
        assert_eq!(ProcessorMode::Encrypt.to_string(), "encrypt");
        assert_eq!(ProcessorMode::Decrypt.to_string(), "decrypt");
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(ProcessorMode::Encrypt.verb(), "encrypting");
        assert_eq!(ProcessorMode::Decrypt.label(), "Decrypted");
    }

    #[test]
    fn test_operation_debug_hides_passphrase() {
        let op = Operation::Cipher {
            mode: ProcessorMode::Encrypt,
            input: PathBuf::from("in"),
            output: PathBuf::from("in.enc"),
            passphrase: SecretString::from("correcthorsebatterystaple"),
        };
        let shown = format!("{op:?}");
        assert!(shown.contains("in.enc"));
        assert!(!shown.contains("horse"));
    }
}
