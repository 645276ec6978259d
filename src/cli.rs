use std::path::{self, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};

use crate::config::{FILE_EXTENSION, PASSPHRASE_MIN_LENGTH};
use crate::error::{Error, Result};
use crate::types::{Operation, ProcessorMode};

#[derive(Parser, Debug)]
#[command(name = "cfbcrypt", version, about = "Encrypt or decrypt files with AES-CFB, or compare SHA-256 digests of files.")]
pub struct Cli {
    /// Input file path.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Output file path (defaults depend on the command).
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Passphrase the AES key is derived from.
    #[arg(short = 'k', long = "key", global = true)]
    pub key: Option<String>,

    /// Log debug detail (IVs, key size, byte counts).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt the input file; output defaults to `<input>.enc`.
    #[command(visible_alias = "e")]
    Encrypt,

    /// Decrypt the input file; output defaults to `<input>` without `.enc`.
    #[command(visible_alias = "d")]
    Decrypt,

    /// Print SHA-256 digests and check that all files match the first.
    #[command(visible_alias = "sha")]
    Digest {
        /// Files to hash.
        paths: Vec<PathBuf>,
    },
}

impl Cli {
    #[inline]
    pub fn init() -> Self {
        Self::parse()
    }

    /// Validates the parsed options and fills in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the input path is missing, the encryption
    /// passphrase is shorter than the minimum (in UTF-8 bytes), input and output
    /// are the same path, or `digest` was given no files.
    pub fn operation(self) -> Result<Operation> {
        match self.command {
            Commands::Encrypt => {
                let input = required_input(self.input)?;
                let passphrase = passphrase_or_empty(self.key);
                if passphrase.expose_secret().len() < PASSPHRASE_MIN_LENGTH {
                    return Err(Error::Config(format!("key is too short: need at least {PASSPHRASE_MIN_LENGTH} bytes")));
                }
                let output = self.output.filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| encrypt_output_path(&input));
                cipher_operation(ProcessorMode::Encrypt, input, output, passphrase)
            }
            Commands::Decrypt => {
                let input = required_input(self.input)?;
                let output = self.output.filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| decrypt_output_path(&input, unix_timestamp));
                cipher_operation(ProcessorMode::Decrypt, input, output, passphrase_or_empty(self.key))
            }
            Commands::Digest { paths } => {
                if paths.is_empty() {
                    return Err(Error::Config("no files to digest".into()));
                }
                Ok(Operation::Digest { paths })
            }
        }
    }
}

fn required_input(input: Option<PathBuf>) -> Result<PathBuf> {
    input.filter(|p| !p.as_os_str().is_empty()).ok_or_else(|| Error::Config("input file is required (-i)".into()))
}

fn passphrase_or_empty(key: Option<String>) -> SecretString {
    SecretString::from(key.unwrap_or_default())
}

fn cipher_operation(mode: ProcessorMode, input: PathBuf, output: PathBuf, passphrase: SecretString) -> Result<Operation> {
    if input == output {
        return Err(Error::Config(format!("output path must differ from input path: {}", input.display())));
    }
    Ok(Operation::Cipher { mode, input, output, passphrase })
}

/// `<input>.enc`
pub fn encrypt_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(FILE_EXTENSION);
    PathBuf::from(name)
}

/// `<input>` with a trailing `.enc` removed, or the timestamp when there is
/// nothing to strip or stripping leaves no file name (`.enc`, `dir/.enc`).
pub fn decrypt_output_path(input: &Path, timestamp: impl FnOnce() -> u64) -> PathBuf {
    input
        .to_str()
        .and_then(|s| s.strip_suffix(FILE_EXTENSION))
        .filter(|s| !matches!(s.rsplit(path::is_separator).next(), None | Some("" | "." | "..")))
        .map_or_else(|| PathBuf::from(timestamp().to_string()), PathBuf::from)
}

fn unix_timestamp() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
}
