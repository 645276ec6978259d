//! Stream cipher engine.
//!
//! Encrypted files are laid out as `[16-byte IV][ciphertext]`, with the
//! ciphertext exactly as long as the plaintext. Encryption draws a fresh IV
//! from the operating system for every run; decryption reads it back from
//! the head of the input.

use std::path::Path;

use rand::rand_core::{OsRng, TryRngCore};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::cipher::{Key, Keystream};
use crate::config::{CHUNK_SIZE, IV_SIZE, OUTPUT_FILE_MODE};
use crate::error::{Error, Result};
use crate::types::ProcessorMode;

/// Runs files through AES-CFB under a single derived key.
pub struct Processor {
    key: Key,
}

impl Processor {
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    /// Transforms `input` into `output` and returns the number of bytes written.
    ///
    /// The output is created or truncated. If anything fails after it has been
    /// created, the partial output is removed before the error is returned.
    /// Both file handles are closed on every path.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if either file cannot be opened, or a read or write fails mid-stream
    /// - [`Error::Config`] if `output` already exists and is the same file as `input`
    /// - [`Error::TruncatedInput`] if a decrypt input is shorter than the IV
    /// - [`Error::Random`] if no IV can be drawn
    pub async fn run(&self, input: &Path, output: &Path, mode: ProcessorMode) -> Result<u64> {
        let mut reader = File::open(input).await.map_err(|e| Error::io("open input", input, e))?;
        if is_same_file(input, output).await {
            return Err(Error::Config(format!("output {} is the same file as input {}", output.display(), input.display())));
        }

        self.write_output(&mut reader, input, output, mode).await
    }

    /// Creates `output` and fills it from `reader`, removing it again on failure.
    async fn write_output<R: AsyncRead + Unpin>(&self, reader: &mut R, input: &Path, output: &Path, mode: ProcessorMode) -> Result<u64> {
        let mut writer = create_output(output).await?;

        let result = self.transform(reader, &mut writer, input, output, mode).await;
        drop(writer);

        if result.is_err()
            && let Err(e) = tokio::fs::remove_file(output).await
        {
            tracing::warn!(path = %output.display(), error = %e, "could not remove partial output");
        }

        result
    }

    async fn transform<R, W>(&self, reader: &mut R, writer: &mut W, input: &Path, output: &Path, mode: ProcessorMode) -> Result<u64>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut written = 0;

        let mut keystream = match mode {
            ProcessorMode::Encrypt => {
                let iv = generate_iv()?;
                let keystream = Keystream::new(self.key.as_bytes(), &iv, mode)?;
                writer.write_all(&iv).await.map_err(|e| Error::io("write", output, e))?;
                written += IV_SIZE as u64;
                tracing::debug!(iv = %hex::encode(iv), "generated iv");
                keystream
            }
            ProcessorMode::Decrypt => {
                let iv = read_iv(reader, input).await?;
                tracing::debug!(iv = %hex::encode(iv), "read iv");
                Keystream::new(self.key.as_bytes(), &iv, mode)?
            }
        };

        let streamed = pump(&mut keystream, reader, writer, input, output).await?;
        written += streamed;

        writer.flush().await.map_err(|e| Error::io("write", output, e))?;
        tracing::debug!(bytes = streamed, %mode, "stream complete");

        Ok(written)
    }
}

async fn create_output(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(OUTPUT_FILE_MODE);

    options.open(path).await.map_err(|e| Error::io("create output", path, e))
}

/// Whether `output` already exists and refers to the same file as `input`,
/// however the two paths are spelled.
async fn is_same_file(input: &Path, output: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        match (tokio::fs::metadata(input).await, tokio::fs::metadata(output).await) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        match (tokio::fs::canonicalize(input).await, tokio::fs::canonicalize(output).await) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

fn generate_iv() -> Result<[u8; IV_SIZE]> {
    let mut iv = [0u8; IV_SIZE];
    OsRng.try_fill_bytes(&mut iv).map_err(|e| Error::Random(e.to_string()))?;
    Ok(iv)
}

/// Reads the IV prefix, leaving `reader` positioned at the first ciphertext byte.
async fn read_iv<R: AsyncRead + Unpin>(reader: &mut R, input: &Path) -> Result<[u8; IV_SIZE]> {
    let mut iv = [0u8; IV_SIZE];
    let mut filled = 0;

    while filled < IV_SIZE {
        let n = reader.read(&mut iv[filled..]).await.map_err(|e| Error::io("read", input, e))?;
        if n == 0 {
            return Err(Error::TruncatedInput { path: input.to_path_buf(), len: filled as u64, need: IV_SIZE });
        }
        filled += n;
    }

    Ok(iv)
}

/// Copies `reader` to `writer` through the keystream until EOF.
async fn pump<R, W>(keystream: &mut Keystream, reader: &mut R, writer: &mut W, input: &Path, output: &Path) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buffer).await.map_err(|e| Error::io("read", input, e))?;
        if n == 0 {
            break;
        }

        let chunk = &mut buffer[..n];
        keystream.apply(chunk);
        writer.write_all(chunk).await.map_err(|e| Error::io("write", output, e))?;
        total += n as u64;
    }

    Ok(total)
}
