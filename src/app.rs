use std::io::IsTerminal;

use anyhow::{Context, Result};
use tracing::Level;

use crate::cipher::Key;
use crate::cli::Cli;
use crate::digest::{DigestSet, Verdict};
use crate::processor::Processor;
use crate::types::Operation;

/// A validated invocation ready to run.
pub struct App {
    operation: Operation,
}

impl App {
    /// Parses the command line, installs logging and validates the options.
    ///
    /// # Errors
    ///
    /// Fails if the subscriber cannot be installed or a required value is missing.
    pub fn init() -> Result<Self> {
        let cli = Cli::init();
        let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(std::io::stdout().is_terminal())
            .with_file(true)
            .with_line_number(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;

        Ok(Self::new(cli.operation()?))
    }

    pub fn new(operation: Operation) -> Self {
        Self { operation }
    }

    /// Runs the operation to completion.
    ///
    /// # Errors
    ///
    /// Any cipher, I/O or digest failure; all of them end the invocation.
    pub async fn execute(self) -> Result<()> {
        match self.operation {
            Operation::Cipher { mode, input, output, passphrase } => {
                tracing::info!("{} {} -> {}", mode.verb(), input.display(), output.display());

                let processor = Processor::new(Key::derive(&passphrase));
                let written = processor.run(&input, &output, mode).await.with_context(|| format!("{mode} failed: {}", input.display()))?;

                crate::ui::show_success(mode, &input, &output, written);
            }
            Operation::Digest { paths } => {
                let set = DigestSet::compute(&paths).await.context("digest failed")?;

                if paths.len() == 1 {
                    for (_, digest) in set.iter() {
                        tracing::info!("file sha: {digest}");
                    }
                } else {
                    for (path, digest) in set.iter() {
                        tracing::info!("file sha: {digest} [{}]", path.display());
                    }
                }

                let verdict = set.verify()?;
                if verdict == Verdict::Equal {
                    tracing::info!("equals");
                }

                crate::ui::show_verdict(verdict, paths.len());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::error::Error;
    use secrecy::SecretString;
    use crate::types::ProcessorMode;

    #[tokio::test]
    async fn test_execute_cipher_roundtrip() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("notes.txt");
        let enc = dir.path().join("notes.txt.enc");
        let dec = dir.path().join("notes.copy");
        fs::write(&src, b"hello from the app layer").unwrap();

        let encrypt = Operation::Cipher { mode: ProcessorMode::Encrypt, input: src.clone(), output: enc.clone(), passphrase: SecretString::from("correcthorsebatterystaple") };
        App::new(encrypt).execute().await.unwrap();

        let decrypt = Operation::Cipher { mode: ProcessorMode::Decrypt, input: enc, output: dec.clone(), passphrase: SecretString::from("correcthorsebatterystaple") };
        App::new(decrypt).execute().await.unwrap();

        assert_eq!(fs::read(&dec).unwrap(), fs::read(&src).unwrap());
    }

    #[tokio::test]
    async fn test_execute_digest_mismatch() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"one").unwrap();
        fs::write(&b, b"two").unwrap();

        let err = App::new(Operation::Digest { paths: vec![a, b] }).execute().await.unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::DigestMismatch { .. })));
    }
}
