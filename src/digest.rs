//! SHA-256 digests of one or more files.
//!
//! Each file gets its own task. Results are merged into a shared map under a
//! single lock, and the caller only looks at the map after every task has been
//! joined.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap;
use tokio::fs::File;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::cipher::Digest;
use crate::error::{Error, Result};

/// Outcome of comparing a [`DigestSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Only one file was hashed; nothing to compare.
    Single,
    /// Every file matches the first one.
    Equal,
}

/// Digests keyed by path, remembering the order paths were given in.
#[derive(Debug)]
pub struct DigestSet {
    order: Vec<PathBuf>,
    digests: HashMap<PathBuf, Digest>,
}

impl DigestSet {
    /// Hashes every path concurrently and waits for all of them.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `paths` is empty
    /// - [`Error::Io`] for the first file that cannot be opened or read; the
    ///   remaining tasks are cancelled
    pub async fn compute(paths: &[PathBuf]) -> Result<Self> {
        if paths.is_empty() {
            return Err(Error::Config("no files to digest".into()));
        }

        let merged = Arc::new(Mutex::new(HashMap::with_capacity(paths.len())));
        let mut tasks = JoinSet::new();

        for path in paths {
            let path = path.clone();
            let merged = Arc::clone(&merged);
            tasks.spawn(async move {
                let digest = digest_file(&path).await?;
                tracing::debug!(path = %path.display(), %digest, "digest computed");
                merged.lock().await.insert(path, digest);
                Ok::<_, Error>(())
            });
        }

        while let Some(joined) = tasks.join_next().await {
            joined.unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic()))?;
        }

        let digests = std::mem::take(&mut *merged.lock().await);
        Ok(Self { order: paths.to_vec(), digests })
    }

    pub fn get(&self, path: &Path) -> Option<&Digest> {
        self.digests.get(path)
    }

    /// Paths and digests in the order the paths were given.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Digest)> {
        self.order.iter().filter_map(|path| self.digests.get(path).map(|digest| (path.as_path(), digest)))
    }

    /// Compares every digest against the first path's digest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DigestMismatch`] naming the first file that differs.
    pub fn verify(&self) -> Result<Verdict> {
        let mut entries = self.iter();
        let Some((_, first)) = entries.next() else {
            return Err(Error::Config("no files to digest".into()));
        };

        if self.order.len() == 1 {
            return Ok(Verdict::Single);
        }

        match entries.find(|(_, digest)| *digest != first) {
            Some((path, digest)) => Err(Error::DigestMismatch { path: path.to_path_buf(), expected: first.to_hex(), actual: digest.to_hex() }),
            None => Ok(Verdict::Equal),
        }
    }
}

/// Hashes a single file's full contents.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
pub async fn digest_file(path: &Path) -> Result<Digest> {
    let file = File::open(path).await.map_err(|e| Error::io("open input", path, e))?;
    Digest::new(file).await.map_err(|e| Error::io("read", path, e))
}
