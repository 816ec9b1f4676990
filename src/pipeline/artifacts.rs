//! Artifacts are staged as `<name>.partial` and only renamed into place once every
//! one of them has been written. Uncommitted partials are removed on drop.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Digest and size of one committed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
    pub bytes: u64,
    pub sha256: String,
}

/// Tees written bytes into a SHA-256 digest.
pub struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
    bytes: u64,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            bytes: 0,
        }
    }

    pub fn finish(self) -> (W, String, u64) {
        (self.inner, format!("{:x}", self.hasher.finalize()), self.bytes)
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

pub struct StagedArtifacts {
    dir: PathBuf,
    staged: Vec<String>,
    records: Vec<ArtifactRecord>,
    committed: bool,
}

impl StagedArtifacts {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            staged: Vec::new(),
            records: Vec::new(),
            committed: false,
        })
    }

    fn partial_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.partial", name))
    }

    /// Stage `name` by streaming it through `write`.
    pub fn write<F>(&mut self, name: &str, rows: Option<u64>, write: F) -> Result<()>
    where
        F: FnOnce(&mut HashingWriter<BufWriter<File>>) -> Result<()>,
    {
        let path = self.partial_path(name);
        self.staged.push(name.to_string());
        let mut out = HashingWriter::new(BufWriter::new(File::create(&path)?));
        write(&mut out)?;
        out.flush()?;
        let (_, sha256, bytes) = out.finish();
        tracing::debug!(artifact = name, bytes, %sha256, "artifact staged");
        self.records.push(ArtifactRecord {
            name: name.to_string(),
            rows,
            bytes,
            sha256,
        });
        Ok(())
    }

    /// Rename every staged file into place.
    pub fn commit(mut self) -> Result<Vec<ArtifactRecord>> {
        for name in &self.staged {
            fs::rename(self.partial_path(name), self.dir.join(name))?;
        }
        self.committed = true;
        Ok(std::mem::take(&mut self.records))
    }
}

impl Drop for StagedArtifacts {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for name in &self.staged {
            let _ = fs::remove_file(self.partial_path(name));
        }
    }
}
