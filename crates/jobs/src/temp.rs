//! Scoped temporary input files.
//!
//! Each job owns exactly one temporary input file for its lifetime. The
//! guard deletes it on drop, so cleanup happens on success, on handled
//! failure, and when a render worker panics.

use std::path::Path;

use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use caplit_common::error::{CaplitError, CaplitResult};

/// RAII guard around a job's temporary input file.
#[derive(Debug)]
pub struct TempInput {
    file: NamedTempFile,
}

impl TempInput {
    /// Create an empty temporary input file.
    pub fn create() -> CaplitResult<Self> {
        let file = tempfile::Builder::new()
            .prefix("caplit_in_")
            .suffix(".mp4")
            .tempfile()
            .map_err(|e| CaplitError::job(format!("Failed to create temp input: {e}")))?;
        Ok(Self { file })
    }

    /// Stream the payload into the file and flush it to disk. Returns the
    /// number of bytes written. The job only advances past `Downloaded`
    /// once this has completed.
    pub async fn fill<R>(&self, mut payload: R) -> CaplitResult<u64>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut file = tokio::fs::File::create(self.path()).await?;
        let mut buf = [0u8; 64 * 1024];
        let mut written = 0u64;

        loop {
            let n = payload.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n]).await?;
            written += n as u64;
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }

    /// Path of the temporary file; valid until the guard drops.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
