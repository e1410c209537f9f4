//! Per-request scratch file for handing uploaded PDF bytes to pdfium.
//!
//! pdfium-render's file-based loader needs a real path on disk rather than
//! an in-memory slice, so every PDF request gets exactly one temporary file
//! holding its bytes. [`RequestPdfFile`] wraps a [`tempfile::NamedTempFile`]
//! purely for the name — the cleanup guarantee (deleted on drop, including
//! when a panic unwinds through it) comes from `tempfile` itself.
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;

pub struct RequestPdfFile {
    file: NamedTempFile,
}

impl RequestPdfFile {
    /// Writes `bytes` to a fresh temporary file and returns a guard that
    /// deletes it once dropped.
    pub fn write(bytes: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new().prefix("tablerag-").suffix(".pdf").tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn path_buf(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_bytes_to_a_file_that_exists_on_disk() {
        let guard = RequestPdfFile::write(b"%PDF-1.4 fake").unwrap();
        assert!(guard.path().is_file());
        assert_eq!(std::fs::read(guard.path()).unwrap(), b"%PDF-1.4 fake");
    }

    #[test]
    fn file_is_removed_once_the_guard_is_dropped() {
        let path = {
            let guard = RequestPdfFile::write(b"temporary").unwrap();
            guard.path_buf()
        };
        assert!(!path.exists());
    }
}
