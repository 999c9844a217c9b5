//! Read-only file source with positioned access.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::SegmentError;

/// Opens `path` for reading, mapping a missing file to [`SegmentError::NotFound`].
pub(crate) fn open_read(path: &Path) -> Result<File, SegmentError> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SegmentError::NotFound(path.to_path_buf()),
        _ => SegmentError::Io(e),
    })
}

/// An owning read-only handle over a local file.
///
/// The file length is captured once at open time and stays fixed for the
/// source's lifetime, even if the file changes on disk afterwards. All reads
/// are positioned: each call seeks to an explicit offset first and never
/// depends on where a previous read left the cursor.
#[derive(Debug)]
pub struct FileSource {
    file: Option<File>,
    path: PathBuf,
    len: u64,
}

impl FileSource {
    /// Opens `path` and records its current length.
    pub fn open(path: &Path) -> Result<Self, SegmentError> {
        let file = open_read(path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
            len,
        })
    }

    /// Length recorded at open time, in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the recorded length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` once [`close`](Self::close) has released the handle.
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Reads exactly `buf.len()` bytes starting at byte `offset`.
    ///
    /// Fails with [`SegmentError::Closed`] after `close`, and with
    /// [`SegmentError::Io`] if the file ends before the buffer is full.
    /// The recorded length is authoritative; a shrunken file is an error.
    pub fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), SegmentError> {
        let Some(file) = self.file.as_ref() else {
            return Err(SegmentError::Closed);
        };
        let mut file = file;
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf)?;
        Ok(())
    }

    /// Releases the underlying handle. Safe to call more than once; the
    /// handle is dropped exactly once.
    pub fn close(&mut self) {
        self.file.take();
    }
}
