//! Segmentation planning: deterministic partition of a file into bounded
//! byte-range segments, yielded one at a time as bounded readers.

use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use crate::SegmentError;
use crate::source::FileSource;

/// Plans a file as `ceil(len / segment_size)` contiguous, non-overlapping
/// segments and hands them out in offset order.
///
/// Producing segment `k` positions the read at `k * segment_size` directly
/// instead of consuming segments `0..k` first, so pulling a late segment
/// costs the same as pulling an early one.
#[derive(Debug)]
pub struct SegmentPlan {
    source: FileSource,
    len: u64,
    segment_size: u64,
    index: u64,
}

impl SegmentPlan {
    /// Opens `path` and fixes the segmentation: the file length is captured
    /// here and does not track later changes on disk.
    ///
    /// Fails with [`SegmentError::InvalidArgument`] if `segment_size` is 0,
    /// [`SegmentError::NotFound`] if `path` does not exist.
    pub fn open(path: &Path, segment_size: u64) -> Result<Self, SegmentError> {
        if segment_size == 0 {
            return Err(SegmentError::InvalidArgument(
                "segment size must be positive".into(),
            ));
        }
        let source = FileSource::open(path)?;
        let len = source.len();
        debug!(
            path = %path.display(),
            len,
            segment_size,
            "segment plan opened"
        );
        Ok(Self {
            source,
            len,
            segment_size,
            index: 0,
        })
    }

    /// Total file length in bytes, as recorded at open time.
    pub fn file_len(&self) -> u64 {
        self.len
    }

    /// Configured segment size in bytes.
    pub fn segment_size(&self) -> u64 {
        self.segment_size
    }

    /// Number of segments this plan yields in total. Zero for an empty file.
    pub fn segment_count(&self) -> u64 {
        self.len.div_ceil(self.segment_size)
    }

    /// Number of segments not yet yielded.
    pub fn remaining_segments(&self) -> u64 {
        self.segment_count() - self.index.min(self.segment_count())
    }

    /// Yields the next segment, or `None` once all segments have been
    /// produced. Calling again after exhaustion keeps returning `None`.
    ///
    /// Fails with [`SegmentError::Closed`] after [`close`](Self::close).
    pub fn next_segment(&mut self) -> Result<Option<Segment<'_>>, SegmentError> {
        if self.source.is_closed() {
            return Err(SegmentError::Closed);
        }
        if self.index >= self.segment_count() {
            return Ok(None);
        }

        let offset = self.index * self.segment_size;
        let len = self.segment_size.min(self.len - offset);
        self.index += 1;

        Ok(Some(Segment {
            source: &self.source,
            offset,
            len,
            pos: offset,
            remaining: len,
        }))
    }

    /// Releases the underlying file handle. Calling `close` again is a
    /// no-op; the handle is never released twice. Release failures surface
    /// as [`SegmentError::Io`] instead of being swallowed.
    pub fn close(&mut self) -> Result<(), SegmentError> {
        if !self.source.is_closed() {
            debug!(path = %self.source.path().display(), "segment plan closed");
            self.source.close();
        }
        Ok(())
    }
}

/// A read-only view of one contiguous byte range of the planned file.
///
/// The segment borrows the plan's file handle; dropping it (even half-read)
/// releases nothing and cannot disturb the next segment, because every read
/// re-positions at the segment's own cursor before touching the file.
#[derive(Debug)]
pub struct Segment<'a> {
    source: &'a FileSource,
    offset: u64,
    len: u64,
    pos: u64,
    remaining: u64,
}

impl Segment<'_> {
    /// Byte offset of this segment within the source file.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Total length of this segment in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` for a zero-length segment. Plans never yield one.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes left to read before this segment's bound.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Read for Segment<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let take = u64::min(self.remaining, buf.len() as u64) as usize;
        self.source
            .read_exact_at(self.pos, &mut buf[..take])
            .map_err(|e| match e {
                SegmentError::Io(io) => io,
                other => io::Error::other(other),
            })?;
        self.pos += take as u64;
        self.remaining -= take as u64;
        Ok(take)
    }
}
