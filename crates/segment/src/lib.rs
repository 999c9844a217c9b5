//! Segmented upload planning and integrity verification.
//!
//! Splits a local file into a deterministic sequence of bounded byte-range
//! segments for chunked upload to an object-storage large-object API, and
//! computes the MD5 digests used to verify each segment and the whole file
//! after the round trip.

mod checksum;
mod plan;
mod source;

pub use checksum::{ChecksumAlgorithm, ChecksumResult, digest, digest_bytes, digest_file};
pub use plan::{Segment, SegmentPlan};
pub use source::FileSource;

/// Default segment size: 100 MiB.
///
/// Large enough to keep per-segment overhead (MD5, manifest entries, HTTP
/// round trips) low, small enough that a failed segment is cheap to resend.
/// The account configuration can override it per upload.
pub const DEFAULT_SEGMENT_SIZE: u64 = 100 * 1024 * 1024;

/// Errors produced by the segmentation core.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("file not found: {}", .0.display())]
    NotFound(std::path::PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("plan is closed")]
    Closed,
}
