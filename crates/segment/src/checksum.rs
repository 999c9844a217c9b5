//! Content digests for upload integrity verification.
//!
//! The remote store reports a 128-bit MD5 digest (lowercase hex) for every
//! stored object; uploads are verified by computing the same digest locally
//! per segment and for the whole file.

use std::fmt;
use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use crate::SegmentError;
use crate::source::open_read;

const READ_BUF_SIZE: usize = 8192;

/// Digest algorithm identity.
///
/// A single algorithm today; the enum keeps the identity attached to every
/// computed value instead of leaving it implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Md5,
}

impl ChecksumAlgorithm {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Md5 => "md5",
        }
    }
}

/// A computed content digest plus the algorithm that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumResult {
    algorithm: ChecksumAlgorithm,
    digest: [u8; 16],
}

impl ChecksumResult {
    /// The algorithm that produced this digest.
    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.digest
    }

    /// Lowercase hex encoding, the form the remote store compares against.
    pub fn to_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

impl fmt::Display for ChecksumResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Digests `reader` to end-of-stream.
///
/// Deterministic for identical byte content regardless of how the bytes
/// arrive (one large read or many small ones). A read failure partway
/// through discards the partial hasher state and surfaces the error.
pub fn digest<R: Read>(mut reader: R) -> Result<ChecksumResult, SegmentError> {
    let mut hasher = Md5::new();
    let mut buf = [0u8; READ_BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(ChecksumResult {
        algorithm: ChecksumAlgorithm::Md5,
        digest: hasher.finalize().into(),
    })
}

/// Digests an entire file: open, read to end, close.
pub fn digest_file(path: &Path) -> Result<ChecksumResult, SegmentError> {
    let file = open_read(path)?;
    digest(file)
}

/// Digests an in-memory byte slice.
pub fn digest_bytes(data: &[u8]) -> ChecksumResult {
    ChecksumResult {
        algorithm: ChecksumAlgorithm::Md5,
        digest: Md5::digest(data).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use tempfile::TempDir;

    /// Reader yielding one byte per `read` call.
    struct TrickleReader<'a> {
        data: &'a [u8],
        pos: usize,
    }

    impl Read for TrickleReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    /// Reader failing after a fixed number of bytes.
    struct FailingReader {
        remaining: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("device gone"));
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(0xAB);
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn empty_input_known_digest() {
        let result = digest_bytes(b"");
        assert_eq!(result.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(result.algorithm(), ChecksumAlgorithm::Md5);
    }

    #[test]
    fn abc_known_digest() {
        // RFC 1321 test vector.
        let result = digest_bytes(b"abc");
        assert_eq!(result.to_hex(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn hex_is_lowercase_and_fixed_length() {
        let hex = digest_bytes(b"The quick brown fox").to_hex();
        assert_eq!(hex.len(), 32);
        assert_eq!(hex, hex.to_lowercase());
    }

    #[test]
    fn display_renders_hex() {
        let result = digest_bytes(b"abc");
        assert_eq!(result.to_string(), result.to_hex());
    }

    #[test]
    fn digest_is_deterministic() {
        let a = digest(&b"same bytes"[..]).unwrap();
        let b = digest(&b"same bytes"[..]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn digest_independent_of_read_granularity() {
        let data = b"delivered one byte at a time";
        let trickled = digest(TrickleReader { data, pos: 0 }).unwrap();
        assert_eq!(trickled, digest_bytes(data));
    }

    #[test]
    fn digest_file_matches_reader_digest() {
        let dir = TempDir::new().unwrap();
        let data = b"file contents for digesting";
        let path = dir.path().join("data.bin");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(data).unwrap();
        drop(f);

        let from_file = digest_file(&path).unwrap();
        let from_reader = digest(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(from_file, from_reader);
        assert_eq!(from_file, digest_bytes(data));

        // Re-running on an unmodified file yields the same value.
        assert_eq!(digest_file(&path).unwrap(), from_file);
    }

    #[test]
    fn digest_file_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = digest_file(&dir.path().join("absent.bin"));
        assert!(matches!(result.unwrap_err(), SegmentError::NotFound(_)));
    }

    #[test]
    fn mid_stream_failure_returns_error_not_partial_digest() {
        let result = digest(FailingReader { remaining: 100 });
        assert!(matches!(result.unwrap_err(), SegmentError::Io(_)));
    }
}
