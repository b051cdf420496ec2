//! Content-encoding detection and reversal.
//!
//! Upstream encoding headers are not fully trusted: when a body claims an
//! encoding but fails to decode, the raw bytes are returned unchanged.

use std::io::Read;

use flate2::read::{GzDecoder, ZlibDecoder};

/// Encodings the document path knows how to reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Brotli,
    Gzip,
    Deflate,
    Identity,
}

impl ContentEncoding {
    /// Interpret a `Content-Encoding` header value (case-insensitive).
    /// Absent or unrecognized values mean identity.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("br") => ContentEncoding::Brotli,
            Some("gzip") | Some("x-gzip") => ContentEncoding::Gzip,
            Some("deflate") => ContentEncoding::Deflate,
            _ => ContentEncoding::Identity,
        }
    }

    fn decode(self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(body.len() * 4);
        match self {
            ContentEncoding::Brotli => {
                brotli::Decompressor::new(body, 4096).read_to_end(&mut out)?;
            }
            ContentEncoding::Gzip => {
                GzDecoder::new(body).read_to_end(&mut out)?;
            }
            ContentEncoding::Deflate => {
                ZlibDecoder::new(body).read_to_end(&mut out)?;
            }
            ContentEncoding::Identity => out.extend_from_slice(body),
        }
        Ok(out)
    }
}

/// Decode `body` according to its declared encoding, falling back to the raw
/// bytes on failure.
pub fn decode_body(encoding: Option<&str>, body: &[u8]) -> Vec<u8> {
    let encoding = ContentEncoding::from_header(encoding);
    match encoding.decode(body) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(?encoding, error = %e, "Decompression failed, using raw body");
            body.to_vec()
        }
    }
}
