//! Byte View Module
//!
//! Immutable view over a cached value.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::cache::Value;

// == Byte View ==
/// Read-only wrapper around the bytes of a cached value.
///
/// Cloning a view is cheap and shares the underlying buffer. The buffer is never
/// handed out by reference: [`ByteView::byte_slice`] always returns a fresh copy.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ByteView {
    b: Bytes,
}

impl ByteView {
    // == Length ==
    /// Returns the number of bytes in the view.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    // == Byte Slice ==
    /// Returns a copy of the data, independent of the view's storage.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    // == As Text ==
    /// Decodes the data as UTF-8, replacing invalid sequences.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.b)
    }
}

impl Value for ByteView {
    fn len(&self) -> usize {
        self.b.len()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(v: Vec<u8>) -> Self {
        Self { b: Bytes::from(v) }
    }
}

impl From<Bytes> for ByteView {
    fn from(b: Bytes) -> Self {
        Self { b }
    }
}

impl From<&[u8]> for ByteView {
    fn from(s: &[u8]) -> Self {
        Self {
            b: Bytes::copy_from_slice(s),
        }
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView").field("len", &self.len()).finish()
    }
}
