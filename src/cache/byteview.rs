//! Byte View Module
//!
//! Immutable snapshot of cached bytes.

use std::fmt;
use std::sync::Arc;

use crate::cache::Value;

// == Byte View ==
/// An immutable view of a cached value.
///
/// Clones share the same buffer. The buffer itself is never handed out by
/// reference; [`ByteView::byte_slice`] always returns a fresh copy.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteView {
    b: Arc<[u8]>,
}

impl ByteView {
    // == Constructors ==
    /// Creates a view holding a private copy of `bytes`.
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self { b: Arc::from(bytes) }
    }

    // == Length ==
    /// Returns the number of bytes held.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    /// Returns true if the view holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    // == Byte Slice ==
    /// Returns a copy of the data. Mutating it does not affect the cache.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Returns the data as text, replacing invalid UTF-8 sequences.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.b).into_owned()
    }
}

/// Takes ownership of a buffer nobody else holds, such as a peer response.
impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self { b: bytes.into() }
    }
}

impl Default for ByteView {
    fn default() -> Self {
        Self::copy_from(&[])
    }
}

impl Value for ByteView {
    fn len(&self) -> usize {
        self.b.len()
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.b))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView").field("len", &self.b.len()).finish()
    }
}
