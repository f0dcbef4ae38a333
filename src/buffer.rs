//! Buffer types for cheap fan-out data passing.

use crate::metadata::Metadata;
use bytes::Bytes;

/// A buffer containing data and metadata.
///
/// Buffers are the primary data container in Manifold pipelines. They consist
/// of an immutable byte payload and [`Metadata`] with the sequence tag,
/// timestamps and flags.
///
/// # Sharing
///
/// Buffers are cheap to clone - the payload is refcounted and never copied
/// during normal pipeline operations. The fan-out stage hands every output an
/// independent clone of the same immutable bytes; a consumer that needs a
/// private mutable copy must take one explicitly via [`Buffer::copy_deep`].
///
/// # Example
///
/// ```rust
/// use manifold::buffer::Buffer;
/// use manifold::metadata::Metadata;
///
/// let buffer = Buffer::from_bytes(vec![0u8; 1024], Metadata::with_sequence(0));
///
/// // Clone is O(1) - just a refcount increment
/// let buffer2 = buffer.clone();
/// assert_eq!(buffer2.len(), 1024);
/// ```
#[derive(Clone)]
pub struct Buffer {
    /// Immutable payload bytes.
    data: Bytes,
    /// Buffer metadata.
    metadata: Metadata,
}

impl Buffer {
    /// Create a new buffer from a byte payload.
    pub fn from_bytes(data: impl Into<Bytes>, metadata: Metadata) -> Self {
        Self {
            data: data.into(),
            metadata,
        }
    }

    /// Create a buffer from a static byte slice (no allocation).
    pub fn from_static(data: &'static [u8], metadata: Metadata) -> Self {
        Self {
            data: Bytes::from_static(data),
            metadata,
        }
    }

    /// Get a reference to the buffer's metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get a mutable reference to the buffer's metadata.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Get the buffer data as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the length of the buffer data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Create a sub-buffer (a view into a portion of this buffer).
    ///
    /// The new buffer shares the same payload and metadata.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len > self.len()`.
    pub fn slice(&self, offset: usize, len: usize) -> Buffer {
        Buffer {
            data: self.data.slice(offset..offset + len),
            metadata: self.metadata.clone(),
        }
    }

    /// Create an independent deep copy of this buffer.
    ///
    /// Use this when a downstream consumer is documented as mutating its
    /// copy; ordinary clones share the payload.
    pub fn copy_deep(&self) -> Buffer {
        Buffer {
            data: Bytes::copy_from_slice(&self.data),
            metadata: self.metadata.clone(),
        }
    }

    /// Consume the buffer, returning its payload.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("metadata", &self.metadata)
            .finish()
    }
}
