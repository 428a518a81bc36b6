//! Storage: flat element buffers and where they live

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};

/// Location name reported for host-resident storage.
pub const HOST_LOCATION: &str = "host";

/// Flat, row-major element buffer
///
/// Storage owns its bytes exclusively. Reductions read them and always
/// produce a fresh storage; nothing in the crate writes into an existing one.
///
/// A storage may also be a handle to memory on another device. Such
/// storage knows its size and dtype but its bytes cannot be read here:
/// [`Storage::as_bytes`] fails with [`Error::RemoteBuffer`].
#[derive(Clone, Debug)]
pub struct Storage {
    inner: StorageInner,
    /// Element type
    dtype: DType,
}

#[derive(Clone, Debug)]
enum StorageInner {
    Host(Vec<u8>),
    Remote { location: String, size_bytes: usize },
}

impl Storage {
    /// Create storage from typed data, copying it into a byte buffer.
    pub fn from_slice<T: Element>(data: &[T]) -> Self {
        Self {
            inner: StorageInner::Host(bytemuck::cast_slice(data).to_vec()),
            dtype: T::DTYPE,
        }
    }

    /// Create storage from raw bytes with explicit dtype
    ///
    /// Fails with [`Error::EmptyBuffer`] for a zero-length buffer and with
    /// [`Error::MalformedBuffer`] if the length is not a whole number of
    /// elements.
    pub fn from_bytes(data: Vec<u8>, dtype: DType) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        if data.len() % dtype.size_in_bytes() != 0 {
            return Err(Error::malformed_buffer(data.len(), dtype));
        }
        Ok(Self::from_raw(data, dtype))
    }

    /// Handle to `len` elements held on another device.
    pub fn remote(location: impl Into<String>, len: usize, dtype: DType) -> Self {
        Self {
            inner: StorageInner::Remote {
                location: location.into(),
                size_bytes: len * dtype.size_in_bytes(),
            },
            dtype,
        }
    }

    /// Wrap bytes produced by a kernel; length is the kernel's responsibility.
    pub(crate) fn from_raw(data: Vec<u8>, dtype: DType) -> Self {
        debug_assert_eq!(data.len() % dtype.size_in_bytes(), 0);
        Self {
            inner: StorageInner::Host(data),
            dtype,
        }
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        match &self.inner {
            StorageInner::Host(data) => data.len(),
            StorageInner::Remote { size_bytes, .. } => *size_bytes,
        }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.size_in_bytes() / self.dtype.size_in_bytes()
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size_in_bytes() == 0
    }

    /// Whether the bytes are directly addressable from this process.
    #[inline]
    pub fn is_host(&self) -> bool {
        matches!(self.inner, StorageInner::Host(_))
    }

    /// Where the bytes live: [`HOST_LOCATION`] or the remote device name.
    pub fn location(&self) -> &str {
        match &self.inner {
            StorageInner::Host(_) => HOST_LOCATION,
            StorageInner::Remote { location, .. } => location,
        }
    }

    /// Borrow the raw bytes.
    ///
    /// Fails with [`Error::RemoteBuffer`] if the storage is not host resident.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        match &self.inner {
            StorageInner::Host(data) => Ok(data),
            StorageInner::Remote { location, .. } => Err(Error::RemoteBuffer {
                location: location.clone(),
            }),
        }
    }
}
