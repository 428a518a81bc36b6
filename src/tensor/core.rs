//! Core Tensor type

use super::{Shape, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fmt;

/// N-dimensional array over a flat, row-major buffer
///
/// `Tensor` ties together:
/// - **Storage**: the exclusively owned element bytes
/// - **Shape**: the dimensions (rank 0 for a scalar)
/// - **DType**: element type, held by the storage
///
/// Construction upholds `storage.len() == shape.numel()`.
///
/// # Example
///
/// ```
/// use axfold::tensor::Tensor;
///
/// let t = Tensor::from_slice(&[1i32, 2, 3, 4, 5, 6], &[2, 3]);
/// assert_eq!(t.shape(), &[2, 3]);
/// assert_eq!(t.numel(), 6);
/// ```
#[derive(Clone)]
pub struct Tensor {
    storage: Storage,
    shape: Shape,
}

impl Tensor {
    /// Create a tensor from storage and shape
    ///
    /// Fails with [`Error::EmptyBuffer`] for storage without elements and
    /// with [`Error::ShapeMismatch`] if the element counts disagree.
    pub fn from_parts(storage: Storage, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        if storage.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        if storage.len() != shape.numel() {
            return Err(Error::shape_mismatch(&shape, &[storage.len()]));
        }
        Ok(Self { storage, shape })
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data` is empty or `data.len()` does not equal the product of
    /// the `shape` dimensions. For a fallible alternative, use
    /// [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Self {
        Self::try_from_slice(data, shape).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    pub fn try_from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        Self::from_parts(Storage::from_slice(data), shape)
    }

    /// Create a tensor from raw bytes with an explicit dtype
    ///
    /// The bytes are row-major, native endian, `dtype.size_in_bytes()` per
    /// element.
    pub fn from_bytes(data: Vec<u8>, dtype: DType, shape: &[usize]) -> Result<Self> {
        let storage = Storage::from_bytes(data, dtype)?;
        Self::from_parts(storage, shape)
    }

    /// Create a rank-0 tensor holding a single value
    pub fn scalar<T: Element>(value: T) -> Self {
        Self {
            storage: Storage::from_slice(&[value]),
            shape: Shape::scalar(),
        }
    }

    /// Describe a tensor whose data lives on another device.
    ///
    /// Shape and dtype queries work; reading or reducing it fails with
    /// [`Error::RemoteBuffer`].
    pub fn remote(location: impl Into<String>, dtype: DType, shape: &[usize]) -> Self {
        let shape = Shape::from(shape);
        Self {
            storage: Storage::remote(location, shape.numel(), dtype),
            shape,
        }
    }

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Check if this is a rank-0 tensor
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_scalar()
    }

    /// Borrow the flat buffer bytes.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        self.storage.as_bytes()
    }

    /// Copy the elements out in row-major order
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.expect_dtype(T::DTYPE)?;
        let bytes = self.as_bytes()?;
        Ok(bytes
            .chunks_exact(T::DTYPE.size_in_bytes())
            .map(T::decode)
            .collect())
    }

    /// Read the single element of a one-element tensor
    pub fn item<T: Element>(&self) -> Result<T> {
        if self.numel() != 1 {
            return Err(Error::NotAScalar {
                shape: self.shape.to_vec(),
            });
        }
        self.expect_dtype(T::DTYPE)?;
        Ok(T::decode(self.as_bytes()?))
    }

    pub(crate) fn expect_dtype(&self, dtype: DType) -> Result<()> {
        if self.dtype() != dtype {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype(),
                rhs: dtype,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("dtype", &self.dtype())
            .field("location", &self.storage.location())
            .finish()
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({}, dtype={})", self.shape, self.dtype())
    }
}

impl<T: Element> From<T> for Tensor {
    fn from(value: T) -> Self {
        Self::scalar(value)
    }
}

/// Anything a reduction accepts as its input: a tensor, a borrowed tensor,
/// or a bare scalar (wrapped as rank 0).
pub trait IntoTensor<'a> {
    /// Convert, borrowing where possible.
    fn into_tensor(self) -> Cow<'a, Tensor>;
}

impl<'a> IntoTensor<'a> for &'a Tensor {
    fn into_tensor(self) -> Cow<'a, Tensor> {
        Cow::Borrowed(self)
    }
}

impl<'a> IntoTensor<'a> for Tensor {
    fn into_tensor(self) -> Cow<'a, Tensor> {
        Cow::Owned(self)
    }
}

impl<'a, T: Element> IntoTensor<'a> for T {
    fn into_tensor(self) -> Cow<'a, Tensor> {
        Cow::Owned(Tensor::scalar(self))
    }
}
