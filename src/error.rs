//! Error types for axfold

use crate::dtype::{DType, TypeKind};
use thiserror::Error;

/// Result type alias using axfold's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in axfold operations
#[derive(Error, Debug)]
pub enum Error {
    /// Axis index outside `[-rank, rank)`
    #[error("Invalid axis {axis} for tensor of shape {shape:?}")]
    InvalidAxis {
        /// The axis as requested by the caller (before normalization)
        axis: isize,
        /// Shape of the tensor being reduced
        shape: Vec<usize>,
    },

    /// Tensor data is not resident in host memory
    #[error(
        "Tensor data lives on '{location}' and cannot be read directly; \
         transfer it back to host memory before reducing"
    )]
    RemoteBuffer {
        /// Name of the device holding the buffer
        location: String,
    },

    /// Buffer length inconsistent with the element width
    #[error("Malformed buffer: {byte_len} bytes is not a whole number of {bit_width}-bit elements")]
    MalformedBuffer {
        /// Length of the offending buffer in bytes
        byte_len: usize,
        /// Element width in bits
        bit_width: usize,
    },

    /// Zero-length buffer where at least one element is required
    #[error("Empty buffer: a tensor needs at least one element")]
    EmptyBuffer,

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Dtype of the tensor
        lhs: DType,
        /// Dtype requested by the caller
        rhs: DType,
    },

    /// No dtype exists for the requested kind and width
    #[error("Invalid bit width {bits} for {kind:?} element type")]
    InvalidBitWidth {
        /// Requested element kind
        kind: TypeKind,
        /// Requested width in bits
        bits: usize,
    },

    /// Tried to read a single value out of a multi-element tensor
    #[error("Not a scalar: tensor has shape {shape:?}")]
    NotAScalar {
        /// Shape of the tensor
        shape: Vec<usize>,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid axis error
    pub fn invalid_axis(axis: isize, shape: &[usize]) -> Self {
        Self::InvalidAxis {
            axis,
            shape: shape.to_vec(),
        }
    }

    /// Create a malformed buffer error
    pub fn malformed_buffer(byte_len: usize, dtype: DType) -> Self {
        Self::MalformedBuffer {
            byte_len,
            bit_width: dtype.bit_width(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_buffer_message_names_location() {
        let err = Error::RemoteBuffer {
            location: "cuda:0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cuda:0"));
        assert!(msg.contains("host memory"));
    }

    #[test]
    fn test_malformed_buffer_reports_width() {
        let err = Error::malformed_buffer(7, DType::I32);
        assert!(matches!(
            err,
            Error::MalformedBuffer {
                byte_len: 7,
                bit_width: 32
            }
        ));
    }
}
