//! Reduction operation helpers
//!
//! Backend-independent pieces of a reduction: the built-in operation kinds,
//! call options, and the shape/axis decomposition that tells a kernel how a
//! row-major buffer splits into independently folded groups.
//!
//! # Axis decomposition
//!
//! Reducing a row-major buffer along `axis` touches it in two levels:
//!
//! ```text
//! shape (2, 2, 3), axis 1
//!
//! chunk_size = 2 * 3 = 6     one full sweep of the axis and everything inside it
//! gap_size   = 3             stride between elements sharing an output cell
//!
//! | 1  2  3 | 4  5  6 || 7  8  9 | 10 11 12 |
//! '------ chunk 0 ----''------ chunk 1 ------'
//!   out[i] = fold(chunk[i], chunk[i + 3])   for i in 0..3
//! ```

use crate::error::{Error, Result};
use crate::tensor::Shape;

/// Reduction operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReduceOp {
    /// Sum of elements
    Sum,
    /// Mean of elements
    Mean,
    /// Maximum element
    Max,
    /// Minimum element
    Min,
    /// Product of elements
    Prod,
}

impl ReduceOp {
    /// Operation name used in errors and logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Max => "max",
            Self::Min => "min",
            Self::Prod => "prod",
        }
    }
}

/// Options for a single reduction call
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReduceOptions {
    /// Axis to reduce along; `None` reduces every element to a scalar.
    /// Negative values count from the last dimension.
    pub axis: Option<isize>,
    /// Keep the reduced axis as a dimension of size 1.
    pub keepdim: bool,
}

impl ReduceOptions {
    /// Full reduction to a scalar
    pub const fn full() -> Self {
        Self {
            axis: None,
            keepdim: false,
        }
    }

    /// Reduction along one axis
    pub const fn along(axis: isize) -> Self {
        Self {
            axis: Some(axis),
            keepdim: false,
        }
    }

    /// Set `keepdim`
    pub const fn keepdim(mut self, keepdim: bool) -> Self {
        self.keepdim = keepdim;
        self
    }
}

/// How a row-major buffer partitions for a reduction along one axis
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisDecomposition {
    /// Normalized (non-negative) axis
    pub axis: usize,
    /// Size of the reduced dimension
    pub axis_dim: usize,
    /// Elements between two inputs that fold into the same output cell
    pub gap_size: usize,
    /// Elements in one contiguous sweep of the axis
    pub chunk_size: usize,
    /// Input shape with the axis removed
    pub result_shape: Shape,
}

/// Normalize an axis (handle negative indices)
///
/// Returns None if the axis is out of range.
pub fn normalize_axis(ndim: usize, axis: isize) -> Option<usize> {
    if axis >= 0 {
        let axis = axis as usize;
        if axis < ndim { Some(axis) } else { None }
    } else {
        let axis = ndim as isize + axis;
        if axis >= 0 { Some(axis as usize) } else { None }
    }
}

/// Split `shape` into the gap/chunk pattern for reducing along `axis`.
///
/// Fixing every dimension before the axis leaves one chunk: a contiguous
/// run covering the axis and all dimensions inside it. Inside a chunk,
/// elements that differ only in their axis coordinate are `gap_size` apart.
/// Both are suffix products of the shape, so zero-sized dimensions never
/// divide by zero.
///
/// Fails with [`Error::InvalidAxis`] if `axis` is outside `[-rank, rank)`.
pub fn decompose(shape: &[usize], axis: isize) -> Result<AxisDecomposition> {
    let axis_idx =
        normalize_axis(shape.len(), axis).ok_or_else(|| Error::invalid_axis(axis, shape))?;

    let gap_size: usize = shape[axis_idx + 1..].iter().product();
    let chunk_size = shape[axis_idx] * gap_size;
    let result_shape: Shape = shape[..axis_idx]
        .iter()
        .chain(&shape[axis_idx + 1..])
        .copied()
        .collect();

    tracing::trace!(
        ?shape,
        axis,
        axis_idx,
        gap_size,
        chunk_size,
        "decomposed reduction axis"
    );

    Ok(AxisDecomposition {
        axis: axis_idx,
        axis_dim: shape[axis_idx],
        gap_size,
        chunk_size,
        result_shape,
    })
}

/// Compute output shape for a reduction
///
/// # Arguments
/// * `input_shape` - Shape of input tensor
/// * `axis` - Normalized axis, or `None` for a full reduction
/// * `keepdim` - If true, keep reduced dimensions as size 1
pub fn reduce_output_shape(input_shape: &[usize], axis: Option<usize>, keepdim: bool) -> Shape {
    match (axis, keepdim) {
        (None, false) => Shape::scalar(),
        (None, true) => input_shape.iter().map(|_| 1).collect(),
        (Some(axis), true) => input_shape
            .iter()
            .enumerate()
            .map(|(i, &s)| if i == axis { 1 } else { s })
            .collect(),
        (Some(axis), false) => input_shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &s)| s)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(3, 0), Some(0));
        assert_eq!(normalize_axis(3, 2), Some(2));
        assert_eq!(normalize_axis(3, -1), Some(2));
        assert_eq!(normalize_axis(3, -3), Some(0));

        // Out of range
        assert_eq!(normalize_axis(3, 3), None);
        assert_eq!(normalize_axis(3, -4), None);
        assert_eq!(normalize_axis(0, 0), None);
    }

    #[test]
    fn test_decompose_each_axis() {
        let shape = [2, 2, 3];

        let d0 = decompose(&shape, 0).unwrap();
        assert_eq!((d0.gap_size, d0.chunk_size), (6, 12));
        assert_eq!(d0.result_shape.as_slice(), &[2, 3]);

        let d1 = decompose(&shape, 1).unwrap();
        assert_eq!((d1.gap_size, d1.chunk_size), (3, 6));
        assert_eq!(d1.result_shape.as_slice(), &[2, 3]);

        let d2 = decompose(&shape, 2).unwrap();
        assert_eq!((d2.gap_size, d2.chunk_size), (1, 3));
        assert_eq!(d2.result_shape.as_slice(), &[2, 2]);
    }

    #[test]
    fn test_decompose_negative_axis_matches_positive() {
        let shape = [2, 2, 3];
        assert_eq!(decompose(&shape, -1).unwrap(), decompose(&shape, 2).unwrap());
        assert_eq!(decompose(&shape, -3).unwrap(), decompose(&shape, 0).unwrap());
    }

    #[test]
    fn test_decompose_out_of_range() {
        match decompose(&[3], 1) {
            Err(Error::InvalidAxis { axis, shape }) => {
                assert_eq!(axis, 1);
                assert_eq!(shape, vec![3]);
            }
            other => panic!("expected InvalidAxis, got {other:?}"),
        }
        assert!(decompose(&[2, 2, 3], 3).is_err());
        assert!(decompose(&[2, 2, 3], -4).is_err());
        assert!(decompose(&[], 0).is_err());
    }

    #[test]
    fn test_decompose_zero_sized_dims() {
        let d = decompose(&[2, 0, 3], 1).unwrap();
        assert_eq!((d.gap_size, d.chunk_size), (3, 0));
        assert_eq!(d.axis_dim, 0);
        assert_eq!(d.result_shape.as_slice(), &[2, 3]);

        let d = decompose(&[4, 0], 0).unwrap();
        assert_eq!((d.gap_size, d.chunk_size), (0, 0));
        assert_eq!(d.axis_dim, 4);
    }

    #[test]
    fn test_reduce_output_shape() {
        assert_eq!(reduce_output_shape(&[2, 3, 4], Some(1), false).as_slice(), &[2, 4]);
        assert_eq!(
            reduce_output_shape(&[2, 3, 4], Some(1), true).as_slice(),
            &[2, 1, 4]
        );
        assert!(reduce_output_shape(&[2, 3, 4], None, false).is_scalar());
        assert_eq!(reduce_output_shape(&[2, 3, 4], None, true).as_slice(), &[1, 1, 1]);
    }
}
