//! Reduction operations trait.

use crate::dtype::Element;
use crate::error::Result;
use crate::ops::reduce::{ReduceOp, ReduceOptions};
use crate::tensor::{IntoTensor, Tensor};

/// Reduction operations
pub trait ReduceOps {
    /// Fold `f` over a tensor, optionally along one axis.
    ///
    /// `f` is called as `f(element, accumulator)` and returns the new
    /// accumulator; every output cell starts from `init`. With no axis the
    /// result is a rank-0 tensor; with an axis, that dimension is removed
    /// (or kept as size 1 when `options.keepdim` is set).
    ///
    /// The order in which elements reach `f` is unspecified and may differ
    /// between runs when the client folds in parallel: `f` should be
    /// associative and commutative.
    ///
    /// `input` may be a [`Tensor`], a `&Tensor`, or a bare scalar, which is
    /// treated as a rank-0 tensor.
    ///
    /// # Errors
    ///
    /// - [`Error::DTypeMismatch`](crate::error::Error::DTypeMismatch) if `T`
    ///   is not the tensor's element type
    /// - [`Error::InvalidAxis`](crate::error::Error::InvalidAxis) if the axis
    ///   is outside `[-rank, rank)`
    /// - [`Error::RemoteBuffer`](crate::error::Error::RemoteBuffer) if the
    ///   tensor data is not in host memory
    ///
    /// # Example
    ///
    /// ```
    /// # use axfold::prelude::*;
    /// let client = CpuClient::default();
    /// let a = Tensor::from_slice(&[1i32, 2, 3, 4, 5, 6], &[2, 3]);
    /// let rows = client.reduce(&a, 0i32, &ReduceOptions::along(1), |x, acc| x + acc)?;
    /// assert_eq!(rows.to_vec::<i32>()?, vec![6, 15]);
    /// # Ok::<(), axfold::error::Error>(())
    /// ```
    fn reduce<'a, T, F>(
        &self,
        input: impl IntoTensor<'a>,
        init: T,
        options: &ReduceOptions,
        f: F,
    ) -> Result<Tensor>
    where
        T: Element,
        F: Fn(T, T) -> T + Send + Sync;

    /// Apply a built-in reduction, dispatching on the tensor's dtype.
    fn reduce_op(&self, a: &Tensor, op: ReduceOp, options: &ReduceOptions) -> Result<Tensor>;

    /// Sum along `axis` (all elements when `None`)
    fn sum(&self, a: &Tensor, axis: Option<isize>, keepdim: bool) -> Result<Tensor> {
        let options = ReduceOptions { axis, keepdim };
        self.reduce_op(a, ReduceOp::Sum, &options)
    }

    /// Product along `axis` (all elements when `None`)
    ///
    /// # Example
    ///
    /// ```
    /// # use axfold::prelude::*;
    /// let client = CpuClient::default();
    /// let a = Tensor::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[4]);
    /// let p = client.prod(&a, None, false)?;
    /// assert_eq!(p.item::<f64>()?, 24.0);
    /// # Ok::<(), axfold::error::Error>(())
    /// ```
    fn prod(&self, a: &Tensor, axis: Option<isize>, keepdim: bool) -> Result<Tensor> {
        let options = ReduceOptions { axis, keepdim };
        self.reduce_op(a, ReduceOp::Prod, &options)
    }

    /// Maximum along `axis` (all elements when `None`)
    ///
    /// A NaN element makes its output cell NaN.
    fn max(&self, a: &Tensor, axis: Option<isize>, keepdim: bool) -> Result<Tensor> {
        let options = ReduceOptions { axis, keepdim };
        self.reduce_op(a, ReduceOp::Max, &options)
    }

    /// Minimum along `axis` (all elements when `None`)
    ///
    /// A NaN element makes its output cell NaN.
    fn min(&self, a: &Tensor, axis: Option<isize>, keepdim: bool) -> Result<Tensor> {
        let options = ReduceOptions { axis, keepdim };
        self.reduce_op(a, ReduceOp::Min, &options)
    }

    /// Mean along `axis` (all elements when `None`)
    ///
    /// Integer tensors keep their dtype, so the mean is truncated toward
    /// zero. The division happens in the integer type itself, so 64-bit
    /// sums beyond 2^53 stay exact.
    fn mean(&self, a: &Tensor, axis: Option<isize>, keepdim: bool) -> Result<Tensor> {
        let options = ReduceOptions { axis, keepdim };
        self.reduce_op(a, ReduceOp::Mean, &options)
    }
}
