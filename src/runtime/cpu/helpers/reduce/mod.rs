//! Reduction operation helpers for CPU tensors

mod fold;

use fold::{fold_axis, fold_full};

use crate::dispatch_dtype;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::ops::{ReduceOp, ReduceOptions, decompose, normalize_axis, reduce_output_shape};
use crate::runtime::cpu::CpuClient;
use crate::tensor::{Storage, Tensor};

/// Reduce with a caller-supplied fold
///
/// Full reduction when `options.axis` is `None`; otherwise the axis is
/// decomposed into its gap/chunk pattern and folded window by window.
pub(crate) fn reduce_impl<T, F>(
    client: &CpuClient,
    a: &Tensor,
    init: T,
    options: &ReduceOptions,
    f: &F,
) -> Result<Tensor>
where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    a.expect_dtype(T::DTYPE)?;
    let bytes = a.as_bytes()?;

    tracing::debug!(
        dtype = %a.dtype(),
        shape = ?a.shape(),
        axis = ?options.axis,
        keepdim = options.keepdim,
        "reduce"
    );

    match options.axis {
        None => {
            let out = fold_full(client, bytes, init, f)?;
            let out_shape = reduce_output_shape(a.shape(), None, options.keepdim);
            Tensor::from_parts(Storage::from_raw(out, T::DTYPE), out_shape)
        }
        Some(axis) => {
            let decomposition = decompose(a.shape(), axis)?;
            let out = fold_axis(
                client,
                bytes,
                decomposition.gap_size,
                decomposition.chunk_size,
                init,
                f,
            )?;
            let out_shape = if options.keepdim {
                reduce_output_shape(a.shape(), Some(decomposition.axis), true)
            } else {
                decomposition.result_shape
            };
            Tensor::from_parts(Storage::from_raw(out, T::DTYPE), out_shape)
        }
    }
}

/// Reduce with a built-in operation, dispatching on the tensor's dtype
pub(crate) fn reduce_op_impl(
    client: &CpuClient,
    a: &Tensor,
    op: ReduceOp,
    options: &ReduceOptions,
) -> Result<Tensor> {
    dispatch_dtype!(a.dtype(), T => {
        match op {
            ReduceOp::Sum | ReduceOp::Mean => {
                let sum = reduce_impl(client, a, <T as Element>::zero(), options, &|x: T, acc: T| x + acc)?;
                if matches!(op, ReduceOp::Mean) {
                    let count = folded_count(a.shape(), options)?;
                    divide_by_count::<T>(&sum, count)
                } else {
                    Ok(sum)
                }
            }
            ReduceOp::Prod => {
                reduce_impl(client, a, <T as Element>::one(), options, &|x: T, acc: T| x * acc)
            }
            ReduceOp::Max => reduce_impl(
                client,
                a,
                <T as Element>::lowest(),
                options,
                &|x: T, acc: T| if x.is_nan() || x > acc { x } else { acc },
            ),
            ReduceOp::Min => reduce_impl(
                client,
                a,
                <T as Element>::highest(),
                options,
                &|x: T, acc: T| if x.is_nan() || x < acc { x } else { acc },
            ),
        }
    }, op.name())
}

/// Number of input elements folded into each output cell
fn folded_count(shape: &[usize], options: &ReduceOptions) -> Result<usize> {
    match options.axis {
        None => Ok(shape.iter().product()),
        Some(axis) => normalize_axis(shape.len(), axis)
            .map(|axis| shape[axis])
            .ok_or_else(|| Error::invalid_axis(axis, shape)),
    }
}

/// Divide every cell by `count`.
///
/// Integer cells divide in their own type (truncating toward zero) whenever
/// `count` is representable in it; otherwise the quotient goes through `f64`.
fn divide_by_count<T: Element>(sum: &Tensor, count: usize) -> Result<Tensor> {
    let divisor = T::from_f64(count as f64);
    let exact = !T::DTYPE.is_float() && divisor.to_f64() == count as f64;
    let scaled: Vec<T> = sum
        .to_vec::<T>()?
        .into_iter()
        .map(|v| {
            if exact {
                v / divisor
            } else {
                T::from_f64(v.to_f64() / count as f64)
            }
        })
        .collect();
    Tensor::from_parts(Storage::from_slice(&scaled), sum.shape())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    fn client() -> CpuClient {
        CpuClient::new()
    }

    #[test]
    fn test_reduce_impl_full_and_axis() {
        let data: Vec<i32> = (1..=12).collect();
        let a = Tensor::from_slice(&data, &[2, 2, 3]);
        let add = |x: i32, acc: i32| x + acc;

        let full = reduce_impl(&client(), &a, 0, &ReduceOptions::full(), &add).unwrap();
        assert!(full.is_scalar());
        assert_eq!(full.item::<i32>().unwrap(), 78);

        let axis1 = reduce_impl(&client(), &a, 0, &ReduceOptions::along(1), &add).unwrap();
        assert_eq!(axis1.shape(), &[2, 3]);
        assert_eq!(axis1.to_vec::<i32>().unwrap(), vec![5, 7, 9, 17, 19, 21]);
    }

    #[test]
    fn test_reduce_impl_keepdim() {
        let a = Tensor::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
        let add = |x: f64, acc: f64| x + acc;

        let rows = reduce_impl(&client(), &a, 0.0, &ReduceOptions::along(-1).keepdim(true), &add)
            .unwrap();
        assert_eq!(rows.shape(), &[2, 1]);
        assert_eq!(rows.to_vec::<f64>().unwrap(), vec![6.0, 15.0]);

        let all = reduce_impl(&client(), &a, 0.0, &ReduceOptions::full().keepdim(true), &add)
            .unwrap();
        assert_eq!(all.shape(), &[1, 1]);
        assert_eq!(all.to_vec::<f64>().unwrap(), vec![21.0]);
    }

    #[test]
    fn test_reduce_impl_dtype_mismatch() {
        let a = Tensor::from_slice(&[1u8, 2], &[2]);
        let err = reduce_impl(&client(), &a, 0u16, &ReduceOptions::full(), &|x, acc| x + acc)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DTypeMismatch {
                lhs: DType::U8,
                rhs: DType::U16
            }
        ));
    }

    #[test]
    fn test_reduce_impl_remote_buffer() {
        let a = Tensor::remote("wgpu:0", DType::F32, &[8]);
        let err = reduce_impl(&client(), &a, 0f32, &ReduceOptions::full(), &|x, acc| x + acc)
            .unwrap_err();
        assert!(matches!(err, Error::RemoteBuffer { location } if location == "wgpu:0"));
    }

    #[test]
    fn test_reduce_op_max_min_seeds() {
        let a = Tensor::from_slice(&[-3i8, -7, -1, -4], &[2, 2]);
        let max = reduce_op_impl(&client(), &a, ReduceOp::Max, &ReduceOptions::along(0)).unwrap();
        assert_eq!(max.to_vec::<i8>().unwrap(), vec![-3, -1]);
        let min = reduce_op_impl(&client(), &a, ReduceOp::Min, &ReduceOptions::full()).unwrap();
        assert_eq!(min.item::<i8>().unwrap(), -7);
    }

    #[test]
    fn test_reduce_op_max_min_propagate_nan() {
        let a = Tensor::from_slice(&[f64::NAN, 1.0, 2.0, 3.0], &[2, 2]);

        let max = reduce_op_impl(&client(), &a, ReduceOp::Max, &ReduceOptions::full()).unwrap();
        assert!(max.item::<f64>().unwrap().is_nan());

        let min = reduce_op_impl(&client(), &a, ReduceOp::Min, &ReduceOptions::along(0)).unwrap();
        let min = min.to_vec::<f64>().unwrap();
        assert!(min[0].is_nan());
        assert_eq!(min[1], 1.0);
    }

    #[test]
    fn test_reduce_op_mean() {
        let a = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
        let cols = reduce_op_impl(&client(), &a, ReduceOp::Mean, &ReduceOptions::along(0)).unwrap();
        assert_eq!(cols.to_vec::<f32>().unwrap(), vec![2.5, 3.5, 4.5]);

        let ints = Tensor::from_slice(&[1i32, 2, 4], &[3]);
        let mean = reduce_op_impl(&client(), &ints, ReduceOp::Mean, &ReduceOptions::full()).unwrap();
        assert_eq!(mean.item::<i32>().unwrap(), 2);
    }

    #[test]
    fn test_reduce_op_mean_wide_integers_exact() {
        // 2^53 + 1 has no exact f64 representation
        let big = (1u64 << 53) + 1;
        let a = Tensor::from_slice(&[big, big], &[2]);
        let mean = reduce_op_impl(&client(), &a, ReduceOp::Mean, &ReduceOptions::full()).unwrap();
        assert_eq!(mean.item::<u64>().unwrap(), big);

        let neg = Tensor::from_slice(&[-7i64, 0], &[2]);
        let mean = reduce_op_impl(&client(), &neg, ReduceOp::Mean, &ReduceOptions::full()).unwrap();
        assert_eq!(mean.item::<i64>().unwrap(), -3);
    }

    #[test]
    fn test_reduce_op_mean_count_wider_than_dtype() {
        // 300 elements: the count does not fit in i8
        let mut data = vec![0i8; 300];
        data[0] = 127;
        let a = Tensor::from_slice(&data, &[300]);
        let mean = reduce_op_impl(&client(), &a, ReduceOp::Mean, &ReduceOptions::full()).unwrap();
        assert_eq!(mean.item::<i8>().unwrap(), 0);
    }

    #[test]
    fn test_folded_count() {
        assert_eq!(folded_count(&[2, 3, 4], &ReduceOptions::full()).unwrap(), 24);
        assert_eq!(folded_count(&[2, 3, 4], &ReduceOptions::along(-2)).unwrap(), 3);
        assert!(folded_count(&[2, 3, 4], &ReduceOptions::along(3)).is_err());
    }
}
