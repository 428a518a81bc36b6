//! CPU implementation of reduce operations.

use crate::dtype::Element;
use crate::error::Result;
use crate::ops::{ReduceOp, ReduceOptions, ReduceOps};
use crate::runtime::cpu::{
    CpuClient,
    helpers::{reduce_impl, reduce_op_impl},
};
use crate::tensor::{IntoTensor, Tensor};

/// ReduceOps implementation for CPU runtime.
impl ReduceOps for CpuClient {
    fn reduce<'a, T, F>(
        &self,
        input: impl IntoTensor<'a>,
        init: T,
        options: &ReduceOptions,
        f: F,
    ) -> Result<Tensor>
    where
        T: Element,
        F: Fn(T, T) -> T + Send + Sync,
    {
        let a = input.into_tensor();
        reduce_impl(self, &a, init, options, &f)
    }

    fn reduce_op(&self, a: &Tensor, op: ReduceOp, options: &ReduceOptions) -> Result<Tensor> {
        reduce_op_impl(self, a, op, options)
    }
}
