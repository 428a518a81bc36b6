//! Tensor operations
//!
//! Operations are defined as traits implemented by runtime clients, which
//! own the execution settings (parallelism) an operation runs under.
//!
//! ```text
//! CpuClient
//!   └── implements ReduceOps
//!         ├── reduce              (caller-supplied fold)
//!         └── sum, prod, max, min, mean (built-in folds)
//! ```
//!
//! Backend-independent helpers:
//! - [`ReduceOp`], [`ReduceOptions`] - reduction kinds and call options
//! - [`decompose`] - gap/chunk pattern for reducing along one axis
//! - [`reduce_output_shape`] - output shape with or without `keepdim`

mod cpu;
mod dispatch;
pub mod reduce;
mod traits;

pub use reduce::{
    AxisDecomposition, ReduceOp, ReduceOptions, decompose, normalize_axis, reduce_output_shape,
};
pub use traits::ReduceOps;
