//! # axfold
//!
//! **Axis-aware folds over flat, type-tagged, row-major tensor buffers.**
//!
//! A [`Tensor`](tensor::Tensor) is a flat byte buffer, an element
//! [`DType`](dtype::DType) and a shape. Reducing it folds a caller-supplied
//! function over the buffer, either into a single scalar or along one axis,
//! which removes that dimension. The buffer is never viewed as a nested
//! structure: the axis is turned into a gap/chunk stride pattern
//! ([`ops::decompose`]) and elements are decoded straight from their bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use axfold::prelude::*;
//!
//! let client = CpuClient::default();
//! let data: Vec<i64> = (1..=12).collect();
//! let a = Tensor::from_slice(&data, &[2, 2, 3]);
//!
//! let cols = client.reduce(&a, 0i64, &ReduceOptions::along(0), |x, acc| x + acc)?;
//! assert_eq!(cols.shape(), &[2, 3]);
//! assert_eq!(cols.to_vec::<i64>()?, vec![8, 10, 12, 14, 16, 18]);
//!
//! let total = client.sum(&a, None, false)?;
//! assert_eq!(total.item::<i64>()?, 78);
//! # Ok::<(), axfold::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): split large folds across threads
//! - `f16`: half-precision element types (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element, TypeKind};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{ReduceOp, ReduceOps, ReduceOptions};
    pub use crate::runtime::cpu::{CpuClient, ParallelismConfig};
    pub use crate::tensor::{Shape, Tensor};
}
