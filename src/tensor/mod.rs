//! Tensor types
//!
//! This module provides the [`Tensor`] array value: a [`Shape`] over a flat,
//! row-major [`Storage`] buffer tagged with its dtype.

mod core;
mod shape;
mod storage;

pub use core::{IntoTensor, Tensor};
pub use shape::Shape;
pub use storage::{HOST_LOCATION, Storage};
