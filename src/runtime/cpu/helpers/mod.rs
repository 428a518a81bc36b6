//! Helper functions for CPU tensor operations

pub(crate) mod reduce;

pub(crate) use reduce::{reduce_impl, reduce_op_impl};
