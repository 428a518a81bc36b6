//! Operation traits for tensor operations.
//!
//! The CPU implementation lives in `ops::cpu` and delegates to
//! `runtime::cpu::helpers`.

mod reduce;

pub use reduce::ReduceOps;
