//! CPU runtime implementation
//!
//! Tensors live in host memory, so the CPU client reads their bytes
//! directly. With the `rayon` feature, large folds are split across worker
//! threads according to the client's [`ParallelismConfig`].

mod client;
pub(crate) mod helpers;
mod parallelism;

pub use client::CpuClient;
pub use parallelism::{DEFAULT_MIN_LEN, ParallelismConfig};
