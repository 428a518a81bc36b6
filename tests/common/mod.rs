//! Common test utilities
#![allow(dead_code)]

use axfold::runtime::cpu::{CpuClient, ParallelismConfig};

/// Create a CPU client with default settings
pub fn create_cpu_client() -> CpuClient {
    CpuClient::default()
}

/// Create a CPU client that never splits work across threads
pub fn create_serial_client() -> CpuClient {
    CpuClient::with_parallelism(ParallelismConfig::disabled()).expect("serial client")
}

/// Create a CPU client that splits even tiny inputs, to exercise the
/// parallel fold paths
pub fn create_eager_parallel_client() -> CpuClient {
    CpuClient::with_parallelism(
        ParallelismConfig::default()
            .with_min_len(4)
            .with_num_threads(4),
    )
    .expect("parallel client")
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Reference reduction: fold `values` (row-major over `shape`) along `axis`
/// by explicit multi-index arithmetic.
pub fn reference_reduce_axis(values: &[i64], shape: &[usize], axis: usize, init: i64) -> Vec<i64> {
    let outer: usize = shape[..axis].iter().product();
    let inner: usize = shape[axis + 1..].iter().product();
    let mut out = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        for i in 0..inner {
            let mut acc = init;
            for r in 0..shape[axis] {
                acc += values[(o * shape[axis] + r) * inner + i];
            }
            out.push(acc);
        }
    }
    out
}
