//! Byte-level fold kernels
//!
//! Both kernels read fixed-width elements straight out of the flat input
//! bytes, hand them to the fold function as `T`, and encode results into a
//! freshly allocated, pre-sized output buffer.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::cpu::CpuClient;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Number of `T` elements in `bytes`.
///
/// Fails with [`Error::MalformedBuffer`] on a trailing partial element.
pub(super) fn element_count<T: Element>(bytes: &[u8]) -> Result<usize> {
    let size = T::DTYPE.size_in_bytes();
    if bytes.len() % size != 0 {
        return Err(Error::malformed_buffer(bytes.len(), T::DTYPE));
    }
    Ok(bytes.len() / size)
}

/// Fold every element of `bytes` into one value, encoded as a single element.
pub(super) fn fold_full<T, F>(client: &CpuClient, bytes: &[u8], init: T, f: &F) -> Result<Vec<u8>>
where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    let numel = element_count::<T>(bytes)?;

    let acc = fold_full_runtime(client, bytes, numel, init, f);

    let mut out = vec![0u8; T::DTYPE.size_in_bytes()];
    acc.encode(&mut out);
    Ok(out)
}

/// Fold along an axis described by `gap_size`/`chunk_size`.
///
/// `bytes` is split into windows of `chunk_size` elements. Window element
/// `i + k * gap_size` folds into output `i` of that window, so each window
/// yields `gap_size` outputs, written in window order.
pub(super) fn fold_axis<T, F>(
    client: &CpuClient,
    bytes: &[u8],
    gap_size: usize,
    chunk_size: usize,
    init: T,
    f: &F,
) -> Result<Vec<u8>>
where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    let numel = element_count::<T>(bytes)?;
    if gap_size == 0 || chunk_size == 0 || chunk_size % gap_size != 0 || numel % chunk_size != 0 {
        return Err(Error::Internal(format!(
            "gap {gap_size} / chunk {chunk_size} does not tile a buffer of {numel} elements"
        )));
    }

    let size = T::DTYPE.size_in_bytes();
    let num_windows = numel / chunk_size;
    let mut out = vec![0u8; num_windows * gap_size * size];

    #[cfg(feature = "rayon")]
    {
        if num_windows > 1 && client.should_parallelize(numel) {
            fold_axis_parallel(client, bytes, &mut out, gap_size, chunk_size, init, f);
            return Ok(out);
        }
    }

    #[cfg(not(feature = "rayon"))]
    let _ = client;

    let mut accs = Vec::with_capacity(gap_size);
    for (window, dst) in bytes
        .chunks_exact(chunk_size * size)
        .zip(out.chunks_exact_mut(gap_size * size))
    {
        fold_window(window, dst, gap_size, init, f, &mut accs);
    }
    Ok(out)
}

/// Fold one window into `gap_size` encoded outputs.
///
/// The window is walked group by group (each group is `gap_size`
/// consecutive elements), so reads stay sequential; `accs` is scratch space
/// reused across windows.
#[inline]
fn fold_window<T, F>(
    window: &[u8],
    dst: &mut [u8],
    gap_size: usize,
    init: T,
    f: &F,
    accs: &mut Vec<T>,
) where
    T: Element,
    F: Fn(T, T) -> T,
{
    let size = T::DTYPE.size_in_bytes();
    accs.clear();
    accs.resize(gap_size, init);

    for group in window.chunks_exact(gap_size * size) {
        for (acc, elem) in accs.iter_mut().zip(group.chunks_exact(size)) {
            *acc = f(T::decode(elem), *acc);
        }
    }

    for (acc, slot) in accs.iter().zip(dst.chunks_exact_mut(size)) {
        acc.encode(slot);
    }
}

#[inline]
fn fold_range<T, F>(bytes: &[u8], init: T, f: &F) -> T
where
    T: Element,
    F: Fn(T, T) -> T,
{
    bytes
        .chunks_exact(T::DTYPE.size_in_bytes())
        .map(T::decode)
        .fold(init, |acc, x| f(x, acc))
}

fn fold_full_runtime<T, F>(client: &CpuClient, bytes: &[u8], numel: usize, init: T, f: &F) -> T
where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    #[cfg(feature = "rayon")]
    {
        if client.should_parallelize(numel) {
            return fold_full_parallel(client, bytes, init, f);
        }
    }

    #[cfg(not(feature = "rayon"))]
    let _ = (client, numel);

    fold_range(bytes, init, f)
}

/// Fold disjoint element ranges independently, then fold the partials into
/// `init`. Each range starts from its own first element so `init` enters the
/// result exactly once.
#[cfg(feature = "rayon")]
fn fold_full_parallel<T, F>(client: &CpuClient, bytes: &[u8], init: T, f: &F) -> T
where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    let size = T::DTYPE.size_in_bytes();
    let task_bytes = client.rayon_min_len() * size;
    tracing::trace!(
        tasks = bytes.len().div_ceil(task_bytes),
        "splitting full reduction"
    );

    let partials: Vec<T> = client.install_parallelism(|| {
        bytes
            .par_chunks(task_bytes)
            .filter_map(|part| {
                let mut elems = part.chunks_exact(size).map(T::decode);
                let first = elems.next()?;
                Some(elems.fold(first, |acc, x| f(x, acc)))
            })
            .collect()
    });

    partials.into_iter().fold(init, |acc, p| f(p, acc))
}

#[cfg(feature = "rayon")]
fn fold_axis_parallel<T, F>(
    client: &CpuClient,
    bytes: &[u8],
    out: &mut [u8],
    gap_size: usize,
    chunk_size: usize,
    init: T,
    f: &F,
) where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    let size = T::DTYPE.size_in_bytes();
    let min_windows = (client.rayon_min_len() / chunk_size).max(1);
    tracing::trace!(min_windows, "splitting axis reduction by window");

    client.install_parallelism(|| {
        bytes
            .par_chunks_exact(chunk_size * size)
            .zip(out.par_chunks_exact_mut(gap_size * size))
            .with_min_len(min_windows)
            .for_each_init(
                || Vec::with_capacity(gap_size),
                |accs, (window, dst)| fold_window(window, dst, gap_size, init, f, accs),
            );
    });
}
