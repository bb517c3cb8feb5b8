//! Row-parallel iteration over destination planes.
//!
//! Every engine in the workspace writes its output one destination row at a
//! time, reading freely from an immutable source. These helpers hand out
//! disjoint mutable rows: across threads with Rayon when the `parallel`
//! feature is enabled, sequentially otherwise. Output is identical either
//! way.
//!
//! # Example
//!
//! ```rust
//! use yuvx_core::parallel::for_each_row;
//!
//! let mut plane = vec![0u8; 4 * 3];
//! for_each_row(&mut plane, 4, |y, row| row.fill(y as u8));
//! assert_eq!(&plane[8..], &[2, 2, 2, 2]);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `stride`-sized row of `data`.
pub fn for_each_row<F>(data: &mut [u8], stride: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if stride == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Calls `f(y, row_a, row_b)` for rows of two planes in lockstep.
///
/// Used where two planes share a row grid, such as the U and V planes of a
/// 4:2:0 frame. Iteration stops at the shorter plane.
pub fn for_each_row_pair<F>(a: &mut [u8], stride_a: usize, b: &mut [u8], stride_b: usize, f: F)
where
    F: Fn(usize, &mut [u8], &mut [u8]) + Send + Sync,
{
    if stride_a == 0 || stride_b == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    a.par_chunks_mut(stride_a)
        .zip(b.par_chunks_mut(stride_b))
        .enumerate()
        .for_each(|(y, (ra, rb))| f(y, ra, rb));

    #[cfg(not(feature = "parallel"))]
    a.chunks_mut(stride_a)
        .zip(b.chunks_mut(stride_b))
        .enumerate()
        .for_each(|(y, (ra, rb))| f(y, ra, rb));
}
