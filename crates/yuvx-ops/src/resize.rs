//! Frame scaling.
//!
//! Every plane is resampled at its own subsampled size, so chroma planes
//! keep their geometry. All filters use integer arithmetic and produce the
//! same bytes on every platform.
//!
//! # Filters
//!
//! - [`FilterMode::None`] - Nearest neighbour (fastest, blocky)
//! - [`FilterMode::Linear`] - Horizontal interpolation, nearest rows
//! - [`FilterMode::Bilinear`] - 2x2 interpolation (smooth)
//! - [`FilterMode::Box`] - Area average over the full footprint (best for
//!   downscaling)
//!
//! Nearest-neighbour skips source samples when shrinking by more than 2x,
//! which aliases badly; [`scale`] switches `None` to `Box` in that case.
//! Explicitly chosen filters are always honoured.
//!
//! # Example
//!
//! ```rust
//! use yuvx_core::{FrameBuffer, PixelFormat};
//! use yuvx_ops::resize::{scale, FilterMode};
//!
//! let src = FrameBuffer::alloc(PixelFormat::I420, 640, 480).unwrap();
//! let dst = scale(&src, 320, 240, FilterMode::Bilinear).unwrap();
//! assert_eq!(dst.dimensions(), (320, 240));
//! ```

use tracing::{debug, trace};
use yuvx_color::{from_canonical, to_canonical};
use yuvx_core::parallel::for_each_row;
use yuvx_core::{Error, FrameBuffer, Plane, Result, Rotation};

/// Resampling filter for [`scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Nearest neighbour.
    #[default]
    None,
    /// Linear interpolation along rows, nearest between rows.
    Linear,
    /// Bilinear interpolation.
    Bilinear,
    /// Area-weighted average.
    Box,
}

/// Fixed-point one (16.16).
const ONE: u64 = 1 << 16;

/// Scales a frame to `dst_width x dst_height`.
///
/// A same-size request returns an exact copy regardless of filter.
///
/// # Errors
///
/// [`Error::InvalidDimensions`] if either target dimension is zero.
///
/// # Example
///
/// ```rust
/// use yuvx_core::{FrameBuffer, PixelFormat};
/// use yuvx_ops::resize::{scale, FilterMode};
///
/// let src = FrameBuffer::from_bytes(PixelFormat::I400, 2, 1, &[0, 200]).unwrap();
/// let up = scale(&src, 4, 1, FilterMode::Linear).unwrap();
/// assert_eq!(up.to_bytes(), vec![0, 50, 150, 200]);
/// ```
pub fn scale(src: &FrameBuffer, dst_width: u32, dst_height: u32, filter: FilterMode) -> Result<FrameBuffer> {
    trace!(format = %src.format(), width = src.width(), height = src.height(), dst_width, dst_height, ?filter, "scale");
    if dst_width == 0 || dst_height == 0 {
        return Err(Error::invalid_dimensions(dst_width, dst_height, "target size must be > 0"));
    }
    let (width, height) = src.dimensions();
    if (width, height) == (dst_width, dst_height) {
        return Ok(src.to_tight());
    }

    let filter = effective_filter(width, height, dst_width, dst_height, filter);
    let desc = src.desc();
    if !desc.is_element_addressable() {
        debug!(format = %src.format(), "scaling through canonical format");
        let canonical = scale(&to_canonical(src, Rotation::Rotate0)?, dst_width, dst_height, filter)?;
        return from_canonical(&canonical, src.format());
    }

    let planes = desc
        .planes
        .iter()
        .zip(src.planes())
        .map(|(pd, plane)| {
            scale_plane(
                plane,
                pd.bytes_per_element as usize,
                (pd.columns(width), pd.rows(height)),
                (pd.columns(dst_width), pd.rows(dst_height)),
                filter,
            )
        })
        .collect();
    FrameBuffer::new(src.format(), dst_width, dst_height, planes)
}

/// Calculates the aspect-preserving dimensions for a target size.
///
/// # Example
///
/// ```rust
/// use yuvx_ops::resize::fit_dimensions;
///
/// // Fit 1920x1080 into 640x480 box
/// let (w, h) = fit_dimensions(1920, 1080, 640, 480);
/// assert_eq!((w, h), (640, 360)); // Letterboxed
/// ```
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (max_w.max(1), max_h.max(1));
    }
    let (sw, sh, mw, mh) = (src_w as u128, src_h as u128, max_w as u128, max_h as u128);
    // Width-limited when max_w / src_w <= max_h / src_h
    let (w, h) = if mw * sh <= mh * sw {
        (mw, (sh * mw * 2 + sw) / (sw * 2))
    } else {
        ((sw * mh * 2 + sh) / (sh * 2), mh)
    };
    (w.max(1) as u32, h.max(1) as u32)
}

fn effective_filter(width: u32, height: u32, dst_width: u32, dst_height: u32, filter: FilterMode) -> FilterMode {
    let beyond_2x = |src: u32, dst: u32| src as u64 > dst as u64 * 2;
    if filter == FilterMode::None && (beyond_2x(width, dst_width) || beyond_2x(height, dst_height)) {
        debug!(width, height, dst_width, dst_height, "downscale beyond 2x, using box filter");
        return FilterMode::Box;
    }
    filter
}

/// Interpolation tap along one axis: `i0 * (1 - f) + i1 * f`, `f` in 16.16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tap {
    i0: usize,
    i1: usize,
    f: u64,
}

/// Nearest taps: destination center mapped back to the source, floored.
fn nearest_taps(src: usize, dst: usize) -> Vec<Tap> {
    (0..dst)
        .map(|d| {
            let i = ((2 * d + 1) * src / (2 * dst)).min(src - 1);
            Tap { i0: i, i1: i, f: 0 }
        })
        .collect()
}

/// Linear taps with center alignment, clamped at the edges.
fn linear_taps(src: usize, dst: usize) -> Vec<Tap> {
    let last = (src as u64 - 1) * ONE;
    (0..dst)
        .map(|d| {
            let center = ((2 * d as u64 + 1) * src as u64 * ONE) / (2 * dst as u64);
            let pos = center.saturating_sub(ONE / 2).min(last);
            let i0 = (pos >> 16) as usize;
            Tap {
                i0,
                i1: (i0 + 1).min(src - 1),
                f: pos & (ONE - 1),
            }
        })
        .collect()
}

/// Box taps: every source sample overlapping the destination footprint with
/// its overlap length, in units where the source spans `src * dst`.
fn box_taps(src: usize, dst: usize) -> Vec<Vec<(usize, u64)>> {
    (0..dst)
        .map(|d| {
            let (lo, hi) = (d * src, (d + 1) * src);
            (lo / dst..hi.div_ceil(dst).min(src))
                .filter_map(|i| {
                    let overlap = hi.min((i + 1) * dst).saturating_sub(lo.max(i * dst));
                    (overlap > 0).then_some((i, overlap as u64))
                })
                .collect()
        })
        .collect()
}

fn scale_plane(
    src: &Plane,
    bpe: usize,
    (src_cols, src_rows): (usize, usize),
    (dst_cols, dst_rows): (usize, usize),
    filter: FilterMode,
) -> Plane {
    let stride = dst_cols * bpe;
    let mut data = vec![0u8; stride * dst_rows];
    let (sdata, sstride) = (src.data(), src.stride());
    let at = |x: usize, y: usize, c: usize| sdata[y * sstride + x * bpe + c] as u64;

    if filter == FilterMode::Box {
        let xs = box_taps(src_cols, dst_cols);
        let ys = box_taps(src_rows, dst_rows);
        let total = (src_cols * src_rows) as u64;
        for_each_row(&mut data, stride, |dy, row| {
            for (dx, taps_x) in xs.iter().enumerate() {
                for c in 0..bpe {
                    let mut sum = 0u64;
                    for &(sy, wy) in &ys[dy] {
                        for &(sx, wx) in taps_x {
                            sum += at(sx, sy, c) * wx * wy;
                        }
                    }
                    row[dx * bpe + c] = ((sum + total / 2) / total) as u8;
                }
            }
        });
        return Plane::new(data, stride, dst_rows);
    }

    let (xs, ys) = match filter {
        FilterMode::Bilinear => (linear_taps(src_cols, dst_cols), linear_taps(src_rows, dst_rows)),
        FilterMode::Linear => (linear_taps(src_cols, dst_cols), nearest_taps(src_rows, dst_rows)),
        _ => (nearest_taps(src_cols, dst_cols), nearest_taps(src_rows, dst_rows)),
    };
    for_each_row(&mut data, stride, |dy, row| {
        let ty = ys[dy];
        for (dx, tx) in xs.iter().enumerate() {
            for c in 0..bpe {
                let top = at(tx.i0, ty.i0, c) * (ONE - tx.f) + at(tx.i1, ty.i0, c) * tx.f;
                let bottom = at(tx.i0, ty.i1, c) * (ONE - tx.f) + at(tx.i1, ty.i1, c) * tx.f;
                let v = (top * (ONE - ty.f) + bottom * ty.f + (1 << 31)) >> 32;
                row[dx * bpe + c] = v as u8;
            }
        }
    });
    Plane::new(data, stride, dst_rows)
}
