//! Geometric transformation operations.
//!
//! Provides rotate, mirror, vertical flip and crop for frames in any
//! registered format. Every operation returns a new, tightly strided frame
//! in the source format.
//!
//! # Operations
//!
//! - [`rotate`] - Clockwise quarter turns
//! - [`mirror`] - Horizontal flip
//! - [`flip_v`] - Vertical flip
//! - [`crop`] - Extract a region, aligned to the chroma grid
//!
//! Planes are transformed independently, each in its own subsampled
//! coordinate space. Layouts where that does not work go through I420 and
//! back:
//!
//! - YUY2/UYVY pack two pixels per element. At even widths mirror and 180
//!   reverse the elements and swap their luma bytes; odd widths and quarter
//!   turns go via the canonical format
//! - I422 chroma is subsampled horizontally only; a quarter turn would need
//!   vertical subsampling, so 90/270 go via the canonical format
//!
//! # Example
//!
//! ```rust
//! use yuvx_core::{FrameBuffer, PixelFormat, Rect, Rotation};
//! use yuvx_ops::transform::{crop, mirror, rotate};
//!
//! let src = FrameBuffer::alloc(PixelFormat::I420, 64, 48).unwrap();
//!
//! let turned = rotate(&src, Rotation::Rotate90).unwrap();
//! assert_eq!(turned.dimensions(), (48, 64));
//!
//! let flipped = mirror(&src).unwrap();
//! assert_eq!(flipped.dimensions(), (64, 48));
//!
//! // Odd origin snaps to the 2x2 chroma grid
//! let (cropped, applied) = crop(&src, Rect::new(3, 5, 16, 16)).unwrap();
//! assert_eq!(applied, Rect::new(2, 4, 16, 16));
//! assert_eq!(cropped.dimensions(), (16, 16));
//! ```

use tracing::{debug, trace};
use yuvx_color::{from_canonical, to_canonical};
use yuvx_core::parallel::for_each_row;
use yuvx_core::{Channel, FormatDesc, FrameBuffer, Plane, Rect, Result, Rotation};

/// Rotates a frame clockwise.
///
/// 90 and 270 swap width and height. `Rotate0` returns a tight copy.
///
/// # Example
///
/// ```rust
/// use yuvx_core::{FrameBuffer, PixelFormat, Rotation};
/// use yuvx_ops::transform::rotate;
///
/// // 2x1 RAW: red, blue
/// let src = FrameBuffer::from_bytes(PixelFormat::Raw, 2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
/// let out = rotate(&src, Rotation::Rotate90).unwrap();
/// assert_eq!(out.dimensions(), (1, 2));
/// assert_eq!(out.to_bytes(), vec![255, 0, 0, 0, 0, 255]);
/// ```
pub fn rotate(src: &FrameBuffer, rotation: Rotation) -> Result<FrameBuffer> {
    trace!(format = %src.format(), width = src.width(), height = src.height(), %rotation, "rotate");
    if rotation == Rotation::Rotate0 {
        return Ok(src.to_tight());
    }

    let desc = src.desc();
    if rotation == Rotation::Rotate180 && src.width() % 2 == 0 {
        if let Some(pair) = packed_luma_pair(desc) {
            return flip_v(&mirror_packed(src, pair)?);
        }
    }
    let native = desc.is_element_addressable() && (!rotation.swaps_dimensions() || desc.is_square_subsampled());
    if !native {
        debug!(format = %src.format(), %rotation, "rotating through canonical format");
        let canonical = to_canonical(src, rotation)?;
        return from_canonical(&canonical, src.format());
    }

    let (width, height) = src.dimensions();
    let (out_w, out_h) = rotation.output_dimensions(width, height);
    let planes = desc
        .planes
        .iter()
        .zip(src.planes())
        .map(|(pd, plane)| {
            let (cols, rows) = (pd.columns(width), pd.rows(height));
            remap_plane(
                plane,
                pd.bytes_per_element as usize,
                pd.columns(out_w),
                pd.rows(out_h),
                |dx, dy| rotation.source_coords(dx, dy, cols, rows),
            )
        })
        .collect();
    FrameBuffer::new(src.format(), out_w, out_h, planes)
}

/// Flips a frame horizontally (left-right mirror).
///
/// # Example
///
/// ```rust
/// use yuvx_core::{FrameBuffer, PixelFormat};
/// use yuvx_ops::transform::mirror;
///
/// let src = FrameBuffer::from_bytes(PixelFormat::I400, 3, 1, &[1, 2, 3]).unwrap();
/// assert_eq!(mirror(&src).unwrap().to_bytes(), vec![3, 2, 1]);
/// ```
pub fn mirror(src: &FrameBuffer) -> Result<FrameBuffer> {
    trace!(format = %src.format(), width = src.width(), height = src.height(), "mirror");
    let desc = src.desc();
    if !desc.is_element_addressable() {
        if let Some(pair) = packed_luma_pair(desc).filter(|_| src.width() % 2 == 0) {
            return mirror_packed(src, pair);
        }
        debug!(format = %src.format(), width = src.width(), "mirroring through canonical format");
        let canonical = mirror(&to_canonical(src, Rotation::Rotate0)?)?;
        return from_canonical(&canonical, src.format());
    }

    let (width, height) = src.dimensions();
    let planes = desc
        .planes
        .iter()
        .zip(src.planes())
        .map(|(pd, plane)| {
            let (cols, rows) = (pd.columns(width), pd.rows(height));
            remap_plane(plane, pd.bytes_per_element as usize, cols, rows, |dx, dy| (cols - 1 - dx, dy))
        })
        .collect();
    FrameBuffer::new(src.format(), width, height, planes)
}

/// Flips a frame vertically (top-bottom mirror).
///
/// Whole rows move, so this works natively for every format.
pub fn flip_v(src: &FrameBuffer) -> Result<FrameBuffer> {
    trace!(format = %src.format(), width = src.width(), height = src.height(), "flip_v");
    let (width, height) = src.dimensions();
    let planes = src
        .desc()
        .planes
        .iter()
        .zip(src.planes())
        .map(|(pd, plane)| {
            let row_bytes = pd.row_bytes(width);
            let rows = plane.rows();
            let mut data = vec![0u8; row_bytes * rows];
            for_each_row(&mut data, row_bytes, |dy, row| {
                row.copy_from_slice(&plane.row(rows - 1 - dy)[..row_bytes]);
            });
            Plane::new(data, row_bytes, rows)
        })
        .collect();
    FrameBuffer::new(src.format(), width, height, planes)
}

/// Crops a region from the frame.
///
/// The origin is rounded down to the format's alignment (the largest plane
/// subsampling on each axis) so every plane starts on a whole element;
/// width and height are kept. Returns the frame and the rectangle actually
/// applied.
///
/// # Errors
///
/// [`Error::InvalidRectangle`](yuvx_core::Error::InvalidRectangle) if `rect`
/// is empty or extends beyond the source.
///
/// # Example
///
/// ```rust
/// use yuvx_core::{FrameBuffer, PixelFormat, Rect};
/// use yuvx_ops::transform::crop;
///
/// let src = FrameBuffer::alloc(PixelFormat::I420, 100, 100).unwrap();
/// let (out, applied) = crop(&src, Rect::new(1, 1, 10, 10)).unwrap();
/// assert_eq!(applied, Rect::new(0, 0, 10, 10));
/// assert_eq!(out.dimensions(), (10, 10));
///
/// assert!(crop(&src, Rect::new(90, 10, 20, 20)).is_err());
/// ```
pub fn crop(src: &FrameBuffer, rect: Rect) -> Result<(FrameBuffer, Rect)> {
    trace!(format = %src.format(), width = src.width(), height = src.height(), %rect, "crop");
    rect.validate(src.width(), src.height())?;

    let desc = src.desc();
    let (ax, ay) = desc.alignment();
    let applied = rect.align_origin(ax, ay);
    if applied != rect {
        debug!(requested = %rect, applied = %applied, "crop origin aligned to chroma grid");
    }

    let planes = desc
        .planes
        .iter()
        .zip(src.planes())
        .map(|(pd, plane)| {
            let bpe = pd.bytes_per_element as usize;
            let x0 = (applied.x / pd.subsample_x as u32) as usize * bpe;
            let y0 = (applied.y / pd.subsample_y as u32) as usize;
            let row_bytes = pd.row_bytes(applied.width);
            let rows = pd.rows(applied.height);
            let mut data = vec![0u8; row_bytes * rows];
            for_each_row(&mut data, row_bytes, |dy, row| {
                row.copy_from_slice(&plane.row(y0 + dy)[x0..x0 + row_bytes]);
            });
            Plane::new(data, row_bytes, rows)
        })
        .collect();
    let out = FrameBuffer::new(src.format(), applied.width, applied.height, planes)?;
    Ok((out, applied))
}

/// Byte offsets of the two luma samples inside a packed 4:2:2 element
/// (`(0, 2)` for YUY2, `(1, 3)` for UYVY).
fn packed_luma_pair(desc: &FormatDesc) -> Option<(usize, usize)> {
    if desc.plane_count() != 1 || desc.planes[0].subsample_x != 2 {
        return None;
    }
    let y = desc.component(Channel::Y)?;
    (y.subsample_x == 1).then(|| (y.offset as usize, (y.offset + y.step) as usize))
}

/// Mirrors an even-width packed 4:2:2 frame: elements reverse order and the
/// luma bytes inside each element swap. Chroma is untouched.
fn mirror_packed(src: &FrameBuffer, (first, second): (usize, usize)) -> Result<FrameBuffer> {
    let pd = &src.desc().planes[0];
    let plane = src.plane(0);
    let bpe = pd.bytes_per_element as usize;
    let cols = pd.columns(src.width());
    let rows = plane.rows();
    let stride = cols * bpe;
    let mut data = vec![0u8; stride * rows];
    for_each_row(&mut data, stride, |dy, row| {
        let src_row = plane.row(dy);
        for (dx, out) in row.chunks_exact_mut(bpe).enumerate() {
            let sx = cols - 1 - dx;
            out.copy_from_slice(&src_row[sx * bpe..(sx + 1) * bpe]);
            out.swap(first, second);
        }
    });
    FrameBuffer::new(src.format(), src.width(), src.height(), vec![Plane::new(data, stride, rows)])
}

/// Builds a `cols x rows` plane of `bpe`-byte elements, taking element
/// `(dx, dy)` from `source_of(dx, dy)` in `src`.
fn remap_plane<F>(src: &Plane, bpe: usize, cols: usize, rows: usize, source_of: F) -> Plane
where
    F: Fn(usize, usize) -> (usize, usize) + Send + Sync,
{
    let stride = cols * bpe;
    let mut data = vec![0u8; stride * rows];
    for_each_row(&mut data, stride, |dy, row| {
        for (dx, out) in row.chunks_exact_mut(bpe).enumerate() {
            let (sx, sy) = source_of(dx, dy);
            let start = sy * src.stride() + sx * bpe;
            out.copy_from_slice(&src.data()[start..start + bpe]);
        }
    });
    Plane::new(data, stride, rows)
}
