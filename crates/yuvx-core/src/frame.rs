//! Frame buffers: planes of bytes plus the format that gives them meaning.
//!
//! A [`FrameBuffer`] owns one [`Plane`] per plane of its [`PixelFormat`].
//! Construction validates the layout against the format descriptor, so
//! every engine can index planes without further bounds reasoning.
//! Buffers are read-only once built; every operation returns a new one.
//!
//! # Usage
//!
//! ```rust
//! use yuvx_core::{Channel, FrameBuffer, PixelFormat};
//!
//! // A 4x2 I420 frame as one contiguous array: 8 luma + 2 U + 2 V
//! let bytes: Vec<u8> = (0..12).collect();
//! let frame = FrameBuffer::from_bytes(PixelFormat::I420, 4, 2, &bytes).unwrap();
//!
//! assert_eq!(frame.plane(1).row(0), &[8, 9]);
//! assert_eq!(frame.sample(Channel::V, 3, 1), Some(11));
//! assert_eq!(frame.to_bytes(), bytes);
//! ```

use crate::format::{Channel, FormatDesc, PixelFormat};
use crate::{Error, Result};
use std::fmt;

/// One plane of a frame.
///
/// `rows` rows of `stride` bytes each. The first `row_bytes` of each row
/// carry data; the rest is padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Plane {
    data: Vec<u8>,
    stride: usize,
    rows: usize,
}

impl Plane {
    /// Creates a plane from raw storage.
    ///
    /// Checked against the format by [`FrameBuffer::new`], not here.
    pub fn new(data: Vec<u8>, stride: usize, rows: usize) -> Self {
        Self { data, stride, rows }
    }

    /// Creates a zeroed plane with no row padding.
    pub fn zeroed(row_bytes: usize, rows: usize) -> Self {
        Self::new(vec![0; row_bytes * rows], row_bytes, rows)
    }

    /// Bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Backing storage, including padding.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Row `y`, including padding.
    ///
    /// # Panics
    ///
    /// If `y >= rows`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.stride..(y + 1) * self.stride]
    }
}

impl fmt::Debug for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plane")
            .field("stride", &self.stride)
            .field("rows", &self.rows)
            .field("len", &self.data.len())
            .finish()
    }
}

/// An image in one of the registered pixel formats.
///
/// # Invariants
///
/// - `width > 0` and `height > 0`
/// - exactly `format.desc().plane_count()` planes
/// - each plane has `rows == ceil(height / subsample_y)`,
///   `stride >= row_bytes(width)` and `stride * rows <= data.len()`
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    planes: Vec<Plane>,
}

impl FrameBuffer {
    /// Builds a frame from planes, validating them against the format.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for a zero width or height
    /// - [`Error::DimensionMismatch`] for a wrong plane count or a plane
    ///   too small for its stride and rows
    pub fn new(format: PixelFormat, width: u32, height: u32, planes: Vec<Plane>) -> Result<Self> {
        let frame = Self {
            width,
            height,
            format,
            planes,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Allocates a zeroed frame with tight strides.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for a zero width or height.
    pub fn alloc(format: PixelFormat, width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        let planes = format
            .desc()
            .planes
            .iter()
            .map(|p| Plane::zeroed(p.row_bytes(width), p.rows(height)))
            .collect();
        Ok(Self {
            width,
            height,
            format,
            planes,
        })
    }

    /// Splits one contiguous array into planes.
    ///
    /// Planes are expected back to back with tight strides, in descriptor
    /// order. This is the layout Android and libyuv use for `byte[]`
    /// frames (for NV21, `width * height` luma bytes followed by the
    /// interleaved VU plane).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for a zero width or height
    /// - [`Error::DimensionMismatch`] if `bytes` is shorter than
    ///   [`FormatDesc::frame_size`]
    pub fn from_bytes(format: PixelFormat, width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        check_dimensions(width, height)?;
        let desc = format.desc();
        let needed = desc.frame_size(width, height);
        if bytes.len() < needed {
            return Err(Error::dimension_mismatch(
                desc.name,
                width,
                height,
                format!("need {needed} bytes, got {}", bytes.len()),
            ));
        }

        let mut offset = 0;
        let planes = desc
            .planes
            .iter()
            .map(|p| {
                let stride = p.row_bytes(width);
                let rows = p.rows(height);
                let plane = Plane::new(bytes[offset..offset + stride * rows].to_vec(), stride, rows);
                offset += stride * rows;
                plane
            })
            .collect();

        Ok(Self {
            width,
            height,
            format,
            planes,
        })
    }

    /// Concatenates all planes into one tight array, dropping row padding.
    ///
    /// Inverse of [`FrameBuffer::from_bytes`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let desc = self.desc();
        let mut out = Vec::with_capacity(desc.frame_size(self.width, self.height));
        for (plane, pd) in self.planes.iter().zip(desc.planes) {
            let row_bytes = pd.row_bytes(self.width);
            for y in 0..plane.rows {
                out.extend_from_slice(&plane.row(y)[..row_bytes]);
            }
        }
        out
    }

    /// Copy of this frame with row padding removed.
    pub fn to_tight(&self) -> FrameBuffer {
        let planes = self
            .planes
            .iter()
            .zip(self.desc().planes)
            .map(|(plane, pd)| {
                let row_bytes = pd.row_bytes(self.width);
                let mut data = Vec::with_capacity(row_bytes * plane.rows);
                for y in 0..plane.rows {
                    data.extend_from_slice(&plane.row(y)[..row_bytes]);
                }
                Plane::new(data, row_bytes, plane.rows)
            })
            .collect();
        Self {
            width: self.width,
            height: self.height,
            format: self.format,
            planes,
        }
    }

    /// Checks every layout invariant.
    ///
    /// # Errors
    ///
    /// See [`FrameBuffer::new`].
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        let desc = self.desc();
        let mismatch = |reason: String| Error::dimension_mismatch(desc.name, self.width, self.height, reason);

        if self.planes.len() != desc.plane_count() {
            return Err(mismatch(format!(
                "expected {} planes, got {}",
                desc.plane_count(),
                self.planes.len()
            )));
        }

        for (i, (plane, pd)) in self.planes.iter().zip(desc.planes).enumerate() {
            let row_bytes = pd.row_bytes(self.width);
            let rows = pd.rows(self.height);
            if plane.stride < row_bytes {
                return Err(mismatch(format!(
                    "plane {i}: stride {} < row bytes {row_bytes}",
                    plane.stride
                )));
            }
            if plane.rows != rows {
                return Err(mismatch(format!("plane {i}: {} rows, expected {rows}", plane.rows)));
            }
            let needed = plane
                .stride
                .checked_mul(plane.rows)
                .ok_or_else(|| mismatch(format!("plane {i}: stride {} * {} rows overflows", plane.stride, plane.rows)))?;
            if plane.data.len() < needed {
                return Err(mismatch(format!(
                    "plane {i}: {} bytes cannot hold {} rows of stride {}",
                    plane.data.len(),
                    plane.rows,
                    plane.stride
                )));
            }
        }
        Ok(())
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Format descriptor.
    #[inline]
    pub fn desc(&self) -> &'static FormatDesc {
        self.format.desc()
    }

    /// All planes, in descriptor order.
    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Plane `index`.
    ///
    /// # Panics
    ///
    /// If `index >= plane_count`.
    #[inline]
    pub fn plane(&self, index: usize) -> &Plane {
        &self.planes[index]
    }

    /// Reads `channel` at luma coordinates `(x, y)`.
    ///
    /// Returns `None` if the format has no such channel or the position is
    /// outside the frame. Subsampled channels return the sample covering
    /// the position.
    pub fn sample(&self, channel: Channel, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.desc().component(channel)?;
        let plane = &self.planes[c.plane as usize];
        plane.data.get(c.byte_index(x, y, plane.stride)).copied()
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("planes", &self.planes)
            .finish()
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_tight() {
        let frame = FrameBuffer::alloc(PixelFormat::Nv21, 5, 3).unwrap();
        assert_eq!(frame.planes().len(), 2);
        assert_eq!(frame.plane(0).stride(), 5);
        assert_eq!(frame.plane(0).rows(), 3);
        // ceil(5/2) elements of 2 bytes
        assert_eq!(frame.plane(1).stride(), 6);
        assert_eq!(frame.plane(1).rows(), 2);
        assert_eq!(frame.to_bytes().len(), PixelFormat::Nv21.desc().frame_size(5, 3));
    }

    #[test]
    fn test_alloc_zero() {
        let err = FrameBuffer::alloc(PixelFormat::I420, 0, 4).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_new_wrong_plane_count() {
        let planes = vec![Plane::zeroed(4, 4)];
        let err = FrameBuffer::new(PixelFormat::I420, 4, 4, planes).unwrap_err();
        assert!(err.is_layout_error());
        assert!(err.to_string().contains("expected 3 planes"));
    }

    #[test]
    fn test_new_short_stride() {
        let planes = vec![Plane::zeroed(6, 2)];
        let err = FrameBuffer::new(PixelFormat::Argb, 2, 2, planes).unwrap_err();
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_new_short_data() {
        let planes = vec![Plane::new(vec![0; 15], 8, 2)];
        let err = FrameBuffer::new(PixelFormat::Argb, 2, 2, planes).unwrap_err();
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_new_stride_overflow() {
        let planes = vec![Plane::new(Vec::new(), usize::MAX, 2)];
        let err = FrameBuffer::new(PixelFormat::I400, 1, 2, planes).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_new_padded_stride() {
        let planes = vec![Plane::new(vec![7; 2 * 12], 12, 2)];
        let frame = FrameBuffer::new(PixelFormat::Argb, 2, 2, planes).unwrap();
        assert_eq!(frame.plane(0).row(1).len(), 12);
        // Padding is dropped when flattening
        assert_eq!(frame.to_bytes().len(), 16);

        let tight = frame.to_tight();
        assert_eq!(tight.plane(0).stride(), 8);
        assert_eq!(tight.to_bytes(), frame.to_bytes());
    }

    #[test]
    fn test_from_bytes_too_short() {
        let err = FrameBuffer::from_bytes(PixelFormat::I420, 4, 4, &[0; 23]).unwrap_err();
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_sample_packed() {
        // ABGR memory order R, G, B, A
        let frame = FrameBuffer::from_bytes(PixelFormat::Abgr, 1, 1, &[10, 20, 30, 40]).unwrap();
        assert_eq!(frame.sample(Channel::R, 0, 0), Some(10));
        assert_eq!(frame.sample(Channel::B, 0, 0), Some(30));
        assert_eq!(frame.sample(Channel::A, 0, 0), Some(40));
        assert_eq!(frame.sample(Channel::Y, 0, 0), None);
        assert_eq!(frame.sample(Channel::R, 1, 0), None);
    }

    #[test]
    fn test_sample_nv21() {
        // 2x2: Y = 1..4, then V U
        let frame = FrameBuffer::from_bytes(PixelFormat::Nv21, 2, 2, &[1, 2, 3, 4, 200, 100]).unwrap();
        assert_eq!(frame.sample(Channel::Y, 1, 1), Some(4));
        assert_eq!(frame.sample(Channel::V, 1, 1), Some(200));
        assert_eq!(frame.sample(Channel::U, 0, 0), Some(100));
    }
}
