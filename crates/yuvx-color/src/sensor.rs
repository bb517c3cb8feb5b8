//! Ingest of borrowed camera sensor planes.
//!
//! Camera HALs deliver 4:2:0 frames as three separate planes. The chroma
//! planes carry a *pixel stride*: 1 when U and V are fully planar, 2 when
//! they are views into one interleaved buffer (NV12/NV21 memory). A
//! [`SensorFrame`] borrows those planes as delivered, and
//! [`sensor_to_canonical`] turns them into an upright I420 frame without an
//! intermediate copy.
//!
//! # Example
//!
//! ```rust
//! use yuvx_color::{sensor_to_canonical, SensorFrame};
//! use yuvx_core::Rotation;
//!
//! // 4x2 frame, interleaved VU memory exposed as two views
//! let y = [16u8; 8];
//! let vu = [200u8, 100, 201, 101];
//! let frame = SensorFrame {
//!     width: 4,
//!     height: 2,
//!     y: &y,
//!     y_stride: 4,
//!     u: &vu[1..],
//!     u_stride: 4,
//!     v: &vu,
//!     v_stride: 4,
//!     uv_pixel_stride: 2,
//! };
//!
//! let i420 = sensor_to_canonical(&frame, Rotation::Rotate90).unwrap();
//! assert_eq!(i420.dimensions(), (2, 4));
//! ```

use crate::convert::{build_canonical, Converter};
use crate::sample::{ChannelReader, PixelSource};
use tracing::trace;
use yuvx_core::{Error, FrameBuffer, Result, Rotation};

/// Three borrowed 4:2:0 planes as delivered by a camera.
#[derive(Debug, Clone, Copy)]
pub struct SensorFrame<'a> {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Luma plane.
    pub y: &'a [u8],
    /// Bytes between luma rows.
    pub y_stride: usize,
    /// U plane, first sample at index 0.
    pub u: &'a [u8],
    /// Bytes between U rows.
    pub u_stride: usize,
    /// V plane, first sample at index 0.
    pub v: &'a [u8],
    /// Bytes between V rows.
    pub v_stride: usize,
    /// Bytes between consecutive chroma samples in a row (1 or 2).
    pub uv_pixel_stride: usize,
}

impl SensorFrame<'_> {
    /// Checks that every plane can hold the samples the dimensions imply.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for a zero width or height
    /// - [`Error::DimensionMismatch`] for a zero pixel stride, a row stride
    ///   shorter than a row, or a plane shorter than
    ///   `stride * (rows - 1) + step * (columns - 1) + 1`
    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
        }
        let mismatch = |reason: String| Error::dimension_mismatch("sensor 4:2:0", width, height, reason);
        if self.uv_pixel_stride == 0 {
            return Err(mismatch("chroma pixel stride must be > 0".into()));
        }

        let (cols, rows) = (width as usize, height as usize);
        let (ccols, crows) = (cols.div_ceil(2), rows.div_ceil(2));
        let planes = [
            ("Y", self.y, self.y_stride, 1, cols, rows),
            ("U", self.u, self.u_stride, self.uv_pixel_stride, ccols, crows),
            ("V", self.v, self.v_stride, self.uv_pixel_stride, ccols, crows),
        ];
        for (name, data, stride, step, cols, rows) in planes {
            let row_span = step * (cols - 1) + 1;
            if stride < row_span {
                return Err(mismatch(format!("{name} stride {stride} < row span {row_span}")));
            }
            let needed = stride * (rows - 1) + row_span;
            if data.len() < needed {
                return Err(mismatch(format!("{name} plane has {} bytes, needs {needed}", data.len())));
            }
        }
        Ok(())
    }
}

impl Converter {
    /// Converts borrowed sensor planes to I420, rotating in the same pass.
    ///
    /// # Errors
    ///
    /// See [`SensorFrame::validate`].
    pub fn sensor_to_canonical(&self, frame: &SensorFrame<'_>, rotation: Rotation) -> Result<FrameBuffer> {
        trace!(
            width = frame.width,
            height = frame.height,
            pixel_stride = frame.uv_pixel_stride,
            %rotation,
            "sensor_to_canonical"
        );
        frame.validate()?;
        let step = frame.uv_pixel_stride;
        let source = PixelSource::Yuv {
            y: ChannelReader::new(frame.y, 0, frame.y_stride, 1, (1, 1)),
            chroma: Some((
                ChannelReader::new(frame.u, 0, frame.u_stride, step, (2, 2)),
                ChannelReader::new(frame.v, 0, frame.v_stride, step, (2, 2)),
            )),
        };
        build_canonical(&source, frame.width, frame.height, rotation, self.options().range)
    }
}

/// Converts borrowed sensor planes to I420 with default options.
///
/// See [`Converter::sensor_to_canonical`].
pub fn sensor_to_canonical(frame: &SensorFrame<'_>, rotation: Rotation) -> Result<FrameBuffer> {
    Converter::default().sensor_to_canonical(frame, rotation)
}
