//! Format conversion through the canonical I420 format.
//!
//! Every registered format converts *to* I420 and *from* I420. Any other
//! pair routes through it:
//!
//! ```text
//! NV21 ──to_canonical──► I420 ──from_canonical──► ABGR
//!              (+ rotate, + crop)
//! ```
//!
//! Ingest fuses rotation and cropping into the same pass, since camera
//! frames almost always need both before display.
//!
//! # Chroma rules
//!
//! - 4:2:0 sources keep their chroma samples; rotation remaps the chroma grid
//!   the same way it remaps luma.
//! - RGB sources: U/V of each 2x2 output block come from the average of the
//!   block's RGB values.
//! - Other YUV sources average the chroma covering the block's pixels.
//! - Toward denser targets (I422, I444, packed, RGB) chroma is upsampled by
//!   replication or by center-sited bilinear interpolation, see
//!   [`ChromaUpsampling`].
//!
//! # Example
//!
//! ```rust
//! use yuvx_color::{convert, to_canonical, Converter, ChromaUpsampling, YuvRange};
//! use yuvx_core::{FrameBuffer, PixelFormat, Rotation};
//!
//! let nv21 = FrameBuffer::alloc(PixelFormat::Nv21, 640, 480).unwrap();
//!
//! let upright = to_canonical(&nv21, Rotation::Rotate90).unwrap();
//! assert_eq!(upright.dimensions(), (480, 640));
//!
//! let rgba = convert(&upright, PixelFormat::Abgr).unwrap();
//! assert_eq!(rgba.format(), PixelFormat::Abgr);
//!
//! let smooth = Converter::new()
//!     .with_range(YuvRange::Full)
//!     .with_upsampling(ChromaUpsampling::Bilinear);
//! let _ = smooth.from_canonical(&upright, PixelFormat::I444).unwrap();
//! ```

use crate::bt601::{self, YuvRange};
use crate::sample::PixelSource;
use tracing::{debug, trace};
use yuvx_core::parallel::{for_each_row, for_each_row_pair};
use yuvx_core::{Channel, Error, Family, FrameBuffer, PixelFormat, Plane, Rect, Result, Rotation};

/// How 4:2:0 chroma is expanded for denser targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChromaUpsampling {
    /// Each chroma sample covers its whole 2x2 block.
    #[default]
    Nearest,
    /// Interpolate between chroma sample centers.
    Bilinear,
}

/// Conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertOptions {
    /// YUV quantization range used for YUV <-> RGB.
    pub range: YuvRange,
    /// Chroma upsampling used by [`Converter::from_canonical`].
    pub upsampling: ChromaUpsampling,
}

/// Format converter carrying [`ConvertOptions`].
///
/// Stateless apart from its options; share freely across threads. The
/// free functions in this module use `Converter::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Converter with default options (limited range, nearest upsampling).
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter with the given options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Sets the YUV range.
    pub fn with_range(mut self, range: YuvRange) -> Self {
        self.options.range = range;
        self
    }

    /// Sets the chroma upsampling mode.
    pub fn with_upsampling(mut self, upsampling: ChromaUpsampling) -> Self {
        self.options.upsampling = upsampling;
        self
    }

    /// Current options.
    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Converts any registered format to I420, rotating in the same pass.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] if the source format has no luma or RGB
    /// channels to read.
    pub fn to_canonical(&self, src: &FrameBuffer, rotation: Rotation) -> Result<FrameBuffer> {
        trace!(format = %src.format(), width = src.width(), height = src.height(), %rotation, "to_canonical");
        let source = pixel_source(src, 0, 0)?;
        build_canonical(&source, src.width(), src.height(), rotation, self.options.range)
    }

    /// Crops, rotates and converts to I420 in one pass.
    ///
    /// The rectangle origin is rounded down to the source format's
    /// alignment (see [`FormatDesc::alignment`](yuvx_core::FormatDesc::alignment));
    /// width and height are kept. Returns the rectangle actually applied.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRectangle`] if `rect` is empty or exceeds the source
    /// - [`Error::UnsupportedFormat`] as for [`Converter::to_canonical`]
    pub fn to_canonical_region(
        &self,
        src: &FrameBuffer,
        rect: Rect,
        rotation: Rotation,
    ) -> Result<(FrameBuffer, Rect)> {
        trace!(format = %src.format(), width = src.width(), height = src.height(), %rect, %rotation, "to_canonical_region");
        rect.validate(src.width(), src.height())?;
        let (ax, ay) = src.desc().alignment();
        let applied = rect.align_origin(ax, ay);
        if applied != rect {
            debug!(requested = %rect, applied = %applied, "crop origin aligned to chroma grid");
        }
        let source = pixel_source(src, applied.x, applied.y)?;
        let out = build_canonical(&source, applied.width, applied.height, rotation, self.options.range)?;
        Ok((out, applied))
    }

    /// Converts an I420 frame to `target`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] if `src` is not I420.
    pub fn from_canonical(&self, src: &FrameBuffer, target: PixelFormat) -> Result<FrameBuffer> {
        trace!(width = src.width(), height = src.height(), %target, "from_canonical");
        if !src.format().is_canonical() {
            return Err(Error::unsupported_format(format!(
                "{} (expected {} source)",
                src.format(),
                PixelFormat::CANONICAL
            )));
        }
        if target.is_canonical() {
            return Ok(src.to_tight());
        }
        match target.desc().family {
            Family::Yuv => self.canonical_to_yuv(src, target),
            Family::Rgb => self.canonical_to_rgb(src, target),
        }
    }

    /// Converts between any two registered formats.
    ///
    /// Same format copies; a canonical source or target converts directly;
    /// anything else goes through I420.
    pub fn convert(&self, src: &FrameBuffer, target: PixelFormat) -> Result<FrameBuffer> {
        trace!(from = %src.format(), to = %target, width = src.width(), height = src.height(), "convert");
        if src.format() == target {
            return Ok(src.to_tight());
        }
        if src.format().is_canonical() {
            return self.from_canonical(src, target);
        }
        if target.is_canonical() {
            return self.to_canonical(src, Rotation::Rotate0);
        }
        debug!(from = %src.format(), to = %target, "routing through {}", PixelFormat::CANONICAL);
        let canonical = self.to_canonical(src, Rotation::Rotate0)?;
        self.from_canonical(&canonical, target)
    }

    fn canonical_to_yuv(&self, src: &FrameBuffer, target: PixelFormat) -> Result<FrameBuffer> {
        let desc = target.desc();
        let (width, height) = src.dimensions();
        let luma = src.plane(0);
        let u = ChromaGrid::new(src, 1);
        let v = ChromaGrid::new(src, 2);
        let mode = self.options.upsampling;

        let mut planes = Vec::with_capacity(desc.plane_count());
        for (p, pd) in desc.planes.iter().enumerate() {
            let stride = pd.row_bytes(width);
            let rows = pd.rows(height);
            let mut data = vec![0u8; stride * rows];
            for_each_row(&mut data, stride, |gy, row| {
                for c in desc.components.iter().filter(|c| c.plane as usize == p) {
                    let per_element = (pd.subsample_x / c.subsample_x) as usize;
                    let last = c.columns(width) - 1;
                    let ss = (c.subsample_x as usize, c.subsample_y as usize);
                    let (step, offset) = (c.step as usize, c.offset as usize);
                    for gx in 0..pd.columns(width) * per_element {
                        // Trailing slot of an odd-width packed row repeats the last sample
                        let sx = gx.min(last);
                        row[gx * step + offset] = match c.channel {
                            Channel::Y => luma.row(gy)[sx],
                            Channel::U => u.sample(sx, gy, ss, mode),
                            _ => v.sample(sx, gy, ss, mode),
                        };
                    }
                }
            });
            planes.push(Plane::new(data, stride, rows));
        }
        FrameBuffer::new(target, width, height, planes)
    }

    fn canonical_to_rgb(&self, src: &FrameBuffer, target: PixelFormat) -> Result<FrameBuffer> {
        let desc = target.desc();
        let (width, height) = src.dimensions();
        let luma = src.plane(0);
        let u = ChromaGrid::new(src, 1);
        let v = ChromaGrid::new(src, 2);
        let ConvertOptions { range, upsampling } = self.options;

        let pd = &desc.planes[0];
        let stride = pd.row_bytes(width);
        let rows = pd.rows(height);
        let mut data = vec![0u8; stride * rows];
        for_each_row(&mut data, stride, |y, row| {
            let luma_row = luma.row(y);
            for x in 0..width as usize {
                let cu = u.sample(x, y, (1, 1), upsampling);
                let cv = v.sample(x, y, (1, 1), upsampling);
                let rgb = bt601::yuv_to_rgb(range, luma_row[x], cu, cv);
                for c in desc.components {
                    row[x * c.step as usize + c.offset as usize] = match c.channel {
                        Channel::R => rgb[0],
                        Channel::G => rgb[1],
                        Channel::B => rgb[2],
                        _ => 255,
                    };
                }
            }
        });
        FrameBuffer::new(target, width, height, vec![Plane::new(data, stride, rows)])
    }
}

/// Converts any registered format to I420 with default options.
///
/// See [`Converter::to_canonical`].
pub fn to_canonical(src: &FrameBuffer, rotation: Rotation) -> Result<FrameBuffer> {
    Converter::default().to_canonical(src, rotation)
}

/// Fused crop, rotate and convert to I420 with default options.
///
/// See [`Converter::to_canonical_region`].
pub fn to_canonical_region(src: &FrameBuffer, rect: Rect, rotation: Rotation) -> Result<(FrameBuffer, Rect)> {
    Converter::default().to_canonical_region(src, rect, rotation)
}

/// Converts an I420 frame to `target` with default options.
///
/// See [`Converter::from_canonical`].
pub fn from_canonical(src: &FrameBuffer, target: PixelFormat) -> Result<FrameBuffer> {
    Converter::default().from_canonical(src, target)
}

/// Converts between any two registered formats with default options.
///
/// See [`Converter::convert`].
pub fn convert(src: &FrameBuffer, target: PixelFormat) -> Result<FrameBuffer> {
    Converter::default().convert(src, target)
}

fn pixel_source(src: &FrameBuffer, origin_x: u32, origin_y: u32) -> Result<PixelSource<'_>> {
    PixelSource::from_frame(src, origin_x, origin_y).ok_or_else(|| Error::unsupported_format(src.format().to_string()))
}

/// Builds a rotated I420 frame from a `width x height` source.
pub(crate) fn build_canonical(
    source: &PixelSource<'_>,
    width: u32,
    height: u32,
    rotation: Rotation,
    range: YuvRange,
) -> Result<FrameBuffer> {
    let (w, h) = (width as usize, height as usize);
    let (out_w, out_h) = rotation.output_dimensions(width, height);
    let (dw, dh) = (out_w as usize, out_h as usize);
    let chroma = &PixelFormat::CANONICAL.desc().planes[1];
    let (cw, ch) = (chroma.columns(out_w), chroma.rows(out_h));

    let mut y_plane = vec![0u8; dw * dh];
    for_each_row(&mut y_plane, dw, |dy, row| {
        for (dx, out) in row.iter_mut().enumerate() {
            let (sx, sy) = rotation.source_coords(dx, dy, w, h);
            *out = source.luma(sx, sy, range);
        }
    });

    let mut u_plane = vec![0u8; cw * ch];
    let mut v_plane = vec![0u8; cw * ch];
    if source.has_420_chroma() {
        let (src_cw, src_ch) = (w.div_ceil(2), h.div_ceil(2));
        for_each_row_pair(&mut u_plane, cw, &mut v_plane, cw, |cy, u_row, v_row| {
            for cx in 0..cw {
                let (sx, sy) = rotation.source_coords(cx, cy, src_cw, src_ch);
                (u_row[cx], v_row[cx]) = source.chroma_420(sx, sy);
            }
        });
    } else {
        for_each_row_pair(&mut u_plane, cw, &mut v_plane, cw, |cy, u_row, v_row| {
            let mut block = [(0usize, 0usize); 4];
            for cx in 0..cw {
                let mut n = 0;
                for dy in 2 * cy..(2 * cy + 2).min(dh) {
                    for dx in 2 * cx..(2 * cx + 2).min(dw) {
                        block[n] = rotation.source_coords(dx, dy, w, h);
                        n += 1;
                    }
                }
                (u_row[cx], v_row[cx]) = source.chroma_average(&block[..n], range);
            }
        });
    }

    FrameBuffer::new(
        PixelFormat::CANONICAL,
        out_w,
        out_h,
        vec![
            Plane::new(y_plane, dw, dh),
            Plane::new(u_plane, cw, ch),
            Plane::new(v_plane, cw, ch),
        ],
    )
}

/// One 4:2:0 chroma plane of an I420 frame, sampled for denser targets.
struct ChromaGrid<'a> {
    data: &'a [u8],
    stride: usize,
    columns: usize,
    rows: usize,
}

impl<'a> ChromaGrid<'a> {
    fn new(frame: &'a FrameBuffer, plane: usize) -> Self {
        let pd = &frame.desc().planes[plane];
        let p = frame.plane(plane);
        Self {
            data: p.data(),
            stride: p.stride(),
            columns: pd.columns(frame.width()),
            rows: p.rows(),
        }
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.stride + x] as u32
    }

    /// Chroma for sample `(gx, gy)` of a target grid subsampled by `ss`.
    fn sample(&self, gx: usize, gy: usize, ss: (usize, usize), mode: ChromaUpsampling) -> u8 {
        let (x0, x1, fx) = upsample_axis(gx, ss.0, self.columns, mode);
        let (y0, y1, fy) = upsample_axis(gy, ss.1, self.rows, mode);
        if fx == 0 && fy == 0 {
            return self.at(x0, y0) as u8;
        }
        let top = (4 - fx) * self.at(x0, y0) + fx * self.at(x1, y0);
        let bottom = (4 - fx) * self.at(x0, y1) + fx * self.at(x1, y1);
        (((4 - fy) * top + fy * bottom + 8) >> 4) as u8
    }
}

/// Source index pair and weight (in quarters) along one axis.
///
/// A target sample `g` with subsampling `ss` is centered at luma position
/// `(g + 0.5) * ss`, which is chroma position `(2g + 1) * ss / 4 - 0.5`.
#[inline]
fn upsample_axis(g: usize, ss: usize, n: usize, mode: ChromaUpsampling) -> (usize, usize, u32) {
    let last = n - 1;
    match mode {
        ChromaUpsampling::Nearest => {
            let i = (g * ss / 2).min(last);
            (i, i, 0)
        }
        ChromaUpsampling::Bilinear => {
            let q = ((2 * g + 1) * ss).saturating_sub(2).min(4 * last);
            let i0 = q / 4;
            (i0, (i0 + 1).min(last), (q % 4) as u32)
        }
    }
}
