//! Pixel format registry.
//!
//! The set of supported layouts is closed and fixed at build time. Each
//! [`PixelFormat`] variant owns one static [`FormatDesc`] describing:
//!
//! - how many planes the format has and how each plane is subsampled
//!   ([`PlaneDesc`])
//! - where every channel's samples live inside those planes ([`Component`])
//!
//! Engines never branch on the variant for addressing; they read the
//! descriptor. Adding a layout means adding a table entry, not a code path.
//!
//! # Byte order
//!
//! Packed RGB names follow the libyuv FourCC convention, where the name
//! spells a little-endian 32-bit word. `ARGB` is therefore stored in
//! memory as `B, G, R, A`, and `ABGR` as `R, G, B, A`.
//!
//! # Usage
//!
//! ```rust
//! use yuvx_core::{describe, Channel, FourCc, PixelFormat};
//!
//! let desc = describe(FourCc::new(*b"NV21")).unwrap();
//! assert_eq!(desc.format, PixelFormat::Nv21);
//! assert_eq!(desc.plane_count(), 2);
//! assert_eq!(desc.chroma_subsampling(), (2, 2));
//!
//! // V comes first in the interleaved chroma plane
//! let v = desc.component(Channel::V).unwrap();
//! assert_eq!((v.plane, v.offset, v.step), (1, 0, 2));
//!
//! assert!(PixelFormat::Abgr.desc().has_alpha());
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Four-character code identifying a pixel format.
///
/// Packs into a `u32` little-endian, first character in the low byte, the
/// same way V4L2 and libyuv do.
///
/// # Example
///
/// ```rust
/// use yuvx_core::FourCc;
///
/// let cc = FourCc::new(*b"I420");
/// assert_eq!(FourCc::from_u32(cc.to_u32()), cc);
/// assert_eq!(cc.to_string(), "I420");
/// assert_eq!("RAW".parse::<FourCc>().unwrap(), FourCc::new(*b"RAW "));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// Creates a code from four bytes.
    #[inline]
    pub const fn new(code: [u8; 4]) -> Self {
        Self(code)
    }

    /// Packs the code into a little-endian `u32`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Unpacks a little-endian `u32` code.
    #[inline]
    pub const fn from_u32(code: u32) -> Self {
        Self(code.to_le_bytes())
    }

    /// Returns the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc(\"{self}\")")
    }
}

impl FromStr for FourCc {
    type Err = Error;

    /// Parses 1 to 4 ASCII characters, right-padding with spaces.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 || !s.is_ascii() {
            return Err(Error::unsupported_format(s));
        }
        let mut code = [b' '; 4];
        code[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(code))
    }
}

/// Color model of a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Luma plus color-difference channels.
    Yuv,
    /// Red, green, blue and optional alpha.
    Rgb,
}

/// How channels are distributed across planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// One plane per channel group (Y, U, V).
    Planar,
    /// Luma plane plus one interleaved chroma plane.
    SemiPlanar,
    /// All channels interleaved in a single plane.
    Packed,
}

/// A single channel of a pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Luma
    Y,
    /// Blue-difference chroma
    U,
    /// Red-difference chroma
    V,
    /// Red
    R,
    /// Green
    G,
    /// Blue
    B,
    /// Alpha
    A,
}

/// Geometry of one plane.
///
/// A plane is a grid of equally sized *elements*. For a `width x height`
/// frame the grid is `ceil(width / subsample_x)` columns by
/// `ceil(height / subsample_y)` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneDesc {
    /// Horizontal divisor applied to the frame width.
    pub subsample_x: u8,
    /// Vertical divisor applied to the frame height.
    pub subsample_y: u8,
    /// Bytes per grid element.
    pub bytes_per_element: u8,
}

impl PlaneDesc {
    const fn new(subsample_x: u8, subsample_y: u8, bytes_per_element: u8) -> Self {
        Self {
            subsample_x,
            subsample_y,
            bytes_per_element,
        }
    }

    /// Number of element columns for a frame of the given width.
    #[inline]
    pub const fn columns(&self, width: u32) -> usize {
        width.div_ceil(self.subsample_x as u32) as usize
    }

    /// Number of rows for a frame of the given height.
    #[inline]
    pub const fn rows(&self, height: u32) -> usize {
        height.div_ceil(self.subsample_y as u32) as usize
    }

    /// Logical bytes per row, excluding any stride padding.
    #[inline]
    pub const fn row_bytes(&self, width: u32) -> usize {
        self.columns(width) * self.bytes_per_element as usize
    }
}

/// Location of one channel's samples.
///
/// The sample covering luma pixel `(x, y)` lives in plane `plane`, row
/// `y / subsample_y`, at byte `(x / subsample_x) * step + offset` of that
/// row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Component {
    /// Which channel this is.
    pub channel: Channel,
    /// Plane index.
    pub plane: u8,
    /// Byte offset of the first sample in a row.
    pub offset: u8,
    /// Bytes between consecutive samples in a row.
    pub step: u8,
    /// Horizontal subsampling of this channel.
    pub subsample_x: u8,
    /// Vertical subsampling of this channel.
    pub subsample_y: u8,
}

impl Component {
    const fn new(channel: Channel, plane: u8, offset: u8, step: u8, sx: u8, sy: u8) -> Self {
        Self {
            channel,
            plane,
            offset,
            step,
            subsample_x: sx,
            subsample_y: sy,
        }
    }

    /// Byte index inside the plane of the sample covering luma `(x, y)`.
    #[inline]
    pub const fn byte_index(&self, x: u32, y: u32, stride: usize) -> usize {
        (y / self.subsample_y as u32) as usize * stride
            + (x / self.subsample_x as u32) as usize * self.step as usize
            + self.offset as usize
    }

    /// Sample columns for a frame of the given width.
    #[inline]
    pub const fn columns(&self, width: u32) -> usize {
        width.div_ceil(self.subsample_x as u32) as usize
    }

    /// Sample rows for a frame of the given height.
    #[inline]
    pub const fn rows(&self, height: u32) -> usize {
        height.div_ceil(self.subsample_y as u32) as usize
    }
}

/// Supported pixel formats.
///
/// [`PixelFormat::I420`] is the canonical format every conversion routes
/// through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// Planar 4:2:0, Y then U then V.
    I420,
    /// Planar 4:2:0, Y then V then U.
    Yv12,
    /// Planar 4:2:2.
    I422,
    /// Planar 4:4:4.
    I444,
    /// Semi-planar 4:2:0, interleaved U/V.
    Nv12,
    /// Semi-planar 4:2:0, interleaved V/U.
    Nv21,
    /// Luma only.
    I400,
    /// Packed 4:2:2, `Y0 U Y1 V`.
    Yuy2,
    /// Packed 4:2:2, `U Y0 V Y1`.
    Uyvy,
    /// 32-bit, memory order `B G R A`.
    Argb,
    /// 32-bit, memory order `A R G B`.
    Bgra,
    /// 32-bit, memory order `R G B A`.
    Abgr,
    /// 32-bit, memory order `A B G R`.
    Rgba,
    /// 24-bit, memory order `B G R`.
    Rgb24,
    /// 24-bit, memory order `R G B`.
    Raw,
}

impl PixelFormat {
    /// The planar chroma-subsampled intermediate format.
    pub const CANONICAL: PixelFormat = PixelFormat::I420;

    /// Every registered format, in registry order.
    pub const ALL: [PixelFormat; 15] = [
        PixelFormat::I420,
        PixelFormat::Yv12,
        PixelFormat::I422,
        PixelFormat::I444,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::I400,
        PixelFormat::Yuy2,
        PixelFormat::Uyvy,
        PixelFormat::Argb,
        PixelFormat::Bgra,
        PixelFormat::Abgr,
        PixelFormat::Rgba,
        PixelFormat::Rgb24,
        PixelFormat::Raw,
    ];

    /// Returns the static descriptor for this format.
    #[inline]
    pub fn desc(self) -> &'static FormatDesc {
        &REGISTRY[self as usize]
    }

    /// Returns the FourCC code.
    #[inline]
    pub fn fourcc(self) -> FourCc {
        self.desc().fourcc
    }

    /// Returns `true` for the canonical format.
    #[inline]
    pub fn is_canonical(self) -> bool {
        self == Self::CANONICAL
    }

    /// Looks up a format by FourCC.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] if the code is not registered.
    pub fn from_fourcc(fourcc: FourCc) -> Result<Self> {
        describe(fourcc).map(|desc| desc.format)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.desc().name)
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    /// Accepts a registered FourCC (`"NV21"`, `"24BG"`) or a format name,
    /// case-insensitively (`"rgb24"`, `"raw"`).
    fn from_str(s: &str) -> Result<Self> {
        REGISTRY
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(s) || d.fourcc.to_string().trim_end() == s)
            .map(|d| d.format)
            .ok_or_else(|| Error::unsupported_format(s))
    }
}

/// Static description of a pixel format.
#[derive(Debug, PartialEq, Eq)]
pub struct FormatDesc {
    /// The format this entry describes.
    pub format: PixelFormat,
    /// FourCC code.
    pub fourcc: FourCc,
    /// Human readable name.
    pub name: &'static str,
    /// Color model.
    pub family: Family,
    /// Plane arrangement.
    pub layout: Layout,
    /// Plane geometry, in storage order.
    pub planes: &'static [PlaneDesc],
    /// Channel locations.
    pub components: &'static [Component],
}

impl FormatDesc {
    /// Returns `true` if channels are stored in more than one plane, or the
    /// format is a planar luma-only layout.
    #[inline]
    pub fn is_planar(&self) -> bool {
        self.layout != Layout::Packed
    }

    /// Number of planes.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Returns `true` for the canonical format.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.format.is_canonical()
    }

    /// Chroma subsampling divisors `(x, y)`; `(1, 1)` when there is no
    /// subsampled chroma.
    pub fn chroma_subsampling(&self) -> (u32, u32) {
        self.component(Channel::U)
            .map(|c| (c.subsample_x as u32, c.subsample_y as u32))
            .unwrap_or((1, 1))
    }

    /// Average bytes per pixel for packed formats, `None` for planar ones.
    pub fn bytes_per_pixel(&self) -> Option<u32> {
        match self.layout {
            Layout::Packed => {
                let p = &self.planes[0];
                Some(p.bytes_per_element as u32 / p.subsample_x as u32)
            }
            _ => None,
        }
    }

    /// Returns `true` if the format stores an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.component(Channel::A).is_some()
    }

    /// Returns the location of `channel`, if the format stores it.
    pub fn component(&self, channel: Channel) -> Option<&'static Component> {
        self.components.iter().find(|c| c.channel == channel)
    }

    /// Largest plane subsampling per axis.
    ///
    /// Crop origins must be multiples of these values so every plane starts
    /// on a whole element.
    pub fn alignment(&self) -> (u32, u32) {
        self.planes.iter().fold((1, 1), |(ax, ay), p| {
            (ax.max(p.subsample_x as u32), ay.max(p.subsample_y as u32))
        })
    }

    /// Returns `true` if every plane element holds exactly one sample
    /// position of each of its channels.
    ///
    /// False for YUY2/UYVY, whose elements carry two luma samples. Such
    /// planes cannot be mirrored or rotated by moving whole elements.
    pub fn is_element_addressable(&self) -> bool {
        self.components.iter().all(|c| {
            let p = &self.planes[c.plane as usize];
            c.subsample_x == p.subsample_x && c.subsample_y == p.subsample_y
        })
    }

    /// Returns `true` if every plane is subsampled equally on both axes, so a
    /// 90 degree rotation keeps the plane geometry.
    pub fn is_square_subsampled(&self) -> bool {
        self.planes.iter().all(|p| p.subsample_x == p.subsample_y)
    }

    /// Size in bytes of a tightly packed frame.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yuvx_core::PixelFormat;
    ///
    /// // 4:2:0 with odd dimensions rounds chroma up
    /// assert_eq!(PixelFormat::I420.desc().frame_size(5, 3), 15 + 2 * 3 * 2);
    /// assert_eq!(PixelFormat::Argb.desc().frame_size(2, 2), 16);
    /// ```
    pub fn frame_size(&self, width: u32, height: u32) -> usize {
        self.planes
            .iter()
            .map(|p| p.row_bytes(width) * p.rows(height))
            .sum()
    }
}

/// Looks up the descriptor registered for `fourcc`.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] if the code is not registered.
pub fn describe(fourcc: FourCc) -> Result<&'static FormatDesc> {
    REGISTRY
        .iter()
        .find(|d| d.fourcc == fourcc)
        .ok_or_else(|| Error::unsupported_format(fourcc.to_string()))
}

// ============================================================================
// Registry table
// ============================================================================

use Channel::{A, B, G, R, U, V, Y};

const LUMA: PlaneDesc = PlaneDesc::new(1, 1, 1);
const CHROMA_420: PlaneDesc = PlaneDesc::new(2, 2, 1);
const CHROMA_422: PlaneDesc = PlaneDesc::new(2, 1, 1);

const PLANES_420: [PlaneDesc; 3] = [LUMA, CHROMA_420, CHROMA_420];
const PLANES_422: [PlaneDesc; 3] = [LUMA, CHROMA_422, CHROMA_422];
const PLANES_444: [PlaneDesc; 3] = [LUMA, LUMA, LUMA];
const PLANES_NV: [PlaneDesc; 2] = [LUMA, PlaneDesc::new(2, 2, 2)];
const PLANES_Y: [PlaneDesc; 1] = [LUMA];
const PLANES_PACKED_422: [PlaneDesc; 1] = [PlaneDesc::new(2, 1, 4)];
const PLANES_32: [PlaneDesc; 1] = [PlaneDesc::new(1, 1, 4)];
const PLANES_24: [PlaneDesc; 1] = [PlaneDesc::new(1, 1, 3)];

const fn y0() -> Component {
    Component::new(Y, 0, 0, 1, 1, 1)
}

const fn rgb(ch: Channel, offset: u8, step: u8) -> Component {
    Component::new(ch, 0, offset, step, 1, 1)
}

static REGISTRY: [FormatDesc; 15] = [
    FormatDesc {
        format: PixelFormat::I420,
        fourcc: FourCc(*b"I420"),
        name: "I420",
        family: Family::Yuv,
        layout: Layout::Planar,
        planes: &PLANES_420,
        components: &[y0(), Component::new(U, 1, 0, 1, 2, 2), Component::new(V, 2, 0, 1, 2, 2)],
    },
    FormatDesc {
        format: PixelFormat::Yv12,
        fourcc: FourCc(*b"YV12"),
        name: "YV12",
        family: Family::Yuv,
        layout: Layout::Planar,
        planes: &PLANES_420,
        components: &[y0(), Component::new(V, 1, 0, 1, 2, 2), Component::new(U, 2, 0, 1, 2, 2)],
    },
    FormatDesc {
        format: PixelFormat::I422,
        fourcc: FourCc(*b"I422"),
        name: "I422",
        family: Family::Yuv,
        layout: Layout::Planar,
        planes: &PLANES_422,
        components: &[y0(), Component::new(U, 1, 0, 1, 2, 1), Component::new(V, 2, 0, 1, 2, 1)],
    },
    FormatDesc {
        format: PixelFormat::I444,
        fourcc: FourCc(*b"I444"),
        name: "I444",
        family: Family::Yuv,
        layout: Layout::Planar,
        planes: &PLANES_444,
        components: &[y0(), Component::new(U, 1, 0, 1, 1, 1), Component::new(V, 2, 0, 1, 1, 1)],
    },
    FormatDesc {
        format: PixelFormat::Nv12,
        fourcc: FourCc(*b"NV12"),
        name: "NV12",
        family: Family::Yuv,
        layout: Layout::SemiPlanar,
        planes: &PLANES_NV,
        components: &[y0(), Component::new(U, 1, 0, 2, 2, 2), Component::new(V, 1, 1, 2, 2, 2)],
    },
    FormatDesc {
        format: PixelFormat::Nv21,
        fourcc: FourCc(*b"NV21"),
        name: "NV21",
        family: Family::Yuv,
        layout: Layout::SemiPlanar,
        planes: &PLANES_NV,
        components: &[y0(), Component::new(V, 1, 0, 2, 2, 2), Component::new(U, 1, 1, 2, 2, 2)],
    },
    FormatDesc {
        format: PixelFormat::I400,
        fourcc: FourCc(*b"I400"),
        name: "I400",
        family: Family::Yuv,
        layout: Layout::Planar,
        planes: &PLANES_Y,
        components: &[y0()],
    },
    FormatDesc {
        format: PixelFormat::Yuy2,
        fourcc: FourCc(*b"YUY2"),
        name: "YUY2",
        family: Family::Yuv,
        layout: Layout::Packed,
        planes: &PLANES_PACKED_422,
        components: &[
            Component::new(Y, 0, 0, 2, 1, 1),
            Component::new(U, 0, 1, 4, 2, 1),
            Component::new(V, 0, 3, 4, 2, 1),
        ],
    },
    FormatDesc {
        format: PixelFormat::Uyvy,
        fourcc: FourCc(*b"UYVY"),
        name: "UYVY",
        family: Family::Yuv,
        layout: Layout::Packed,
        planes: &PLANES_PACKED_422,
        components: &[
            Component::new(Y, 0, 1, 2, 1, 1),
            Component::new(U, 0, 0, 4, 2, 1),
            Component::new(V, 0, 2, 4, 2, 1),
        ],
    },
    FormatDesc {
        format: PixelFormat::Argb,
        fourcc: FourCc(*b"ARGB"),
        name: "ARGB",
        family: Family::Rgb,
        layout: Layout::Packed,
        planes: &PLANES_32,
        components: &[rgb(B, 0, 4), rgb(G, 1, 4), rgb(R, 2, 4), rgb(A, 3, 4)],
    },
    FormatDesc {
        format: PixelFormat::Bgra,
        fourcc: FourCc(*b"BGRA"),
        name: "BGRA",
        family: Family::Rgb,
        layout: Layout::Packed,
        planes: &PLANES_32,
        components: &[rgb(A, 0, 4), rgb(R, 1, 4), rgb(G, 2, 4), rgb(B, 3, 4)],
    },
    FormatDesc {
        format: PixelFormat::Abgr,
        fourcc: FourCc(*b"ABGR"),
        name: "ABGR",
        family: Family::Rgb,
        layout: Layout::Packed,
        planes: &PLANES_32,
        components: &[rgb(R, 0, 4), rgb(G, 1, 4), rgb(B, 2, 4), rgb(A, 3, 4)],
    },
    FormatDesc {
        format: PixelFormat::Rgba,
        fourcc: FourCc(*b"RGBA"),
        name: "RGBA",
        family: Family::Rgb,
        layout: Layout::Packed,
        planes: &PLANES_32,
        components: &[rgb(A, 0, 4), rgb(B, 1, 4), rgb(G, 2, 4), rgb(R, 3, 4)],
    },
    FormatDesc {
        format: PixelFormat::Rgb24,
        fourcc: FourCc(*b"24BG"),
        name: "RGB24",
        family: Family::Rgb,
        layout: Layout::Packed,
        planes: &PLANES_24,
        components: &[rgb(B, 0, 3), rgb(G, 1, 3), rgb(R, 2, 3)],
    },
    FormatDesc {
        format: PixelFormat::Raw,
        fourcc: FourCc(*b"RAW "),
        name: "RAW",
        family: Family::Rgb,
        layout: Layout::Packed,
        planes: &PLANES_24,
        components: &[rgb(R, 0, 3), rgb(G, 1, 3), rgb(B, 2, 3)],
    },
];
