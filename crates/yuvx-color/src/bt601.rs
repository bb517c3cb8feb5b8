//! BT.601 YUV <-> RGB math in 16.16 fixed point.
//!
//! Two quantization ranges are supported:
//!
//! | Range     | Y       | U, V   | Used by                   |
//! |-----------|---------|--------|---------------------------|
//! | `Limited` | 16..235 | 16..240| camera/video I420 (default) |
//! | `Full`    | 0..255  | 0..255 | JPEG                      |
//!
//! Every function is pure integer arithmetic: accumulate in `i32`, add the
//! offset and a rounding half, shift by 16, clamp to `0..=255`. Results are
//! identical on every platform.
//!
//! Coefficient rows for U and V sum to zero, so any gray input maps to
//! exactly 128 chroma.
//!
//! # Example
//!
//! ```rust
//! use yuvx_color::bt601::{rgb_to_uv, rgb_to_y, yuv_to_rgb};
//! use yuvx_color::YuvRange;
//!
//! assert_eq!(rgb_to_y(YuvRange::Limited, 255, 255, 255), 235);
//! assert_eq!(rgb_to_uv(YuvRange::Limited, 80, 80, 80), (128, 128));
//! assert_eq!(yuv_to_rgb(YuvRange::Limited, 16, 128, 128), [0, 0, 0]);
//! ```

/// YUV quantization range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YuvRange {
    /// Studio swing: Y in 16..=235, chroma in 16..=240.
    #[default]
    Limited,
    /// Full swing: all channels use 0..=255.
    Full,
}

struct Coefficients {
    // Forward rows, scaled by 65536
    y: [i32; 3],
    u: [i32; 3],
    v: [i32; 3],
    y_offset: i32,
    // Inverse, scaled by 65536
    y_gain: i32,
    rv: i32,
    gu: i32,
    gv: i32,
    bu: i32,
}

const LIMITED: Coefficients = Coefficients {
    y: [16829, 33039, 6416],
    u: [-9714, -19070, 28784],
    v: [28784, -24103, -4681],
    y_offset: 16,
    y_gain: 76309,
    rv: 104597,
    gu: 25675,
    gv: 53279,
    bu: 132201,
};

const FULL: Coefficients = Coefficients {
    y: [19595, 38470, 7471],
    u: [-11058, -21710, 32768],
    v: [32768, -27439, -5329],
    y_offset: 0,
    y_gain: 65536,
    rv: 91881,
    gu: 22553,
    gv: 46802,
    bu: 116130,
};

const HALF: i32 = 1 << 15;

impl YuvRange {
    #[inline]
    fn coefficients(self) -> &'static Coefficients {
        match self {
            YuvRange::Limited => &LIMITED,
            YuvRange::Full => &FULL,
        }
    }
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline]
fn dot(row: &[i32; 3], r: i32, g: i32, b: i32) -> i32 {
    row[0] * r + row[1] * g + row[2] * b
}

/// Luma of one RGB pixel.
#[inline]
pub fn rgb_to_y(range: YuvRange, r: u8, g: u8, b: u8) -> u8 {
    let c = range.coefficients();
    let sum = dot(&c.y, r as i32, g as i32, b as i32);
    clamp_u8((sum + (c.y_offset << 16) + HALF) >> 16)
}

/// Chroma `(U, V)` of one RGB pixel.
///
/// Callers converting to 4:2:0 pass the average of the block's pixels.
#[inline]
pub fn rgb_to_uv(range: YuvRange, r: u8, g: u8, b: u8) -> (u8, u8) {
    let c = range.coefficients();
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let u = (dot(&c.u, r, g, b) + (128 << 16) + HALF) >> 16;
    let v = (dot(&c.v, r, g, b) + (128 << 16) + HALF) >> 16;
    (clamp_u8(u), clamp_u8(v))
}

/// `[R, G, B]` of one YUV sample triple.
#[inline]
pub fn yuv_to_rgb(range: YuvRange, y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = range.coefficients();
    let luma = (y as i32 - c.y_offset) * c.y_gain + HALF;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    [
        clamp_u8((luma + c.rv * v) >> 16),
        clamp_u8((luma - c.gu * u - c.gv * v) >> 16),
        clamp_u8((luma + c.bu * u) >> 16),
    ]
}
