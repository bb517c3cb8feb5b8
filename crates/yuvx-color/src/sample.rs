//! Borrowed sample readers over source planes.
//!
//! A [`ChannelReader`] addresses one channel of a source image on its own
//! sample grid, independent of whether the channel lives in a planar,
//! interleaved or packed plane. A [`PixelSource`] groups the readers the
//! canonical builder needs.

use crate::bt601::{self, YuvRange};
use yuvx_core::{Channel, Family, FrameBuffer};

/// Reads one channel's samples.
///
/// Sample `(gx, gy)` on the channel grid is at
/// `start + gy * stride + gx * step`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChannelReader<'a> {
    data: &'a [u8],
    start: usize,
    stride: usize,
    step: usize,
    subsample_x: usize,
    subsample_y: usize,
}

impl<'a> ChannelReader<'a> {
    pub(crate) fn new(
        data: &'a [u8],
        start: usize,
        stride: usize,
        step: usize,
        subsample: (usize, usize),
    ) -> Self {
        Self {
            data,
            start,
            stride,
            step,
            subsample_x: subsample.0,
            subsample_y: subsample.1,
        }
    }

    /// Reader for `channel` of `frame`, with pixel `(0, 0)` moved to
    /// `(origin_x, origin_y)`.
    ///
    /// The origin must be a multiple of the channel subsampling.
    pub(crate) fn from_frame(frame: &'a FrameBuffer, channel: Channel, origin_x: u32, origin_y: u32) -> Option<Self> {
        let c = frame.desc().component(channel)?;
        let plane = frame.plane(c.plane as usize);
        Some(Self::new(
            plane.data(),
            c.byte_index(origin_x, origin_y, plane.stride()),
            plane.stride(),
            c.step as usize,
            (c.subsample_x as usize, c.subsample_y as usize),
        ))
    }

    /// Sample on the channel's own grid.
    #[inline]
    pub(crate) fn grid(&self, gx: usize, gy: usize) -> u8 {
        self.data[self.start + gy * self.stride + gx * self.step]
    }

    /// Sample covering pixel `(x, y)`.
    #[inline]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> u8 {
        self.grid(x / self.subsample_x, y / self.subsample_y)
    }

    #[inline]
    pub(crate) fn subsampling(&self) -> (usize, usize) {
        (self.subsample_x, self.subsample_y)
    }
}

/// Channel readers for a source image.
#[derive(Debug, Clone, Copy)]
pub(crate) enum PixelSource<'a> {
    /// Luma with optional chroma (absent for I400).
    Yuv {
        y: ChannelReader<'a>,
        chroma: Option<(ChannelReader<'a>, ChannelReader<'a>)>,
    },
    Rgb {
        r: ChannelReader<'a>,
        g: ChannelReader<'a>,
        b: ChannelReader<'a>,
    },
}

impl<'a> PixelSource<'a> {
    /// Readers for `frame` starting at the given origin.
    pub(crate) fn from_frame(frame: &'a FrameBuffer, origin_x: u32, origin_y: u32) -> Option<Self> {
        let read = |ch| ChannelReader::from_frame(frame, ch, origin_x, origin_y);
        match frame.desc().family {
            Family::Yuv => Some(Self::Yuv {
                y: read(Channel::Y)?,
                chroma: read(Channel::U).zip(read(Channel::V)),
            }),
            Family::Rgb => Some(Self::Rgb {
                r: read(Channel::R)?,
                g: read(Channel::G)?,
                b: read(Channel::B)?,
            }),
        }
    }

    /// Returns `true` if chroma can be taken sample-for-sample from a 4:2:0
    /// grid instead of averaged from pixels.
    pub(crate) fn has_420_chroma(&self) -> bool {
        matches!(self, Self::Yuv { chroma: Some((u, _)), .. } if u.subsampling() == (2, 2))
    }

    #[inline]
    pub(crate) fn luma(&self, x: usize, y: usize, range: YuvRange) -> u8 {
        match self {
            Self::Yuv { y: luma, .. } => luma.pixel(x, y),
            Self::Rgb { r, g, b } => bt601::rgb_to_y(range, r.pixel(x, y), g.pixel(x, y), b.pixel(x, y)),
        }
    }

    /// Chroma taken directly from 4:2:0 grid position `(gx, gy)`.
    #[inline]
    pub(crate) fn chroma_420(&self, gx: usize, gy: usize) -> (u8, u8) {
        match self {
            Self::Yuv { chroma: Some((u, v)), .. } => (u.grid(gx, gy), v.grid(gx, gy)),
            _ => (128, 128),
        }
    }

    /// Average chroma over a set of source pixels.
    ///
    /// RGB sources average the RGB values first and convert once.
    pub(crate) fn chroma_average(&self, pixels: &[(usize, usize)], range: YuvRange) -> (u8, u8) {
        let n = pixels.len() as u32;
        if n == 0 {
            return (128, 128);
        }
        let avg = |sum: u32| ((sum + n / 2) / n) as u8;
        match self {
            Self::Yuv { chroma: Some((u, v)), .. } => {
                let (su, sv) = pixels
                    .iter()
                    .fold((0u32, 0u32), |(su, sv), &(x, y)| (su + u.pixel(x, y) as u32, sv + v.pixel(x, y) as u32));
                (avg(su), avg(sv))
            }
            Self::Yuv { chroma: None, .. } => (128, 128),
            Self::Rgb { r, g, b } => {
                let (sr, sg, sb) = pixels.iter().fold((0u32, 0u32, 0u32), |(sr, sg, sb), &(x, y)| {
                    (
                        sr + r.pixel(x, y) as u32,
                        sg + g.pixel(x, y) as u32,
                        sb + b.pixel(x, y) as u32,
                    )
                });
                bt601::rgb_to_uv(range, avg(sr), avg(sg), avg(sb))
            }
        }
    }
}
