//! # yuvx-color
//!
//! Colorspace conversion between the registered pixel formats.
//!
//! All conversions pass through the canonical I420 format:
//!
//! - [`to_canonical`] - any format to I420, with fused rotation
//! - [`to_canonical_region`] - fused crop + rotation + conversion
//! - [`sensor_to_canonical`] - borrowed camera planes with a chroma pixel
//!   stride
//! - [`from_canonical`] - I420 to any format
//! - [`convert`] - any pair, routing through I420 when neither side is
//!   canonical
//!
//! YUV <-> RGB uses BT.601 in 16.16 fixed point ([`bt601`]); limited range
//! by default, full range through [`Converter::with_range`].
//!
//! # Architecture
//!
//! ```text
//!                 yuvx-color
//!                     |
//!     +---------------+---------------+
//!     |               |               |
//!  convert         sensor           bt601
//!     |               |               |
//!     +------- sample (readers) ------+
//!                     |
//!                 yuvx-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use yuvx_color::convert;
//! use yuvx_core::{FrameBuffer, PixelFormat};
//!
//! let frame = FrameBuffer::alloc(PixelFormat::Nv21, 320, 240).unwrap();
//! let display = convert(&frame, PixelFormat::Abgr).unwrap();
//! assert_eq!(display.plane(0).stride(), 320 * 4);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Row-parallel conversion via Rayon (enabled by default)
//! - `serde` - Serialization for [`ConvertOptions`]

#![warn(missing_docs)]

pub mod bt601;
pub mod convert;
mod sample;
pub mod sensor;

pub use bt601::YuvRange;
pub use convert::{
    convert, from_canonical, to_canonical, to_canonical_region, ChromaUpsampling, ConvertOptions,
    Converter,
};
pub use sensor::{sensor_to_canonical, SensorFrame};
