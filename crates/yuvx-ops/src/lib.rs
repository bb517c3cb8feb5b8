//! # yuvx-ops
//!
//! Geometric operations on frames in any registered pixel format.
//!
//! # Modules
//!
//! - [`transform`] - Rotate, mirror, vertical flip, crop
//! - [`resize`] - Scaling with nearest, linear, bilinear and box filters
//!
//! Every operation takes a borrowed [`FrameBuffer`](yuvx_core::FrameBuffer)
//! and returns a new, tightly strided one in the same format. Failures are
//! reported through [`yuvx_core::Error`] before anything is allocated.
//!
//! # Example
//!
//! ```rust
//! use yuvx_core::{FrameBuffer, PixelFormat, Rect, Rotation};
//! use yuvx_ops::{crop, rotate, scale, FilterMode};
//!
//! let frame = FrameBuffer::alloc(PixelFormat::Nv21, 1280, 720).unwrap();
//!
//! let upright = rotate(&frame, Rotation::Rotate270).unwrap();
//! let (square, _) = crop(&upright, Rect::new(0, 280, 720, 720)).unwrap();
//! let thumb = scale(&square, 160, 160, FilterMode::Box).unwrap();
//! assert_eq!(thumb.dimensions(), (160, 160));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod resize;
pub mod transform;

pub use resize::{fit_dimensions, scale, FilterMode};
pub use transform::{crop, flip_v, mirror, rotate};
