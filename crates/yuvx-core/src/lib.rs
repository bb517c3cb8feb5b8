//! # yuvx-core
//!
//! Core types for YUV/RGB frame conversion and transformation.
//!
//! This crate provides the foundational types used throughout the yuvx
//! workspace:
//!
//! - [`PixelFormat`], [`FormatDesc`], [`describe`] - Static pixel format
//!   registry keyed by [`FourCc`]
//! - [`FrameBuffer`], [`Plane`] - Validated, immutable multi-plane images
//! - [`Rect`] - Crop regions
//! - [`Rotation`] - Clockwise quarter turns and their index mapping
//! - [`Error`], [`Result`] - The error type shared by every crate
//!
//! ## Design Philosophy
//!
//! Formats are data, not code. Engines read a format's plane geometry and
//! channel locations from its [`FormatDesc`] instead of matching on the
//! variant, so one implementation covers every layout with the same shape.
//!
//! ## Crate Structure
//!
//! ```text
//! yuvx-core (this crate)
//!    ^
//!    |
//!    +-- yuvx-color (BT.601 conversion, canonical I420 routing)
//!    +-- yuvx-ops (rotate, mirror, crop, scale)
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Process rows with Rayon (enabled by default)
//! - `serde` - Serialization for [`Rect`], [`PixelFormat`], [`FourCc`] and
//!   [`Rotation`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod frame;
pub mod parallel;
pub mod rect;
pub mod rotation;

// Re-exports for convenience
pub use error::*;
pub use format::{
    describe, Channel, Component, Family, FormatDesc, FourCc, Layout, PixelFormat, PlaneDesc,
};
pub use frame::{FrameBuffer, Plane};
pub use rect::Rect;
pub use rotation::Rotation;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use yuvx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::format::{describe, Channel, FourCc, PixelFormat};
    pub use crate::frame::{FrameBuffer, Plane};
    pub use crate::rect::Rect;
    pub use crate::rotation::Rotation;
}
