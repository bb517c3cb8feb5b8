//! Error types for yuvx operations.
//!
//! Every conversion and transform in the workspace reports failures through
//! the single [`Error`] enum defined here. All of them are validation errors:
//! they are detected before any output buffer is allocated, so an operation
//! either returns a complete [`FrameBuffer`](crate::FrameBuffer) or one of
//! these variants, never a partially written result.
//!
//! # Usage
//!
//! ```rust
//! use yuvx_core::{Error, Result};
//!
//! fn check_target(width: u32, height: u32) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_dimensions(width, height, "target size must be > 0"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_target(0, 10).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - derive for `Display`/`Error`
//!
//! # Used By
//!
//! - [`crate::format`] - registry lookups
//! - [`crate::frame`] - buffer validation
//! - `yuvx-color` / `yuvx-ops` - parameter validation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting or transforming frames.
///
/// # Categories
///
/// - **Format errors**: [`UnsupportedFormat`](Error::UnsupportedFormat)
/// - **Layout errors**: [`DimensionMismatch`](Error::DimensionMismatch)
/// - **Parameter errors**: [`InvalidRotation`](Error::InvalidRotation),
///   [`InvalidRectangle`](Error::InvalidRectangle),
///   [`InvalidDimensions`](Error::InvalidDimensions)
///
/// None of these are transient; they indicate a usage error in the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The format tag is not registered, or the operation does not accept it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yuvx_core::{describe, FourCc};
    ///
    /// let err = describe(FourCc::new(*b"MJPG")).unwrap_err();
    /// assert!(err.to_string().contains("MJPG"));
    /// ```
    #[error("unsupported pixel format: {format}")]
    UnsupportedFormat {
        /// Format name or description
        format: String,
    },

    /// Plane layout does not match what width, height and format imply.
    ///
    /// Returned for a wrong plane count, a stride shorter than the logical
    /// row, or a plane whose byte length cannot hold `stride * rows`.
    #[error("dimension mismatch for {format} {width}x{height}: {reason}")]
    DimensionMismatch {
        /// Format of the offending buffer
        format: String,
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// What did not match
        reason: String,
    },

    /// Rotation angle is not one of 0, 90, 180 or 270 degrees.
    #[error("invalid rotation: {degrees} degrees (expected 0, 90, 180 or 270)")]
    InvalidRotation {
        /// Requested angle
        degrees: i32,
    },

    /// Rectangle is empty or extends beyond the source image.
    #[error("rectangle ({rx}, {ry}, {rw}x{rh}) is not inside image {width}x{height}")]
    InvalidRectangle {
        /// Rectangle left edge
        rx: u32,
        /// Rectangle top edge
        ry: u32,
        /// Rectangle width
        rw: u32,
        /// Rectangle height
        rh: u32,
        /// Source width
        width: u32,
        /// Source height
        height: u32,
    },

    /// Width or height is zero, or the buffer size would overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(
        format: impl Into<String>,
        width: u32,
        height: u32,
        reason: impl Into<String>,
    ) -> Self {
        Self::DimensionMismatch {
            format: format.into(),
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidRotation`] error.
    #[inline]
    pub fn invalid_rotation(degrees: i32) -> Self {
        Self::InvalidRotation { degrees }
    }

    /// Creates an [`Error::InvalidRectangle`] error.
    #[inline]
    pub fn invalid_rectangle(rx: u32, ry: u32, rw: u32, rh: u32, width: u32, height: u32) -> Self {
        Self::InvalidRectangle {
            rx,
            ry,
            rw,
            rh,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a format error.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    /// Returns `true` if the buffer layout itself was inconsistent.
    #[inline]
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }

    /// Returns `true` if a call parameter (rotation, rectangle, size) was invalid.
    #[inline]
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRotation { .. } | Self::InvalidRectangle { .. } | Self::InvalidDimensions { .. }
        )
    }
}
