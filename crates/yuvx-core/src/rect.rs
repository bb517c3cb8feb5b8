//! Rectangles in source pixel coordinates.
//!
//! Used to describe crop regions. Coordinates follow the usual image
//! convention, origin at the top-left, X to the right, Y downward.
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   crop   │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use yuvx_core::Rect;
//!
//! let rect = Rect::new(1, 1, 10, 10);
//! assert!(rect.fits_within(100, 100));
//!
//! // Snap the origin to 4:2:0 chroma alignment
//! assert_eq!(rect.align_origin(2, 2), Rect::new(0, 0, 10, 10));
//! ```
//!
//! # Used By
//!
//! - `yuvx-ops::crop` - crop region validation and alignment
//! - `yuvx-color::to_canonical_region` - fused crop on ingest

use crate::{Error, Result};

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// # Invariants
///
/// A rectangle is valid for a `W x H` source when `width > 0`,
/// `height > 0`, `x + width <= W` and `y + height <= H`. See
/// [`Rect::validate`].
///
/// # Example
///
/// ```rust
/// use yuvx_core::Rect;
///
/// let rect = Rect::new(10, 20, 100, 50);
/// assert_eq!(rect.right(), 110);
/// assert_eq!(rect.bottom(), 70);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin covering `width x height`.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive), saturating on overflow.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating on overflow.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` if width or height is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if `other` lies entirely inside this rectangle.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns `true` if the rectangle is non-empty and inside a
    /// `width x height` image.
    #[inline]
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty()
            && (self.x as u64 + self.width as u64) <= width as u64
            && (self.y as u64 + self.height as u64) <= height as u64
    }

    /// Checks [`Rect::fits_within`], reporting failure as an error.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRectangle`] if the rectangle is empty or exceeds the
    /// image.
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        if self.fits_within(width, height) {
            Ok(())
        } else {
            Err(Error::invalid_rectangle(
                self.x,
                self.y,
                self.width,
                self.height,
                width,
                height,
            ))
        }
    }

    /// Rounds the origin down to multiples of `(align_x, align_y)`,
    /// keeping width and height.
    ///
    /// The result stays inside any image the original fit in, since the
    /// origin only moves toward zero.
    #[inline]
    pub const fn align_origin(&self, align_x: u32, align_y: u32) -> Self {
        Self::new(
            self.x - self.x % align_x,
            self.y - self.y % align_y,
            self.width,
            self.height,
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}
