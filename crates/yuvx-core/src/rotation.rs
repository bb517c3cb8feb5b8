//! Clockwise rotation by multiples of 90 degrees.
//!
//! Rotation is a pure index remap, so every engine works in destination
//! order: for each output position it asks [`Rotation::source_coords`]
//! where the value comes from. The same mapping applies to chroma planes in
//! their own subsampled coordinate space.
//!
//! # Usage
//!
//! ```rust
//! use yuvx_core::Rotation;
//!
//! let rot = Rotation::from_degrees(90).unwrap();
//! assert_eq!(rot.output_dimensions(640, 480), (480, 640));
//!
//! // Top-left of the output comes from bottom-left of the source
//! assert_eq!(rot.source_coords(0, 0, 640, 480), (0, 479));
//!
//! assert!(Rotation::from_degrees(45).is_err());
//! ```

use crate::{Error, Result};

/// Clockwise rotation angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Rotate0,
    /// 90 degrees clockwise.
    Rotate90,
    /// 180 degrees.
    Rotate180,
    /// 270 degrees clockwise (90 counter-clockwise).
    Rotate270,
}

impl Rotation {
    /// All four rotations in ascending angle order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Rotate0,
        Rotation::Rotate90,
        Rotation::Rotate180,
        Rotation::Rotate270,
    ];

    /// Parses an angle in degrees.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRotation`] unless `degrees` is exactly 0, 90, 180
    /// or 270.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Self::Rotate0),
            90 => Ok(Self::Rotate90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Rotate270),
            _ => Err(Error::invalid_rotation(degrees)),
        }
    }

    /// Angle in degrees.
    #[inline]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Rotate0 => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }

    /// Returns `true` for 90 and 270.
    #[inline]
    pub const fn swaps_dimensions(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }

    /// Output size for a `width x height` input.
    #[inline]
    pub const fn output_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// The rotation that undoes this one.
    #[inline]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Rotate0 => Self::Rotate0,
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate180 => Self::Rotate180,
            Self::Rotate270 => Self::Rotate90,
        }
    }

    /// Applies `self` and then `next`.
    #[inline]
    pub const fn then(self, next: Rotation) -> Self {
        match (self.degrees() + next.degrees()) % 360 {
            90 => Self::Rotate90,
            180 => Self::Rotate180,
            270 => Self::Rotate270,
            _ => Self::Rotate0,
        }
    }

    /// Maps a destination position to its source position.
    ///
    /// `src_width` and `src_height` are the *source* grid dimensions, which
    /// for a chroma plane are its subsampled dimensions.
    #[inline]
    pub const fn source_coords(self, dx: usize, dy: usize, src_width: usize, src_height: usize) -> (usize, usize) {
        match self {
            Self::Rotate0 => (dx, dy),
            Self::Rotate90 => (dy, src_height - 1 - dx),
            Self::Rotate180 => (src_width - 1 - dx, src_height - 1 - dy),
            Self::Rotate270 => (src_width - 1 - dy, dx),
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl TryFrom<i32> for Rotation {
    type Error = Error;

    fn try_from(degrees: i32) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_degrees() {
        for rot in Rotation::ALL {
            assert_eq!(Rotation::from_degrees(rot.degrees()).unwrap(), rot);
        }
        for bad in [-90, 45, 360, 1] {
            let err = Rotation::from_degrees(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidRotation { degrees } if degrees == bad));
        }
    }

    #[test]
    fn test_output_dimensions() {
        assert_eq!(Rotation::Rotate0.output_dimensions(4, 2), (4, 2));
        assert_eq!(Rotation::Rotate90.output_dimensions(4, 2), (2, 4));
        assert_eq!(Rotation::Rotate180.output_dimensions(4, 2), (4, 2));
        assert_eq!(Rotation::Rotate270.output_dimensions(4, 2), (2, 4));
    }

    #[test]
    fn test_composition() {
        for a in Rotation::ALL {
            assert_eq!(a.then(a.inverse()), Rotation::Rotate0);
            for b in Rotation::ALL {
                assert_eq!(a.then(b).degrees(), (a.degrees() + b.degrees()) % 360);
            }
        }
        assert_eq!(Rotation::Rotate90.then(Rotation::Rotate90), Rotation::Rotate180);
    }

    /// Rotating a 3x2 grid labelled row-major and reading it back.
    fn rotate_grid(rot: Rotation) -> Vec<usize> {
        let (w, h) = (3, 2);
        let (ow, oh) = rot.output_dimensions(w as u32, h as u32);
        let mut out = Vec::new();
        for dy in 0..oh as usize {
            for dx in 0..ow as usize {
                let (sx, sy) = rot.source_coords(dx, dy, w, h);
                out.push(sy * w + sx);
            }
        }
        out
    }

    #[test]
    fn test_source_coords() {
        // 0 1 2
        // 3 4 5
        assert_eq!(rotate_grid(Rotation::Rotate0), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(rotate_grid(Rotation::Rotate90), vec![3, 0, 4, 1, 5, 2]);
        assert_eq!(rotate_grid(Rotation::Rotate180), vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(rotate_grid(Rotation::Rotate270), vec![2, 5, 1, 4, 0, 3]);
    }
}
