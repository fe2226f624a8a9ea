//! Safe zone handling.
//!
//! Some displays crop the edges of the picture, so hosts expose a "safe zone"
//! size between 0.9 and 1.0. A safe-zone aware menu asks a [`SafeZone`] to
//! move its origin into the visible area before laying itself out.

use crate::element::{PointF, SizeF};

/// Smallest safe zone size accepted by [`InsetSafeZone`].
pub const MIN_SAFE_ZONE: f32 = 0.9;

/// Converts a top-left anchored offset into a position inside the safe zone.
pub trait SafeZone {
    fn real_position(&self, offset: PointF) -> PointF;
}

/// Resolver that leaves positions untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSafeZone;

impl SafeZone for NoSafeZone {
    fn real_position(&self, offset: PointF) -> PointF {
        offset
    }
}

/// Safe zone expressed as a fraction of the screen, centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetSafeZone {
    size: f32,
    resolution: SizeF,
}

impl InsetSafeZone {
    /// Create a resolver for the given size and reference resolution.
    ///
    /// The size is clamped to `0.9..=1.0`.
    pub fn new(size: f32, resolution: SizeF) -> Self {
        Self {
            size: size.clamp(MIN_SAFE_ZONE, 1.0),
            resolution,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Distance between the screen corner and the safe zone corner.
    pub fn margin(&self) -> PointF {
        let inset = (1.0 - self.size) * 0.5;
        PointF::new(self.resolution.width * inset, self.resolution.height * inset)
    }
}

impl SafeZone for InsetSafeZone {
    fn real_position(&self, offset: PointF) -> PointF {
        let margin = self.margin();
        offset.offset(margin.x, margin.y)
    }
}
