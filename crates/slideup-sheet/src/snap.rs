#![forbid(unsafe_code)]

//! Named resting positions for the sheet.
//!
//! Snap points are measured as the sheet's *visible height* above the bottom
//! edge of the viewport. The sheet's offset is the distance from the top of
//! the viewport to the top of the sheet, so `offset = viewport - visible`.
//!
//! # Invariants
//!
//! - `0 <= half < full < closed` where `closed == viewport` (for a valid
//!   [`SheetConfig`] and a positive viewport).
//! - `Closed` has zero visible height: its offset is the full viewport, i.e.
//!   the sheet is entirely off-screen.

use crate::config::SheetConfig;

/// A named resting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnapPoint {
    /// Half-open (the default open position).
    #[default]
    Half,
    /// Fully open.
    Full,
    /// Off-screen.
    Closed,
}

impl SnapPoint {
    /// Short lowercase name, used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Full => "full",
            Self::Closed => "closed",
        }
    }
}

/// Snap point heights derived from the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoints {
    viewport: f32,
    half: f32,
    full: f32,
}

impl SnapPoints {
    /// Derive snap heights for a viewport. Negative heights are treated as 0.
    #[must_use]
    pub fn from_viewport(viewport_height: f32, config: &SheetConfig) -> Self {
        let viewport = viewport_height.max(0.0);
        Self {
            viewport,
            half: viewport * config.half_fraction,
            full: viewport * config.full_fraction,
        }
    }

    /// Total vertical extent the sheet travels across.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> f32 {
        self.viewport
    }

    /// Visible height at [`SnapPoint::Half`].
    #[inline]
    #[must_use]
    pub fn half(&self) -> f32 {
        self.half
    }

    /// Visible height at [`SnapPoint::Full`].
    #[inline]
    #[must_use]
    pub fn full(&self) -> f32 {
        self.full
    }

    /// The named scalar for a snap point: `half`, `full`, or the viewport
    /// height for `Closed`.
    #[must_use]
    pub fn value(&self, point: SnapPoint) -> f32 {
        match point {
            SnapPoint::Half => self.half,
            SnapPoint::Full => self.full,
            SnapPoint::Closed => self.viewport,
        }
    }

    /// Visible sheet height when resting at `point`.
    #[must_use]
    pub fn visible_height(&self, point: SnapPoint) -> f32 {
        match point {
            SnapPoint::Half => self.half,
            SnapPoint::Full => self.full,
            SnapPoint::Closed => 0.0,
        }
    }

    /// Offset from the top of the viewport when resting at `point`.
    #[must_use]
    pub fn offset_for(&self, point: SnapPoint) -> f32 {
        self.viewport - self.visible_height(point)
    }

    /// Smallest offset reachable by dragging (the fully-open position).
    #[inline]
    #[must_use]
    pub fn min_offset(&self) -> f32 {
        self.viewport - self.full
    }

    /// Largest offset reachable by dragging (fully closed).
    #[inline]
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        self.viewport
    }
}
