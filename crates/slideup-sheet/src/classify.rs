#![forbid(unsafe_code)]

//! Drag classification: live offset clamping and release decisions.
//!
//! Both functions are pure so the controller stays a thin state holder and
//! the thresholds can be tested without any animation in the way.
//!
//! # Release rule (priority order)
//!
//! 1. `vy > flick_velocity`: fast downward flick, close.
//! 2. `vy < -flick_velocity`: fast upward flick, snap full.
//! 3. Otherwise classify by the visible height implied by the *unclamped*
//!    drag: below `close_band × half` closes, above `full_band × half` snaps
//!    full, anything between snaps back to half.
//!
//! Velocity wins over position. The position bands are asymmetric around the
//! half height so small drags settle back where they started.

use crate::config::SheetConfig;
use crate::snap::{SnapPoint, SnapPoints};

/// Outcome of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// Ask the owner to close the sheet.
    Close,
    /// Animate to a snap point.
    Snap(SnapPoint),
}

/// Offset the sheet should track while the finger is at cumulative `dy`.
///
/// Always within `[points.min_offset(), points.max_offset()]`. A NaN `dy` is
/// treated as no movement.
#[must_use]
pub fn live_offset(points: &SnapPoints, current: SnapPoint, dy: f32) -> f32 {
    let base = points.offset_for(current);
    let intended = if dy.is_nan() { base } else { base + dy };
    intended.clamp(points.min_offset(), points.max_offset())
}

/// Decide what a release at cumulative `dy` with velocity `vy` (px/ms) means.
#[must_use]
pub fn classify_release(
    points: &SnapPoints,
    current: SnapPoint,
    dy: f32,
    vy: f32,
    config: &SheetConfig,
) -> ReleaseDecision {
    if vy > config.flick_velocity {
        return ReleaseDecision::Close;
    }
    if vy < -config.flick_velocity {
        return ReleaseDecision::Snap(SnapPoint::Full);
    }

    let intended = points.offset_for(current) + dy;
    let visible = points.viewport() - intended;
    if visible < points.half() * config.close_band {
        ReleaseDecision::Close
    } else if visible > points.half() * config.full_band {
        ReleaseDecision::Snap(SnapPoint::Full)
    } else {
        ReleaseDecision::Snap(SnapPoint::Half)
    }
}
