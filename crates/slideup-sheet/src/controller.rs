#![forbid(unsafe_code)]

//! Sheet controller: visibility transitions, snap commits, and drag handling.
//!
//! [`SheetController`] owns the sheet's animated offset, the backdrop
//! opacity, and the current snap point. The owner drives it with three
//! inputs:
//!
//! - [`set_visible`](SheetController::set_visible): the owner's intent.
//!   Only transitions matter; `true` opens to half, `false` closes.
//! - Pan gestures through the [`PanHandler`] impl (typically via a
//!   [`PanRecognizer`](slideup_core::gesture::PanRecognizer)).
//! - [`on_backdrop_tap`](SheetController::on_backdrop_tap).
//!
//! The controller never changes its own visibility. When a gesture or a
//! backdrop tap means "close", it calls the `on_close` callback and waits for
//! the owner to call `set_visible(false)`.
//!
//! # State Machine
//!
//! ```text
//! Closed ─open→ Opening ─done→ Open ─drag→ Dragging ─release→ Settling ─done→ Open
//!   ↑                                                                          │
//!   └──────── done ── Closing ←──────────── close (from any visible phase) ────┘
//! ```
//!
//! # Invariants
//!
//! - While dragging, the offset stays within
//!   `[viewport - full, viewport]` whatever the raw finger movement.
//! - The backdrop only animates on visibility transitions, never during drag.
//! - Every open starts fresh at [`SnapPoint::Half`].
//! - A new animation on a value that is mid-animation redirects it from its
//!   current value (last command wins).
//!
//! # Failure Modes
//!
//! - No `on_close` wired: close-classified releases and backdrop taps are
//!   silent no-ops and the sheet stays where it was dropped.
//! - Gestures arriving while the sheet is not visible are ignored.

use std::time::Duration;

use slideup_core::animation::{Animation, Parallel, Tween, parallel};
use slideup_core::gesture::PanHandler;

use crate::classify::{ReleaseDecision, classify_release, live_offset};
use crate::config::{SheetConfig, SheetConfigError};
use crate::snap::{SnapPoint, SnapPoints};

// ============================================================================
// Phase
// ============================================================================

/// Current phase of the sheet lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetPhase {
    /// Off-screen and invisible.
    #[default]
    Closed,
    /// Animating in toward half.
    Opening,
    /// At rest while visible.
    Open,
    /// Tracking a claimed drag 1:1.
    Dragging,
    /// Animating to a snap point after release.
    Settling,
    /// Animating out.
    Closing,
}

impl SheetPhase {
    /// Check if the sheet should be rendered.
    #[inline]
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Check if an animation (not a drag) is in progress.
    #[inline]
    #[must_use]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Settling | Self::Closing)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Dragging => "dragging",
            Self::Settling => "settling",
            Self::Closing => "closing",
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

type CloseCallback = Box<dyn FnMut()>;

/// Headless controller for a draggable bottom sheet.
pub struct SheetController {
    config: SheetConfig,
    reduced_motion: bool,
    points: SnapPoints,
    current: SnapPoint,
    visible: bool,
    phase: SheetPhase,
    /// (offset, backdrop opacity)
    motion: Parallel<Tween, Tween>,
    on_close: Option<CloseCallback>,
}

impl std::fmt::Debug for SheetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetController")
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("offset", &self.translate_offset())
            .field("backdrop", &self.backdrop_opacity())
            .field("has_on_close", &self.on_close.is_some())
            .finish()
    }
}

impl SheetController {
    /// Create a closed sheet for a viewport of `viewport_height` px.
    #[must_use]
    pub fn new(viewport_height: f32, config: SheetConfig) -> Self {
        let points = SnapPoints::from_viewport(viewport_height, &config);
        let curve = config.easing.curve();
        let motion = parallel(
            Tween::at(points.max_offset()).easing(curve),
            Tween::at(0.0).easing(curve),
        );
        Self {
            config,
            reduced_motion: false,
            points,
            current: SnapPoint::Closed,
            visible: false,
            phase: SheetPhase::Closed,
            motion,
            on_close: None,
        }
    }

    /// Like [`new`](Self::new), rejecting an out-of-range config.
    pub fn try_new(viewport_height: f32, config: SheetConfig) -> Result<Self, SheetConfigError> {
        Ok(Self::new(viewport_height, config.validated()?))
    }

    /// Set the close callback (builder pattern).
    #[must_use]
    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Replace the close callback.
    pub fn set_on_close(&mut self, callback: impl FnMut() + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    /// Remove the close callback.
    pub fn clear_on_close(&mut self) {
        self.on_close = None;
    }

    /// Set reduced motion preference. Applies to animations started afterwards.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    // ------------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------------

    /// React to the owner's visibility flag. Repeating the current value is a
    /// no-op.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if visible { self.open() } else { self.close() }
    }

    /// Animate to `point` and make it the current snap point.
    ///
    /// Ignored while the sheet is not visible, and for [`SnapPoint::Closed`]:
    /// only [`set_visible`](Self::set_visible) opens or closes the sheet.
    pub fn snap_to(&mut self, point: SnapPoint) {
        if !self.visible || point == SnapPoint::Closed {
            return;
        }
        let cfg = self.config.effective(self.reduced_motion);
        let target = self.points.offset_for(point);
        self.current = point;
        self.offset_mut().animate_to(target, cfg.snap_duration());
        self.phase = SheetPhase::Settling;
        tracing::debug!(message = "sheet.snap", point = point.as_str(), target);
    }

    /// The backdrop was tapped. Requests close regardless of snap point.
    pub fn on_backdrop_tap(&mut self) {
        tracing::debug!(message = "sheet.backdrop_tap", point = self.current.as_str());
        self.request_close();
    }

    /// Advance animations by `dt`.
    ///
    /// Returns `true` if the phase changed (e.g. Opening → Open).
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.motion.tick(dt);

        let next = match self.phase {
            SheetPhase::Opening | SheetPhase::Settling if self.motion.is_complete() => {
                SheetPhase::Open
            }
            SheetPhase::Closing if self.motion.is_complete() => SheetPhase::Closed,
            phase => phase,
        };
        if next == self.phase {
            return false;
        }
        tracing::debug!(
            message = "sheet.settled",
            from = self.phase.as_str(),
            to = next.as_str(),
            offset = self.translate_offset()
        );
        self.phase = next;
        true
    }

    /// The viewport changed size. Recomputes snap heights and re-seats or
    /// retargets the offset for the current snap point.
    pub fn resize(&mut self, viewport_height: f32) {
        self.points = SnapPoints::from_viewport(viewport_height, &self.config);
        let target = self.points.offset_for(self.current);
        match self.phase {
            SheetPhase::Open | SheetPhase::Closed => self.offset_mut().set_value(target),
            SheetPhase::Opening | SheetPhase::Settling | SheetPhase::Closing => {
                let duration = self.motion.first().duration();
                self.offset_mut().animate_to(target, duration);
            }
            SheetPhase::Dragging => {
                let held = self
                    .translate_offset()
                    .clamp(self.points.min_offset(), self.points.max_offset());
                self.offset_mut().set_value(held);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Distance from the top of the viewport to the top of the sheet.
    #[inline]
    #[must_use]
    pub fn translate_offset(&self) -> f32 {
        self.motion.first().value()
    }

    /// Backdrop opacity in `[0, config.backdrop_opacity]`.
    #[inline]
    #[must_use]
    pub fn backdrop_opacity(&self) -> f32 {
        self.motion.second().value()
    }

    /// Visible sheet height implied by the current offset.
    #[inline]
    #[must_use]
    pub fn visible_height(&self) -> f32 {
        self.points.viewport() - self.translate_offset()
    }

    /// The snap point the sheet is at or heading toward.
    #[inline]
    #[must_use]
    pub fn current_snap_point(&self) -> SnapPoint {
        self.current
    }

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// The last visibility flag received from the owner.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Snap heights for the current viewport.
    #[inline]
    #[must_use]
    pub fn snap_points(&self) -> &SnapPoints {
        &self.points
    }

    /// Get a reference to the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn open(&mut self) {
        let cfg = self.config.effective(self.reduced_motion);
        let target = self.points.offset_for(SnapPoint::Half);
        self.current = SnapPoint::Half;
        let (offset, backdrop) = self.motion.parts_mut();
        offset.animate_to(target, cfg.open_duration());
        backdrop.animate_to(cfg.backdrop_opacity, cfg.open_duration());
        self.phase = SheetPhase::Opening;
        tracing::debug!(message = "sheet.open", target, viewport = self.points.viewport());
    }

    fn close(&mut self) {
        let cfg = self.config.effective(self.reduced_motion);
        let target = self.points.offset_for(SnapPoint::Closed);
        self.current = SnapPoint::Closed;
        let (offset, backdrop) = self.motion.parts_mut();
        offset.animate_to(target, cfg.close_duration());
        backdrop.animate_to(0.0, cfg.close_duration());
        self.phase = SheetPhase::Closing;
        tracing::debug!(message = "sheet.close", target);
    }

    fn request_close(&mut self) {
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }

    fn offset_mut(&mut self) -> &mut Tween {
        self.motion.parts_mut().0
    }
}

impl PanHandler for SheetController {
    fn on_start(&mut self) {
        if self.visible {
            self.phase = SheetPhase::Dragging;
        }
    }

    fn on_move(&mut self, dy: f32) {
        if !self.visible {
            return;
        }
        self.phase = SheetPhase::Dragging;
        let offset = live_offset(&self.points, self.current, dy);
        self.offset_mut().set_value(offset);
    }

    fn on_end(&mut self, dy: f32, vy: f32) {
        if !self.visible {
            return;
        }
        let decision = classify_release(&self.points, self.current, dy, vy, &self.config);
        tracing::debug!(message = "sheet.release", dy, vy, decision = ?decision);
        match decision {
            ReleaseDecision::Close => {
                // The owner's visibility flip drives the close animation.
                self.phase = SheetPhase::Open;
                self.request_close();
            }
            ReleaseDecision::Snap(point) => self.snap_to(point),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
