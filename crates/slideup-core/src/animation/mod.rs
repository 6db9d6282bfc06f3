#![forbid(unsafe_code)]

//! Animation primitives: easing curves, the [`Animation`] trait, and
//! composition helpers.
//!
//! Everything here is deterministic and clock-free. Callers advance
//! animations with explicit `tick(dt)` calls from their own frame loop, which
//! keeps tests exact and lets the host decide the frame budget.
//!
//! # Invariants
//!
//! 1. Easing functions clamp their input to [0.0, 1.0] and map 0 → 0, 1 → 1.
//! 2. `tick()` on a complete animation is a no-op.
//! 3. `reset()` returns an animation to its initial state.
//!
//! # Failure Modes
//!
//! - Zero duration: completes on the first tick.

use std::time::Duration;

mod parallel;
mod tween;

pub use parallel::{Parallel, parallel};
pub use tween::Tween;

/// A time-driven animation producing a scalar value.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current value. Interpretation is up to the implementor.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time consumed past the end of the animation on the completing tick.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Easing curve mapping normalized time to normalized progress.
pub type EasingFn = fn(f32) -> f32;

/// Identity curve.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (accelerating).
#[inline]
#[must_use]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (decelerating).
#[inline]
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic S-curve.
#[inline]
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

/// Cubic ease-out. Softer landing than [`ease_out`].
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
