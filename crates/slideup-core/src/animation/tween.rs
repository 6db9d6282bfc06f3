#![forbid(unsafe_code)]

//! Tween: a retargetable scalar interpolation driver.
//!
//! A [`Tween`] holds a current value and, while running, eases it from the
//! value it had when the animation started toward a target over a fixed
//! duration.
//!
//! # Retargeting
//!
//! Calling [`Tween::animate_to`] while another animation is in flight does not
//! cancel anything explicitly: the new command restarts from wherever the
//! value currently is, so the latest target always wins.
//!
//! [`Tween::set_value`] jumps immediately and stops any running animation.
//! This is what pointer tracking uses.
//!
//! # Invariants
//!
//! 1. When not running, `value() == target()`, unless `set_value` moved it.
//! 2. `advance()` returns `true` exactly once per animation, on the tick
//!    where it lands on the target.
//! 3. A zero-duration animation lands on its first tick.

use std::time::Duration;

use super::{Animation, EasingFn, ease_out};

/// Scalar tween with last-writer-wins retargeting.
#[derive(Debug, Clone)]
pub struct Tween {
    initial: f32,
    from: f32,
    target: f32,
    current: f32,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
    running: bool,
    overshoot: Duration,
}

impl Tween {
    /// Create a tween resting at `value`.
    #[must_use]
    pub fn at(value: f32) -> Self {
        Self {
            initial: value,
            from: value,
            target: value,
            current: value,
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            easing: ease_out,
            running: false,
            overshoot: Duration::ZERO,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Replace the easing curve used by subsequent animations.
    pub fn set_easing(&mut self, easing: EasingFn) {
        self.easing = easing;
    }

    /// Start animating from the current value toward `target`.
    pub fn animate_to(&mut self, target: f32, duration: Duration) {
        self.from = self.current;
        self.target = target;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.overshoot = Duration::ZERO;
        self.running = true;
    }

    /// Jump to `value`, stopping any animation in flight.
    pub fn set_value(&mut self, value: f32) {
        self.from = value;
        self.target = value;
        self.current = value;
        self.elapsed = Duration::ZERO;
        self.overshoot = Duration::ZERO;
        self.running = false;
    }

    /// Advance by `dt`. Returns `true` on the tick the animation lands.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.overshoot = self.elapsed - self.duration;
            self.current = self.target;
            self.running = false;
            return true;
        }
        let t = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        self.current = self.from + (self.target - self.from) * (self.easing)(t);
        false
    }

    /// The current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// The value this tween is heading toward (or resting at).
    #[inline]
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether an animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Duration of the current (or last) animation.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        !self.running
    }

    fn value(&self) -> f32 {
        self.current
    }

    fn reset(&mut self) {
        self.set_value(self.initial);
    }

    fn overshoot(&self) -> Duration {
        self.overshoot
    }
}
