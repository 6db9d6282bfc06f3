#![forbid(unsafe_code)]

//! Parallel composition of two animations.

use std::time::Duration;

use super::Animation;

/// Two animations ticked together. Complete when both are complete.
///
/// `value()` reports the first animation's value; use [`Parallel::first`]
/// and [`Parallel::second`] to read each side.
#[derive(Debug, Clone)]
pub struct Parallel<A, B> {
    a: A,
    b: B,
}

/// Run `a` and `b` concurrently.
#[must_use]
pub fn parallel<A: Animation, B: Animation>(a: A, b: B) -> Parallel<A, B> {
    Parallel { a, b }
}

impl<A, B> Parallel<A, B> {
    /// Borrow the first animation.
    #[must_use]
    pub fn first(&self) -> &A {
        &self.a
    }

    /// Borrow the second animation.
    #[must_use]
    pub fn second(&self) -> &B {
        &self.b
    }

    /// Mutably borrow both animations.
    pub fn parts_mut(&mut self) -> (&mut A, &mut B) {
        (&mut self.a, &mut self.b)
    }
}

impl<A: Animation, B: Animation> Animation for Parallel<A, B> {
    fn tick(&mut self, dt: Duration) {
        if !self.a.is_complete() {
            self.a.tick(dt);
        }
        if !self.b.is_complete() {
            self.b.tick(dt);
        }
    }

    fn is_complete(&self) -> bool {
        self.a.is_complete() && self.b.is_complete()
    }

    fn value(&self) -> f32 {
        self.a.value()
    }

    fn reset(&mut self) {
        self.a.reset();
        self.b.reset();
    }

    fn overshoot(&self) -> Duration {
        self.a.overshoot().min(self.b.overshoot())
    }
}
