#![forbid(unsafe_code)]

//! Pan recognition: transforms raw pointer samples into a claimed vertical drag.
//!
//! [`PanRecognizer`] is a stateful processor that converts [`PanInput`]
//! samples (press, move, release) into [`PanGesture`]s carrying the
//! cumulative vertical displacement and, on release, the vertical velocity.
//!
//! # State Machine
//!
//! Idle → Tracking (press) → Claimed (|dy| > threshold) → Idle (release).
//!
//! A pointer is only *claimed* once its cumulative vertical movement exceeds
//! [`PanConfig::activation_threshold`] in either direction. Until then moves
//! produce nothing, so taps never reach the handler.
//!
//! # Invariants
//!
//! 1. `Start` is emitted at most once per press, and always before any `Move`.
//! 2. `End` is emitted only for a claimed pointer, exactly once.
//! 3. `dy` is always measured from the press position, never from the
//!    previous sample (`dy > 0` means the pointer moved down).
//! 4. Velocity is in pixels per millisecond.
//! 5. After `reset()`, the recognizer is idle.
//!
//! # Failure Modes
//!
//! - A move without a prior press starts tracking at that sample.
//! - `Cancel` on a claimed pointer ends it with zero velocity so the consumer
//!   settles instead of freezing mid-drag.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for pan recognition.
#[derive(Debug, Clone)]
pub struct PanConfig {
    /// Cumulative vertical movement (px) a pointer must exceed before it is
    /// claimed (default: 10.0).
    pub activation_threshold: f32,
    /// How far back from the latest sample velocity is measured (default: 100ms).
    pub velocity_window: Duration,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            activation_threshold: 10.0,
            velocity_window: Duration::from_millis(100),
        }
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Raw pointer sample in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanInput {
    /// Pointer went down.
    Press { y: f32, at: Instant },
    /// Pointer moved while down.
    Move { y: f32, at: Instant },
    /// Pointer lifted.
    Release { y: f32, at: Instant },
    /// The platform took the pointer away (focus loss, system gesture).
    Cancel,
}

/// Recognized pan gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanGesture {
    /// The pointer crossed the activation threshold.
    Start,
    /// Claimed pointer moved; `dy` is cumulative from the press.
    Move { dy: f32 },
    /// Claimed pointer released with cumulative `dy` and velocity `vy` (px/ms).
    End { dy: f32, vy: f32 },
}

/// Consumer of recognized pan gestures.
///
/// This is the seam between platform input and widget logic: widgets
/// implement it and can be driven directly in tests without any pointer
/// plumbing.
pub trait PanHandler {
    /// The gesture was claimed.
    fn on_start(&mut self) {}

    /// Claimed pointer moved to cumulative displacement `dy`.
    fn on_move(&mut self, dy: f32);

    /// Claimed pointer released.
    fn on_end(&mut self, dy: f32, vy: f32);
}

// ---------------------------------------------------------------------------
// Velocity
// ---------------------------------------------------------------------------

const MAX_VELOCITY_SAMPLES: usize = 20;

/// Estimates vertical pointer velocity from timestamped samples.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(f32, Instant)>,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_VELOCITY_SAMPLES),
        }
    }

    /// Record a position sample.
    pub fn push(&mut self, y: f32, at: Instant) {
        if self.samples.len() == MAX_VELOCITY_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back((y, at));
    }

    /// Velocity in px/ms over the samples within `window` of the latest one.
    ///
    /// Returns 0.0 with fewer than two usable samples or no elapsed time.
    #[must_use]
    pub fn velocity(&self, window: Duration) -> f32 {
        let Some(&(last_y, last_at)) = self.samples.back() else {
            return 0.0;
        };
        let Some(&(first_y, first_at)) = self
            .samples
            .iter()
            .find(|(_, at)| last_at.duration_since(*at) <= window)
        else {
            return 0.0;
        };
        let elapsed_ms = last_at.duration_since(first_at).as_secs_f64() * 1000.0;
        if elapsed_ms <= 0.0 {
            return 0.0;
        }
        ((f64::from(last_y) - f64::from(first_y)) / elapsed_ms) as f32
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of retained samples.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PanRecognizer
// ---------------------------------------------------------------------------

/// Tracks the pointer between press and release.
#[derive(Debug, Clone)]
struct PanTracker {
    start_y: f32,
    last_y: f32,
    claimed: bool,
}

/// Stateful recognizer for vertical pans.
#[derive(Debug, Clone)]
pub struct PanRecognizer {
    config: PanConfig,
    tracker: Option<PanTracker>,
    velocity: VelocityTracker,
}

impl PanRecognizer {
    /// Create a recognizer with the given configuration.
    #[must_use]
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            tracker: None,
            velocity: VelocityTracker::new(),
        }
    }

    /// Process a raw sample, returning any gestures produced.
    ///
    /// The move that claims the pointer yields both `Start` and `Move`.
    pub fn process(&mut self, input: &PanInput) -> Vec<PanGesture> {
        let mut out = Vec::with_capacity(2);
        match *input {
            PanInput::Press { y, at } => {
                self.velocity.clear();
                self.velocity.push(y, at);
                self.tracker = Some(PanTracker {
                    start_y: y,
                    last_y: y,
                    claimed: false,
                });
            }
            PanInput::Move { y, at } => self.on_move(y, at, &mut out),
            PanInput::Release { y, at } => {
                if let Some(tracker) = self.tracker.take()
                    && tracker.claimed
                {
                    self.velocity.push(y, at);
                    let vy = self.velocity.velocity(self.config.velocity_window);
                    out.push(PanGesture::End {
                        dy: y - tracker.start_y,
                        vy,
                    });
                }
                self.velocity.clear();
            }
            PanInput::Cancel => {
                if let Some(tracker) = self.tracker.take()
                    && tracker.claimed
                {
                    out.push(PanGesture::End {
                        dy: tracker.last_y - tracker.start_y,
                        vy: 0.0,
                    });
                }
                self.velocity.clear();
            }
        }
        out
    }

    /// Process a raw sample and dispatch the resulting gestures to `handler`.
    pub fn feed<H: PanHandler + ?Sized>(&mut self, input: &PanInput, handler: &mut H) {
        for gesture in self.process(input) {
            match gesture {
                PanGesture::Start => handler.on_start(),
                PanGesture::Move { dy } => handler.on_move(dy),
                PanGesture::End { dy, vy } => handler.on_end(dy, vy),
            }
        }
    }

    /// Whether the current pointer has been claimed.
    #[inline]
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.tracker.as_ref().is_some_and(|t| t.claimed)
    }

    /// Reset to idle without emitting anything.
    pub fn reset(&mut self) {
        self.tracker = None;
        self.velocity.clear();
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: PanConfig) {
        self.config = config;
    }

    fn on_move(&mut self, y: f32, at: Instant, out: &mut Vec<PanGesture>) {
        self.velocity.push(y, at);

        let Some(ref mut tracker) = self.tracker else {
            self.tracker = Some(PanTracker {
                start_y: y,
                last_y: y,
                claimed: false,
            });
            return;
        };

        tracker.last_y = y;
        let dy = y - tracker.start_y;

        if !tracker.claimed && dy.abs() > self.config.activation_threshold {
            tracker.claimed = true;
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "pan.claim", dy);
            out.push(PanGesture::Start);
        }

        if tracker.claimed {
            out.push(PanGesture::Move { dy });
        }
    }
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new(PanConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
