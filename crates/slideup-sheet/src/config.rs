#![forbid(unsafe_code)]

//! Sheet configuration: snap fractions, timings, and release thresholds.
//!
//! [`SheetConfig::default()`] reproduces the stock sheet: half and full snap
//! points at 50% and 80% of the viewport, a 300ms open, a 250ms close, a 300ms
//! snap, a 0.5 backdrop, a 10px activation threshold, a 1.0 px/ms flick
//! velocity, and position bands at 70% and 130% of the half height.
//!
//! # Loading
//!
//! With the `config` feature the same struct loads from TOML or JSON. Missing
//! keys take their defaults.
//!
//! ```toml
//! # sheet.toml
//! half_fraction = 0.45
//! open_ms = 200
//! easing = "ease_out_cubic"
//! ```
//!
//! ```rust,ignore
//! let config = SheetConfig::from_toml_file("sheet.toml")?;
//! ```
//!
//! # Velocity units
//!
//! `flick_velocity` is in pixels per millisecond, the unit produced by
//! [`slideup_core::gesture::VelocityTracker`]. Hosts feeding velocities from
//! another source must convert before calling the controller.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use slideup_core::animation::{EasingFn, ease_in, ease_in_out, ease_out, ease_out_cubic, linear};
use slideup_core::gesture::PanConfig;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Named easing curve for sheet animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum SheetEasing {
    /// Constant speed.
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow finish.
    EaseOut,
    /// Quadratic, slow at both ends.
    #[default]
    EaseInOut,
    /// Cubic, slow finish.
    EaseOutCubic,
}

impl SheetEasing {
    /// The curve function.
    #[must_use]
    pub fn curve(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::EaseOutCubic => ease_out_cubic,
        }
    }
}

// ---------------------------------------------------------------------------
// SheetConfig
// ---------------------------------------------------------------------------

/// Tunable parameters for a [`SheetController`](crate::SheetController).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SheetConfig {
    /// Half snap height as a fraction of the viewport. Default: 0.5.
    pub half_fraction: f32,
    /// Full snap height as a fraction of the viewport. Default: 0.8.
    pub full_fraction: f32,
    /// Open animation duration (ms). Default: 300.
    pub open_ms: u64,
    /// Close animation duration (ms). Default: 250.
    pub close_ms: u64,
    /// Snap commit animation duration (ms). Default: 300.
    pub snap_ms: u64,
    /// Backdrop opacity when open. Default: 0.5.
    pub backdrop_opacity: f32,
    /// Release velocity (px/ms) beyond which a gesture is a flick. Default: 1.0.
    pub flick_velocity: f32,
    /// Below `close_band × half` visible height a slow release closes. Default: 0.7.
    pub close_band: f32,
    /// Above `full_band × half` visible height a slow release snaps full. Default: 1.3.
    pub full_band: f32,
    /// Vertical movement (px) a drag must exceed to be claimed. Default: 10.
    pub activation_threshold: f32,
    /// Easing curve for all sheet animations. Default: ease-in-out.
    pub easing: SheetEasing,
    /// Whether a reduced-motion preference collapses durations to zero.
    pub respect_reduced_motion: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            half_fraction: 0.5,
            full_fraction: 0.8,
            open_ms: 300,
            close_ms: 250,
            snap_ms: 300,
            backdrop_opacity: 0.5,
            flick_velocity: 1.0,
            close_band: 0.7,
            full_band: 1.3,
            activation_threshold: 10.0,
            easing: SheetEasing::EaseInOut,
            respect_reduced_motion: true,
        }
    }
}

impl SheetConfig {
    /// Create a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the half and full snap fractions.
    #[must_use]
    pub fn snap_fractions(mut self, half: f32, full: f32) -> Self {
        self.half_fraction = half;
        self.full_fraction = full;
        self
    }

    /// Set open, close, and snap durations.
    #[must_use]
    pub fn durations(mut self, open: Duration, close: Duration, snap: Duration) -> Self {
        self.open_ms = duration_ms(open);
        self.close_ms = duration_ms(close);
        self.snap_ms = duration_ms(snap);
        self
    }

    /// Set the open backdrop opacity.
    #[must_use]
    pub fn backdrop_opacity(mut self, opacity: f32) -> Self {
        self.backdrop_opacity = opacity;
        self
    }

    /// Set the flick velocity threshold (px/ms).
    #[must_use]
    pub fn flick_velocity(mut self, velocity: f32) -> Self {
        self.flick_velocity = velocity;
        self
    }

    /// Set the close and full position bands (multiples of the half height).
    #[must_use]
    pub fn bands(mut self, close: f32, full: f32) -> Self {
        self.close_band = close;
        self.full_band = full;
        self
    }

    /// Set the drag activation threshold (px).
    #[must_use]
    pub fn activation_threshold(mut self, px: f32) -> Self {
        self.activation_threshold = px;
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: SheetEasing) -> Self {
        self.easing = easing;
        self
    }

    /// Set whether to respect reduced-motion preference.
    #[must_use]
    pub fn respect_reduced_motion(mut self, respect: bool) -> Self {
        self.respect_reduced_motion = respect;
        self
    }

    /// Open animation duration.
    #[inline]
    #[must_use]
    pub fn open_duration(&self) -> Duration {
        Duration::from_millis(self.open_ms)
    }

    /// Close animation duration.
    #[inline]
    #[must_use]
    pub fn close_duration(&self) -> Duration {
        Duration::from_millis(self.close_ms)
    }

    /// Snap commit duration.
    #[inline]
    #[must_use]
    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_ms)
    }

    /// Pan recognizer settings derived from this config.
    #[must_use]
    pub fn pan_config(&self) -> PanConfig {
        PanConfig {
            activation_threshold: self.activation_threshold,
            ..PanConfig::default()
        }
    }

    /// Get the effective config, applying reduced motion if needed.
    #[must_use]
    pub fn effective(&self, reduced_motion: bool) -> Self {
        if reduced_motion && self.respect_reduced_motion {
            Self {
                open_ms: 0,
                close_ms: 0,
                snap_ms: 0,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // 0 <= half < full < closed
        if !(self.half_fraction > 0.0 && self.half_fraction < 1.0) {
            errors.push(format!(
                "half_fraction must be in (0, 1), got {}",
                self.half_fraction
            ));
        }
        if !(self.full_fraction > 0.0 && self.full_fraction < 1.0) {
            errors.push(format!(
                "full_fraction must be in (0, 1), got {}",
                self.full_fraction
            ));
        }
        if self.half_fraction >= self.full_fraction {
            errors.push(format!(
                "half_fraction ({}) must be below full_fraction ({})",
                self.half_fraction, self.full_fraction
            ));
        }

        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            errors.push(format!(
                "backdrop_opacity must be in [0, 1], got {}",
                self.backdrop_opacity
            ));
        }

        if !(self.flick_velocity.is_finite() && self.flick_velocity > 0.0) {
            errors.push(format!(
                "flick_velocity must be > 0, got {}",
                self.flick_velocity
            ));
        }

        // Bands straddle the half height.
        if !(self.close_band > 0.0 && self.close_band <= 1.0) {
            errors.push(format!(
                "close_band must be in (0, 1], got {}",
                self.close_band
            ));
        }
        if !(self.full_band.is_finite() && self.full_band >= 1.0) {
            errors.push(format!("full_band must be >= 1, got {}", self.full_band));
        }

        if !(self.activation_threshold.is_finite() && self.activation_threshold >= 0.0) {
            errors.push(format!(
                "activation_threshold must be >= 0, got {}",
                self.activation_threshold
            ));
        }

        errors
    }

    /// Return `self` if valid, otherwise every validation error.
    pub fn validated(self) -> Result<Self, SheetConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SheetConfigError::Invalid(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, SheetConfigError> {
        let config: Self = toml::from_str(s).map_err(SheetConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SheetConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SheetConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, SheetConfigError> {
        let config: Self = serde_json::from_str(s).map_err(SheetConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SheetConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SheetConfigError::Io)?;
        Self::from_json_str(&content)
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when building or loading a sheet configuration.
#[derive(Debug)]
pub enum SheetConfigError {
    /// File could not be read.
    #[cfg(feature = "config")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Parsed, but out of range.
    Invalid(Vec<String>),
}

impl std::fmt::Display for SheetConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "config")]
            Self::Io(e) => write!(f, "failed to read sheet config: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "invalid TOML sheet config: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "invalid JSON sheet config: {e}"),
            Self::Invalid(errors) => {
                write!(f, "invalid sheet config: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SheetConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
