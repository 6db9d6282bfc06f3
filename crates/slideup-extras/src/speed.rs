#![forbid(unsafe_code)]

//! Network speed sampling.
//!
//! A [`SpeedMonitor`] polls a [`SpeedSampler`] on a fixed interval while
//! monitoring is on. The host calls [`SpeedMonitor::poll`] from its frame or
//! timer loop and gets a fresh [`NetworkSpeed`] back when one is due.
//!
//! # Failure Modes
//!
//! - A sampler error is logged and the previous reading is kept.
//! - When the probe reports no connectivity, the reading is zero in both
//!   directions rather than an error.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

/// Default interval between samples while monitoring.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(3);

/// One speed reading, in megabits per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSpeed {
    pub upload_mbps: f32,
    pub download_mbps: f32,
    pub measured_at: Instant,
}

impl NetworkSpeed {
    /// A zero reading taken at `at`.
    #[must_use]
    pub fn zero(at: Instant) -> Self {
        Self {
            upload_mbps: 0.0,
            download_mbps: 0.0,
            measured_at: at,
        }
    }
}

/// Format a speed for display: below 1 Mbps as whole KB/s, otherwise one
/// decimal of MB/s.
#[must_use]
pub fn format_speed(mbps: f32) -> String {
    if mbps < 1.0 {
        format!("{:.0} KB/s", mbps * 1000.0)
    } else {
        format!("{mbps:.1} MB/s")
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from sampling.
#[derive(Debug)]
pub enum SpeedError {
    /// The connectivity probe itself failed.
    Probe(String),
    /// The measurement failed after connectivity was confirmed.
    Measure(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for SpeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe(msg) => write!(f, "connectivity probe failed: {msg}"),
            Self::Measure(e) => write!(f, "speed measurement failed: {e}"),
        }
    }
}

impl std::error::Error for SpeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Probe(_) => None,
            Self::Measure(e) => Some(e.as_ref()),
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Answers whether the device currently has a network connection.
pub trait ConnectivityProbe {
    fn is_connected(&mut self) -> Result<bool, SpeedError>;
}

/// A probe that always reports a connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConnected;

impl ConnectivityProbe for AlwaysConnected {
    fn is_connected(&mut self) -> Result<bool, SpeedError> {
        Ok(true)
    }
}

impl<F> ConnectivityProbe for F
where
    F: FnMut() -> bool,
{
    fn is_connected(&mut self) -> Result<bool, SpeedError> {
        Ok(self())
    }
}

/// Produces a speed reading on demand.
pub trait SpeedSampler {
    fn sample(&mut self, at: Instant) -> Result<NetworkSpeed, SpeedError>;
}

// ---------------------------------------------------------------------------
// Simulated sampler
// ---------------------------------------------------------------------------

#[cfg(feature = "simulated")]
pub use simulated::SimulatedSampler;

#[cfg(feature = "simulated")]
mod simulated {
    use rand::Rng;
    use web_time::Instant;

    use super::{ConnectivityProbe, NetworkSpeed, SpeedError, SpeedSampler};

    /// Download range in Mbps.
    const DOWNLOAD: std::ops::Range<f32> = 10.0..60.0;
    /// Upload range in Mbps.
    const UPLOAD: std::ops::Range<f32> = 5.0..25.0;

    /// Sampler that draws plausible speeds from an RNG instead of measuring.
    #[derive(Debug, Clone)]
    pub struct SimulatedSampler<R, P> {
        rng: R,
        probe: P,
    }

    impl<R: Rng, P: ConnectivityProbe> SimulatedSampler<R, P> {
        #[must_use]
        pub fn new(rng: R, probe: P) -> Self {
            Self { rng, probe }
        }
    }

    impl<R: Rng, P: ConnectivityProbe> SpeedSampler for SimulatedSampler<R, P> {
        fn sample(&mut self, at: Instant) -> Result<NetworkSpeed, SpeedError> {
            if !self.probe.is_connected()? {
                return Ok(NetworkSpeed::zero(at));
            }
            Ok(NetworkSpeed {
                upload_mbps: self.rng.random_range(UPLOAD),
                download_mbps: self.rng.random_range(DOWNLOAD),
                measured_at: at,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

/// Interval-driven wrapper around a [`SpeedSampler`].
#[derive(Debug)]
pub struct SpeedMonitor<S> {
    sampler: S,
    interval: Duration,
    next_due: Option<Instant>,
    latest: Option<NetworkSpeed>,
}

impl<S: SpeedSampler> SpeedMonitor<S> {
    /// Create a stopped monitor with the default 3 s interval.
    #[must_use]
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            interval: SAMPLE_INTERVAL,
            next_due: None,
            latest: None,
        }
    }

    /// Set the sampling interval (builder pattern).
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start monitoring. Samples immediately, then every interval.
    ///
    /// Starting an already running monitor restarts its schedule.
    pub fn start(&mut self, now: Instant) -> Option<NetworkSpeed> {
        self.next_due = Some(now);
        self.poll(now)
    }

    /// Stop monitoring. The last reading is kept.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Take a sample if one is due.
    ///
    /// If the next due time is not representable the schedule stops after
    /// this sample.
    pub fn poll(&mut self, now: Instant) -> Option<NetworkSpeed> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        self.next_due = now.checked_add(self.interval);
        self.measure(now)
    }

    /// Sample right now, outside the schedule.
    pub fn measure(&mut self, now: Instant) -> Option<NetworkSpeed> {
        match self.sampler.sample(now) {
            Ok(speed) => {
                tracing::debug!(
                    message = "speed.sample",
                    upload_mbps = speed.upload_mbps,
                    download_mbps = speed.download_mbps
                );
                self.latest = Some(speed);
                Some(speed)
            }
            Err(e) => {
                tracing::warn!(message = "speed.error", error = %e);
                None
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn is_monitoring(&self) -> bool {
        self.next_due.is_some()
    }

    /// The most recent successful reading.
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<NetworkSpeed> {
        self.latest
    }

    #[inline]
    #[must_use]
    pub fn sampler(&self) -> &S {
        &self.sampler
    }
}
