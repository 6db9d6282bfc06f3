#![forbid(unsafe_code)]

//! Core: motion and pointer primitives for slideup.
//!
//! # Role in slideup
//! `slideup-core` is the input and timing layer. It owns the interpolation
//! driver used for every animated value and the pan recognizer that turns raw
//! pointer samples into a claimed vertical drag with a release velocity.
//!
//! # Primary responsibilities
//! - **Animation**: the [`animation::Animation`] trait, easing curves,
//!   [`animation::Tween`], and parallel composition.
//! - **Gesture**: [`gesture::PanRecognizer`], [`gesture::VelocityTracker`],
//!   and the [`gesture::PanHandler`] seam consumed by widgets.
//!
//! # How it fits in the system
//! `slideup-sheet` implements [`gesture::PanHandler`] for its controller and
//! drives its offsets with [`animation::Tween`]. Nothing here knows about
//! sheets, snap points, or backdrops.

pub mod animation;
pub mod gesture;
