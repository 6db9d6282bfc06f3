#![forbid(unsafe_code)]

//! Collaborators a sheet host typically wires in next to the controller.
//!
//! - [`speed`]: periodic network-speed sampling behind a pluggable sampler.
//! - [`chat`]: a message/response session behind a pluggable responder.
//!
//! Both are host-driven. Nothing here spawns threads or owns a clock; the
//! caller passes timestamps in.

pub mod chat;
pub mod speed;

pub use chat::{ChatError, ChatMessage, ChatResponder, ChatSession, FallbackResponder, KeywordResponder};
#[cfg(feature = "simulated")]
pub use speed::SimulatedSampler;
pub use speed::{
    AlwaysConnected, ConnectivityProbe, NetworkSpeed, SpeedError, SpeedMonitor, SpeedSampler,
    format_speed,
};
