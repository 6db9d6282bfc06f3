#![forbid(unsafe_code)]

//! Draggable bottom sheet: snap points, release classification, and the
//! visibility-driven controller.
//!
//! The controller is headless. It owns two animated values (the sheet's
//! vertical offset from the top of the viewport and the backdrop opacity) and
//! a discrete snap state; the host reads those values each frame and renders
//! however it likes.
//!
//! ```ignore
//! use slideup_sheet::{SheetConfig, SheetController};
//!
//! let mut sheet = SheetController::new(800.0, SheetConfig::default())
//!     .on_close(|| println!("close requested"));
//! sheet.set_visible(true);
//! sheet.tick(std::time::Duration::from_millis(16));
//! let y = sheet.translate_offset();
//! ```

pub mod classify;
pub mod config;
pub mod controller;
pub mod snap;

pub use classify::{ReleaseDecision, classify_release, live_offset};
pub use config::{SheetConfig, SheetConfigError, SheetEasing};
pub use controller::{SheetController, SheetPhase};
pub use snap::{SnapPoint, SnapPoints};
