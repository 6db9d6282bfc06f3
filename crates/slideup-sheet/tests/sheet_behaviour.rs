//! End-to-end sheet behaviour driven through the pan recognizer.
//!
//! Raw pointer samples go through [`PanRecognizer::feed`] into the controller,
//! the same path a host event loop uses.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use slideup_core::gesture::{PanInput, PanRecognizer};
use slideup_sheet::{SheetConfig, SheetController, SheetPhase, SnapPoint};
use web_time::Instant;

const H: f32 = 1000.0;
const SETTLE: Duration = Duration::from_millis(400);

struct Rig {
    sheet: SheetController,
    pan: PanRecognizer,
    closes: Rc<Cell<u32>>,
    t0: Instant,
}

impl Rig {
    fn open() -> Self {
        let config = SheetConfig::default();
        let pan = PanRecognizer::new(config.pan_config());
        let closes = Rc::new(Cell::new(0));
        let c = Rc::clone(&closes);
        let mut sheet = SheetController::new(H, config).on_close(move || c.set(c.get() + 1));
        sheet.set_visible(true);
        sheet.tick(SETTLE);
        Self {
            sheet,
            pan,
            closes,
            t0: Instant::now(),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    /// Press at `y0`, then visit each `(ms, y)` sample, releasing on the last.
    fn drag(&mut self, y0: f32, samples: &[(u64, f32)]) {
        let press = PanInput::Press {
            y: y0,
            at: self.at(0),
        };
        self.pan.feed(&press, &mut self.sheet);
        let Some((&(last_ms, last_y), moves)) = samples.split_last() else {
            return;
        };
        for &(ms, y) in moves {
            let input = PanInput::Move { y, at: self.at(ms) };
            self.pan.feed(&input, &mut self.sheet);
        }
        let release = PanInput::Release {
            y: last_y,
            at: self.at(last_ms),
        };
        self.pan.feed(&release, &mut self.sheet);
    }

    /// A slow drag of `dy` in 5px steps every 16ms.
    fn slow_drag(&mut self, dy: f32) {
        let steps = (dy.abs() / 5.0).ceil() as u64;
        let dir = dy.signum();
        let mut samples: Vec<(u64, f32)> = (1..=steps)
            .map(|i| (i * 16, 500.0 + dir * (i as f32 * 5.0).min(dy.abs())))
            .collect();
        // Hold still before lifting so the release reads as slow.
        if let Some(&(ms, y)) = samples.last() {
            samples.push((ms + 200, y));
        }
        self.drag(500.0, &samples);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Open / close
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn every_open_starts_at_half() {
    let mut rig = Rig::open();
    rig.sheet.snap_to(SnapPoint::Full);
    rig.sheet.tick(SETTLE);
    assert_eq!(rig.sheet.current_snap_point(), SnapPoint::Full);

    rig.sheet.set_visible(false);
    rig.sheet.tick(SETTLE);
    assert_eq!(rig.sheet.phase(), SheetPhase::Closed);

    rig.sheet.set_visible(true);
    rig.sheet.tick(SETTLE);
    assert_eq!(rig.sheet.current_snap_point(), SnapPoint::Half);
    assert_eq!(rig.sheet.translate_offset(), 500.0);
}

#[test]
fn backdrop_tap_requests_close_once_per_tap() {
    let mut rig = Rig::open();
    rig.sheet.on_backdrop_tap();
    assert_eq!(rig.closes.get(), 1);
    rig.sheet.on_backdrop_tap();
    assert_eq!(rig.closes.get(), 2);
}

#[test]
fn owner_close_after_request_animates_out() {
    let mut rig = Rig::open();
    rig.sheet.on_backdrop_tap();
    rig.sheet.set_visible(false);
    rig.sheet.tick(SETTLE);
    assert_eq!(rig.sheet.translate_offset(), H);
    assert_eq!(rig.sheet.backdrop_opacity(), 0.0);
}

// ═══════════════════════════════════════════════════════════════════════
// Drag tracking
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn small_movements_are_not_claimed() {
    let mut rig = Rig::open();
    rig.drag(500.0, &[(16, 504.0), (32, 509.0), (48, 510.0), (64, 506.0)]);
    assert_eq!(rig.sheet.translate_offset(), 500.0);
    assert_eq!(rig.sheet.phase(), SheetPhase::Open);
    assert_eq!(rig.closes.get(), 0);
}

#[test]
fn live_drag_is_clamped() {
    let mut rig = Rig::open();
    let press = PanInput::Press {
        y: 500.0,
        at: rig.at(0),
    };
    rig.pan.feed(&press, &mut rig.sheet);

    let up = PanInput::Move {
        y: 500.0 - 10_000.0,
        at: rig.at(16),
    };
    rig.pan.feed(&up, &mut rig.sheet);
    assert_eq!(rig.sheet.translate_offset(), H - 800.0);

    let down = PanInput::Move {
        y: 500.0 + 10_000.0,
        at: rig.at(32),
    };
    rig.pan.feed(&down, &mut rig.sheet);
    assert_eq!(rig.sheet.translate_offset(), H);
    assert_eq!(rig.sheet.phase(), SheetPhase::Dragging);
}

#[test]
fn cancel_settles_by_position() {
    let mut rig = Rig::open();
    let press = PanInput::Press {
        y: 500.0,
        at: rig.at(0),
    };
    rig.pan.feed(&press, &mut rig.sheet);
    let mv = PanInput::Move {
        y: 540.0,
        at: rig.at(16),
    };
    rig.pan.feed(&mv, &mut rig.sheet);
    rig.pan.feed(&PanInput::Cancel, &mut rig.sheet);
    rig.sheet.tick(SETTLE);
    assert_eq!(rig.sheet.translate_offset(), 500.0);
}

// ═══════════════════════════════════════════════════════════════════════
// Release classification
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn downward_flick_requests_close() {
    let mut rig = Rig::open();
    rig.drag(500.0, &[(10, 520.0), (20, 560.0), (30, 580.0)]);
    assert_eq!(rig.closes.get(), 1);
    // The sheet waits for the owner.
    assert!(rig.sheet.is_visible());
}

#[test]
fn upward_flick_snaps_full() {
    let mut rig = Rig::open();
    rig.drag(500.0, &[(10, 480.0), (20, 440.0), (30, 420.0)]);
    assert_eq!(rig.sheet.current_snap_point(), SnapPoint::Full);
    rig.sheet.tick(SETTLE);
    assert_eq!(rig.sheet.visible_height(), 800.0);
}

#[test]
fn slow_short_drag_returns_to_half() {
    let mut rig = Rig::open();
    rig.slow_drag(60.0);
    rig.sheet.tick(SETTLE);
    assert_eq!(rig.sheet.current_snap_point(), SnapPoint::Half);
    assert_eq!(rig.sheet.translate_offset(), 500.0);
    assert_eq!(rig.closes.get(), 0);
}

#[test]
fn slow_long_drag_down_closes() {
    let mut rig = Rig::open();
    rig.slow_drag(200.0);
    assert_eq!(rig.closes.get(), 1);
}

#[test]
fn slow_long_drag_up_snaps_full() {
    let mut rig = Rig::open();
    rig.slow_drag(-200.0);
    rig.sheet.tick(SETTLE);
    assert_eq!(rig.sheet.current_snap_point(), SnapPoint::Full);
}

#[test]
fn drag_from_full_uses_full_as_base() {
    let mut rig = Rig::open();
    rig.sheet.snap_to(SnapPoint::Full);
    rig.sheet.tick(SETTLE);

    let press = PanInput::Press {
        y: 300.0,
        at: rig.at(0),
    };
    rig.pan.feed(&press, &mut rig.sheet);
    let mv = PanInput::Move {
        y: 350.0,
        at: rig.at(16),
    };
    rig.pan.feed(&mv, &mut rig.sheet);
    assert_eq!(rig.sheet.translate_offset(), 250.0);
}
