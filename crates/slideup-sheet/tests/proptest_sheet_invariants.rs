//! Property-based invariant tests for sheet drag handling.
//!
//! 1. The live offset never leaves [viewport - full, viewport]
//! 2. A fast flick decides the release regardless of position
//! 3. Slow releases follow the position bands around half
//! 4. Tapping the backdrop invokes the close callback exactly once per tap

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use slideup_core::gesture::PanHandler;
use slideup_sheet::{
    ReleaseDecision, SheetConfig, SheetController, SnapPoint, SnapPoints, classify_release,
    live_offset,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn viewport() -> impl Strategy<Value = f32> {
    100.0f32..4000.0
}

fn resting_point() -> impl Strategy<Value = SnapPoint> {
    prop_oneof![Just(SnapPoint::Half), Just(SnapPoint::Full)]
}

fn points(h: f32) -> (SnapPoints, SheetConfig) {
    let cfg = SheetConfig::default();
    (SnapPoints::from_viewport(h, &cfg), cfg)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Clamp
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn live_offset_is_always_clamped(
        h in viewport(),
        point in resting_point(),
        dy in -100_000.0f32..100_000.0,
    ) {
        let (p, _) = points(h);
        let off = live_offset(&p, point, dy);
        prop_assert!(off >= p.min_offset());
        prop_assert!(off <= p.max_offset());
    }

    #[test]
    fn controller_offset_is_always_clamped(
        h in viewport(),
        moves in prop::collection::vec(-20_000.0f32..20_000.0, 1..30),
    ) {
        let mut sheet = SheetController::new(h, SheetConfig::default());
        sheet.set_visible(true);
        sheet.tick(Duration::from_millis(400));
        let p = *sheet.snap_points();
        sheet.on_start();
        for dy in moves {
            sheet.on_move(dy);
            prop_assert!(sheet.translate_offset() >= p.min_offset());
            prop_assert!(sheet.translate_offset() <= p.max_offset());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Velocity precedence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fast_downward_flick_always_closes(
        h in viewport(),
        point in resting_point(),
        dy in -5000.0f32..5000.0,
        vy in 1.01f32..50.0,
    ) {
        let (p, cfg) = points(h);
        prop_assert_eq!(classify_release(&p, point, dy, vy, &cfg), ReleaseDecision::Close);
    }

    #[test]
    fn fast_upward_flick_always_snaps_full(
        h in viewport(),
        point in resting_point(),
        dy in -5000.0f32..5000.0,
        vy in -50.0f32..-1.01,
    ) {
        let (p, cfg) = points(h);
        prop_assert_eq!(
            classify_release(&p, point, dy, vy, &cfg),
            ReleaseDecision::Snap(SnapPoint::Full)
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Position bands
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slow_release_follows_bands(
        h in viewport(),
        point in resting_point(),
        dy in -5000.0f32..5000.0,
        vy in -1.0f32..=1.0,
    ) {
        let (p, cfg) = points(h);
        let visible = p.viewport() - (p.offset_for(point) + dy);
        let lo = p.half() * cfg.close_band;
        let hi = p.half() * cfg.full_band;
        // Skip samples too close to a band edge for f32 to agree.
        prop_assume!((visible - lo).abs() > 0.01 && (visible - hi).abs() > 0.01);

        let expected = if visible < lo {
            ReleaseDecision::Close
        } else if visible > hi {
            ReleaseDecision::Snap(SnapPoint::Full)
        } else {
            ReleaseDecision::Snap(SnapPoint::Half)
        };
        prop_assert_eq!(classify_release(&p, point, dy, vy, &cfg), expected);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Backdrop
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn backdrop_taps_are_counted_exactly(taps in 0u32..20, full in any::<bool>()) {
        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);
        let mut sheet = SheetController::new(800.0, SheetConfig::default())
            .on_close(move || c.set(c.get() + 1));
        sheet.set_visible(true);
        if full {
            sheet.snap_to(SnapPoint::Full);
        }
        for _ in 0..taps {
            sheet.on_backdrop_tap();
        }
        prop_assert_eq!(count.get(), taps);
    }
}
