//! Property-based invariant tests for viewport derivation.
//!
//! 1. Accepted sizes always satisfy the configured minimums.
//! 2. The column band never exceeds `max_width` or the padded width.
//! 3. The column band is centered (`offset * 2 + display_width <= width`).
//! 4. Rejected sizes report the limits that were violated.
//! 5. No panics on extreme u16 values.

use gmip_core::geometry::{CHROME_ROWS, Viewport, ViewportLimits};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn limits_strategy() -> impl Strategy<Value = ViewportLimits> {
    (0u16..=20, 1u16..=400).prop_map(|(padding, max_width)| {
        ViewportLimits::default()
            .padding(padding)
            .max_width(max_width)
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Accepted sizes satisfy the minimums
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn accepted_sizes_meet_minimums(
        width in 0u16..=1000,
        height in 0u16..=1000,
        limits in limits_strategy(),
    ) {
        if let Ok(viewport) = Viewport::new(width, height, &limits) {
            prop_assert!(viewport.width() >= limits.required_width());
            prop_assert!(viewport.height() >= limits.min_height);
            prop_assert_eq!(viewport.content_height(), height - CHROME_ROWS);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Column band bounds and centering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn band_is_bounded_and_centered(
        width in 0u16..=1000,
        height in 8u16..=200,
        limits in limits_strategy(),
    ) {
        if let Ok(viewport) = Viewport::new(width, height, &limits) {
            let dw = viewport.display_width();
            prop_assert!(dw >= 1);
            prop_assert!(dw <= limits.max_width);
            prop_assert!(dw <= width - 2 * limits.padding);
            prop_assert!(viewport.offset() * 2 + dw <= width);
            prop_assert!(width - (viewport.offset() * 2 + dw) <= 1);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Rejections carry the violated limits
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rejection_reports_limits(
        width in 0u16..=100,
        height in 0u16..=100,
        limits in limits_strategy(),
    ) {
        match Viewport::new(width, height, &limits) {
            Ok(_) => {}
            Err(err) => {
                prop_assert_eq!(err.width, width);
                prop_assert_eq!(err.height, height);
                prop_assert_eq!(err.min_width, limits.required_width());
                prop_assert_eq!(err.min_height, limits.min_height);
                prop_assert!(width < err.min_width || height < err.min_height);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Extreme values
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_panic_on_extreme_sizes(width in any::<u16>(), height in any::<u16>()) {
        let _ = Viewport::new(width, height, &ViewportLimits::default());
    }
}
