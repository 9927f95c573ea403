//! Property-based tests for the layout pipeline using proptest.
//!
//! These verify invariants that must hold for *any* reasonable day of
//! appointments, not just the fixed scenarios in `layout_tests.rs`.

use calgrid_engine::config::{LayoutConfig, GAP_Y, MINIMUM_EVENT_HEIGHT};
use calgrid_engine::{layout, layout_day, Appointment, TimeMapper};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn appointment(i: usize, start_min: i64, duration_min: i64) -> Appointment {
    let midnight = day().and_hms_opt(0, 0, 0).unwrap();
    let start = midnight + Duration::minutes(start_min);
    Appointment::new(format!("e{i}"), start, start + Duration::minutes(duration_min))
}

/// Up to ten appointments starting anywhere in the day, 1 minute to 4 hours
/// long. Late starts run into midnight and are clipped by `layout`.
fn arb_day_events() -> impl Strategy<Value = Vec<Appointment>> {
    prop::collection::vec((0i64..1440, 1i64..=240), 0..=10).prop_map(|shapes| {
        shapes
            .into_iter()
            .enumerate()
            .map(|(i, (start, dur))| appointment(i, start, dur))
            .collect()
    })
}

fn arb_density() -> impl Strategy<Value = f64> {
    1.0f64..=3.0
}

/// `k` appointments that all contain the instant `pivot`.
fn arb_mutual_overlap() -> impl Strategy<Value = Vec<Appointment>> {
    (600i64..=900, prop::collection::vec((0i64..120, 1i64..120), 1..=8)).prop_map(
        |(pivot, offsets)| {
            offsets
                .into_iter()
                .enumerate()
                .map(|(i, (before, after))| {
                    let start = pivot - before;
                    appointment(i, start, before + after)
                })
                .collect()
        },
    )
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Rectangles sharing a lane never overlap vertically
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn same_lane_rectangles_do_not_overlap(
        events in arb_day_events(),
        density in arb_density(),
    ) {
        let result = layout(&events, density, &LayoutConfig::default());
        for (i, a) in result.iter().enumerate() {
            for b in &result[i + 1..] {
                if a.lane == b.lane {
                    prop_assert!(
                        a.bottom() <= b.top || b.bottom() <= a.top,
                        "{} [{}, {}) overlaps {} [{}, {}) in lane {}",
                        a.event.id, a.top, a.bottom(), b.event.id, b.top, b.bottom(), a.lane
                    );
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Height floor (unless clipped at the day bottom) and day bounds
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn heights_and_bounds_hold(
        events in arb_day_events(),
        density in arb_density(),
    ) {
        let day_height = TimeMapper::new(density).day_height();
        let result = layout(&events, density, &LayoutConfig::default());

        prop_assert_eq!(result.len(), events.len());
        for p in &result {
            prop_assert!(
                p.height >= MINIMUM_EVENT_HEIGHT || p.bottom() == day_height - GAP_Y,
                "{} is {}px tall and ends at {}",
                p.event.id, p.height, p.bottom()
            );
            prop_assert!(p.top >= 0);
            prop_assert!(p.bottom() <= day_height);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Tops are non-decreasing within a lane (sweep order)
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn tops_non_decreasing_per_lane(
        events in arb_day_events(),
        density in arb_density(),
    ) {
        let result = layout(&events, density, &LayoutConfig::default());
        let lanes = result.iter().map(|p| p.lane + 1).max().unwrap_or(0);
        for lane in 0..lanes {
            let tops: Vec<i32> = result.iter().filter(|p| p.lane == lane).map(|p| p.top).collect();
            for pair in tops.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Determinism
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn layout_is_deterministic(
        events in arb_day_events(),
        density in arb_density(),
    ) {
        let cfg = LayoutConfig::default();
        let first = layout(&events, density, &cfg);
        let second = layout(&events, density, &cfg);
        prop_assert_eq!(first, second);

        let bucketed_a = layout_day(&events, day(), density, &cfg).unwrap();
        let bucketed_b = layout_day(&events, day(), density, &cfg).unwrap();
        prop_assert_eq!(bucketed_a, bucketed_b);
    }
}

// ---------------------------------------------------------------------------
// Property 5: k mutually overlapping events use exactly k lanes
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn mutual_overlap_uses_exactly_k_lanes(events in arb_mutual_overlap()) {
        let k = events.len();
        let result = layout(&events, 1.0, &LayoutConfig::default());

        let mut lanes: Vec<usize> = result.iter().map(|p| p.lane).collect();
        lanes.sort_unstable();
        prop_assert_eq!(lanes, (0..k).collect::<Vec<_>>());
        for p in &result {
            prop_assert_eq!(p.cluster_lane_count, k);
            prop_assert!((p.width_percent * k as f64 - 100.0).abs() < 1e-9);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Lane columns stay inside the day column
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn lane_columns_fit_horizontally(
        events in arb_day_events(),
        density in arb_density(),
    ) {
        let result = layout(&events, density, &LayoutConfig::default());
        for p in &result {
            prop_assert!(p.lane < p.cluster_lane_count);
            prop_assert!(p.left_percent + p.width_percent <= 100.0 + 1e-9);
        }
    }
}
