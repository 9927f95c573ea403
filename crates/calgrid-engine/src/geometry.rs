//! Final rectangle composition from lane assignments and time mapping.
//!
//! Each lane keeps a bottom watermark for the duration of one layout pass.
//! A rectangle is pulled up by `gap_y` so consecutive events show a seam, then
//! pushed back down below the watermark if the height floor of the previous
//! event in the same lane would otherwise overlap it.
//!
//! The bottom of the day outranks the height floor: a rectangle that cannot
//! fit below its lane's watermark is clipped, down to zero height at
//! `day_height - gap_y`, rather than drawn over its predecessor.

use crate::config::LayoutConfig;
use crate::lanes::LaneAssignment;
use crate::mapper::TimeMapper;

/// An event's vertical extent in minutes relative to the column's midnight.
#[derive(Debug)]
pub struct Placement<'a, E> {
    pub event: &'a E,
    pub start_minutes: f64,
    pub duration_minutes: f64,
}

impl<E> Clone for Placement<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Placement<'_, E> {}

/// A laid-out rectangle ready for the grid renderer.
#[derive(Debug, PartialEq)]
pub struct PositionedEvent<'a, E> {
    pub event: &'a E,
    pub top: i32,
    pub height: i32,
    /// Left edge of the lane column as a percentage of the day column.
    pub left_percent: f64,
    pub width_percent: f64,
    /// Pixel inset applied on each side of the lane column.
    pub inset_px: f64,
    pub lane: usize,
    pub cluster_lane_count: usize,
}

impl<E> Clone for PositionedEvent<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for PositionedEvent<'_, E> {}

impl<E> PositionedEvent<'_, E> {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Resolve the percentage column and inset into `(left, width)` pixels
    /// for a day column `column_width` pixels wide.
    pub fn horizontal_px(&self, column_width: f64) -> (f64, f64) {
        let left = column_width * self.left_percent / 100.0 + self.inset_px;
        let width = column_width * self.width_percent / 100.0 - 2.0 * self.inset_px;
        (left, width.max(0.0))
    }
}

/// Turn placements and their lane assignments into rectangles.
///
/// `assignments` must be in sweep order and index into `placements`; the
/// output keeps that order.
pub fn compose<'a, E>(
    placements: &[Placement<'a, E>],
    assignments: &[LaneAssignment],
    mapper: &TimeMapper,
    config: &LayoutConfig,
) -> Vec<PositionedEvent<'a, E>> {
    let gap_y = config.gap_y;
    let limit = mapper.day_height() - gap_y;
    let lane_count = assignments.iter().map(|a| a.lane + 1).max().unwrap_or(0);
    let mut watermark = vec![0i32; lane_count];

    assignments
        .iter()
        .map(|assignment| {
            let placement = &placements[assignment.index];
            let lane = assignment.lane;

            let base_top = mapper.offset_for_minutes(placement.start_minutes);
            let mut top = (base_top - gap_y).max(0);
            let mut height = mapper
                .offset_for_minutes(placement.duration_minutes.max(0.0))
                .max(config.minimum_event_height);

            let lowest_free = watermark[lane] + gap_y;
            if top < lowest_free {
                top = lowest_free;
            }

            // Near the bottom of the day: lift no higher than the previous
            // event in the lane allows, then cut the height.
            if top + height > limit {
                let lifted = (limit - height).max(0);
                top = lifted.max(lowest_free).min(limit.max(0));
                height = height.min((limit - top).max(0));
            }

            watermark[lane] = top + height;

            let count = assignment.cluster_lane_count.max(1);
            let width_percent = 100.0 / count as f64;
            PositionedEvent {
                event: placement.event,
                top,
                height,
                left_percent: width_percent * lane as f64,
                width_percent,
                inset_px: config.gap_x,
                lane,
                cluster_lane_count: count,
            }
        })
        .collect()
}
