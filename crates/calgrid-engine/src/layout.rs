//! The layout pipeline: sort → lane sweep → geometry.
//!
//! [`layout`] is the pure core for an event list already bucketed into one
//! day. [`layout_day`] and [`layout_week`] are the view-level callers: they
//! validate input, bucket and clip events to each date's midnight-to-midnight
//! window, and then run the same pipeline.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use crate::config::{LayoutConfig, MalformedPolicy, MINUTES_PER_DAY};
use crate::error::{LayoutError, Result};
use crate::event::TimedEvent;
use crate::geometry::{compose, Placement, PositionedEvent};
use crate::lanes::assign_lanes;
use crate::mapper::{minutes_from_midnight, TimeMapper};

/// One day column of a week view.
#[derive(Debug)]
pub struct DayColumn<'a, E> {
    pub date: NaiveDate,
    pub events: Vec<PositionedEvent<'a, E>>,
}

fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

fn run<'a, E>(
    placements: &[Placement<'a, E>],
    intervals: &[(NaiveDateTime, NaiveDateTime)],
    density: f64,
    config: &LayoutConfig,
) -> Vec<PositionedEvent<'a, E>> {
    let mapper = TimeMapper::new(density);
    let assignments = assign_lanes(intervals);
    let positioned = compose(placements, &assignments, &mapper, config);
    debug!(
        events = positioned.len(),
        max_lanes = assignments
            .iter()
            .map(|a| a.cluster_lane_count)
            .max()
            .unwrap_or(0),
        density,
        "laid out events"
    );
    positioned
}

/// Lay out events that all belong to one day column.
///
/// Vertical positions come from each event's wall-clock start; an event
/// running past midnight is cut off at the bottom of the column. Events with
/// `end <= start` are treated as zero-duration, so the height floor applies.
///
/// The output is in sweep order (ascending start, ties in input order) and
/// holds exactly one rectangle per input event.
pub fn layout<'a, E: TimedEvent>(
    events: &'a [E],
    density: f64,
    config: &LayoutConfig,
) -> Vec<PositionedEvent<'a, E>> {
    let mut placements = Vec::with_capacity(events.len());
    let mut intervals = Vec::with_capacity(events.len());
    for event in events {
        let start = event.start();
        let end = event.end().max(start);
        let start_minutes = minutes_from_midnight(start.time());
        let until_midnight = f64::from(MINUTES_PER_DAY) - start_minutes;
        placements.push(Placement {
            event,
            start_minutes,
            duration_minutes: minutes_between(start, end).min(until_midnight),
        });
        intervals.push((start, end));
    }
    run(&placements, &intervals, density, config)
}

/// Lay out the part of `events` that falls on `date`.
///
/// Events are clipped to the date's `[00:00, 24:00)` window, so an event
/// crossing midnight appears in both day columns. Malformed events are
/// handled according to `config.malformed`.
///
/// # Errors
/// Returns `LayoutError::InvalidConfig` if `config` does not validate.
/// Returns `LayoutError::MalformedEvent` for the first malformed event on
/// `date` when the policy is [`MalformedPolicy::Reject`].
pub fn layout_day<'a, E: TimedEvent>(
    events: &'a [E],
    date: NaiveDate,
    density: f64,
    config: &LayoutConfig,
) -> Result<Vec<PositionedEvent<'a, E>>> {
    config.validate()?;

    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = date
        .succ_opt()
        .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));

    let mut placements = Vec::new();
    let mut intervals = Vec::new();
    for event in events {
        let (start, end) = (event.start(), event.end());

        if event.is_malformed() {
            if start < day_start || start >= day_end {
                continue;
            }
            match config.malformed {
                MalformedPolicy::Reject => {
                    return Err(LayoutError::MalformedEvent {
                        id: event.id().to_string(),
                        start,
                        end,
                    });
                }
                MalformedPolicy::Drop => {
                    warn!(id = event.id(), %start, %end, "dropping event with end <= start");
                    continue;
                }
                MalformedPolicy::ClampToMinimum => {
                    warn!(id = event.id(), %start, %end, "laying out event with end <= start as zero-duration");
                    placements.push(Placement {
                        event,
                        start_minutes: minutes_between(day_start, start),
                        duration_minutes: 0.0,
                    });
                    intervals.push((start, start));
                    continue;
                }
            }
        }

        if start >= day_end || end <= day_start {
            continue;
        }
        let start = start.max(day_start);
        let end = end.min(day_end);
        placements.push(Placement {
            event,
            start_minutes: minutes_between(day_start, start),
            duration_minutes: minutes_between(start, end),
        });
        intervals.push((start, end));
    }

    Ok(run(&placements, &intervals, density, config))
}

/// Lay out seven consecutive day columns starting at `first_day`.
///
/// # Errors
/// Same conditions as [`layout_day`].
pub fn layout_week<'a, E: TimedEvent>(
    events: &'a [E],
    first_day: NaiveDate,
    density: f64,
    config: &LayoutConfig,
) -> Result<Vec<DayColumn<'a, E>>> {
    first_day
        .iter_days()
        .take(7)
        .map(|date| {
            Ok(DayColumn {
                date,
                events: layout_day(events, date, density, config)?,
            })
        })
        .collect()
}
