//! # calgrid-engine
//!
//! Layout engine for vertical day/week calendar grids.
//!
//! Places overlapping appointments into side-by-side lanes and maps wall-clock
//! times to pixel offsets at a zoom-dependent density. The whole pipeline is a
//! pure function of its inputs: events in, positioned rectangles out.
//!
//! ## Modules
//!
//! - [`event`] — `TimedEvent` trait and the `Appointment` record
//! - [`config`] — Density, zoom and gap constants plus serde config structs
//! - [`mapper`] — Wall-clock instant → vertical pixel offset
//! - [`zoom`] — Zoom step, density derivation and pinch gestures
//! - [`lanes`] — Overlap sweep assigning each event a lane
//! - [`geometry`] — Lane + time mapping → final rectangles
//! - [`layout`] — The pipeline and its day/week callers
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod lanes;
pub mod layout;
pub mod mapper;
pub mod zoom;

pub use config::{GridConfig, LayoutConfig, MalformedPolicy};
pub use error::LayoutError;
pub use event::{Appointment, TimedEvent};
pub use geometry::PositionedEvent;
pub use lanes::{assign_lanes, LaneAssignment};
pub use layout::{layout, layout_day, layout_week, DayColumn};
pub use mapper::TimeMapper;
pub use zoom::{TouchPoint, ZoomController};
